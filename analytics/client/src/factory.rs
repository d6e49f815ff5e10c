use crate::Error;
use analytics_model::{Event, EventBuilder};
use std::collections::HashMap;

/// The setting holding the web property events are tracked for.
pub const SETTING_TRACKING_ID: &str = "UNIVERSAL_ANALYTICS_TRACKING_ID";

/// A source of configuration settings.
pub trait Settings {
    fn get_setting(&self, key: &str) -> Option<String>;
}

/// Settings from the process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvSettings;

impl Settings for EnvSettings {
    fn get_setting(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Settings for HashMap<String, String> {
    fn get_setting(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Creates events for the tracking id found in the settings.
#[derive(Clone, Debug, Default)]
pub struct EventFactory<S> {
    settings: S,
}

impl<S: Settings> EventFactory<S> {
    pub fn new(settings: S) -> Self {
        Self { settings }
    }

    pub fn tracking_id(&self) -> Result<String, Error> {
        self.settings
            .get_setting(SETTING_TRACKING_ID)
            .ok_or_else(|| Error::MissingSetting(SETTING_TRACKING_ID.to_string()))
    }

    /// Start an event for the configured tracking id.
    pub fn builder(&self) -> Result<EventBuilder, Error> {
        Ok(EventBuilder::new(self.tracking_id()?))
    }

    /// Create an event for an anonymous client id.
    pub fn make_event_for_client_id(
        &self,
        client_id: impl Into<String>,
        category: impl Into<String>,
        action: impl Into<String>,
        label: Option<&str>,
        value: Option<&str>,
    ) -> Result<Event, Error> {
        let builder = self.builder()?.client_id(client_id);
        Self::finish(builder, category, action, label, value)
    }

    /// Create an event for a user id.
    pub fn make_event_for_user_id(
        &self,
        user_id: impl Into<String>,
        category: impl Into<String>,
        action: impl Into<String>,
        label: Option<&str>,
        value: Option<&str>,
    ) -> Result<Event, Error> {
        let builder = self.builder()?.user_id(user_id);
        Self::finish(builder, category, action, label, value)
    }

    fn finish(
        mut builder: EventBuilder,
        category: impl Into<String>,
        action: impl Into<String>,
        label: Option<&str>,
        value: Option<&str>,
    ) -> Result<Event, Error> {
        builder = builder.category(category).action(action);
        if let Some(label) = label {
            builder = builder.label(label);
        }
        if let Some(value) = value {
            builder = builder.value(value);
        }
        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use analytics_model::{UserId, FIELD_IDENTITY, FIELD_TRACKING_ID};
    use rstest::rstest;

    fn factory(tracking_id: Option<&str>) -> EventFactory<HashMap<String, String>> {
        EventFactory::new(
            tracking_id
                .map(|id| (SETTING_TRACKING_ID.to_string(), id.to_string()))
                .into_iter()
                .collect(),
        )
    }

    #[test]
    fn client_id_event() {
        let event = factory(Some("tracking id"))
            .make_event_for_client_id(
                "anonymous client id",
                "event category",
                "event action",
                Some("event label"),
                Some("500"),
            )
            .unwrap();

        assert_eq!(event.tracking_id(), "tracking id");
        assert_eq!(event.client_id(), Some("anonymous client id"));
        assert_eq!(event.user_id(), None);
        assert_eq!(event.category(), "event category");
        assert_eq!(event.action(), "event action");
        assert_eq!(event.label(), Some("event label"));
        assert_eq!(event.value(), Some("500"));
    }

    #[test]
    fn user_id_event() {
        let event = factory(Some("tracking id"))
            .make_event_for_user_id("user id", "event category", "event action", None, None)
            .unwrap();

        assert_eq!(event.client_id(), None);
        assert_eq!(event.user_id(), Some(&UserId::new("user id")));
        assert_eq!(event.label(), None);
        assert_eq!(event.value(), None);
    }

    #[test]
    fn missing_tracking_id() {
        let err = factory(None)
            .make_event_for_client_id("cid", "cat", "act", None, None)
            .unwrap_err();
        assert!(matches!(err, Error::MissingSetting(key) if key == SETTING_TRACKING_ID));
    }

    #[rstest]
    #[case("  ", "cid", FIELD_TRACKING_ID)]
    #[case("UA-1-1", " ", FIELD_IDENTITY)]
    #[case("UA-1-1", "", FIELD_IDENTITY)]
    fn blank_values_are_validation_errors(
        #[case] tracking_id: &str,
        #[case] user_id: &str,
        #[case] field: &str,
    ) {
        let err = factory(Some(tracking_id))
            .make_event_for_user_id(user_id, "cat", "act", None, None)
            .unwrap_err();
        assert!(matches!(err, Error::Model(err) if err.field() == Some(field)));
    }
}
