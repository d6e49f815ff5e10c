use crate::{Error, Identity, UserId};

pub const FIELD_TRACKING_ID: &str = "TrackingId";
pub const FIELD_IDENTITY: &str = "AnonymousClientId || UserId";
pub const FIELD_EVENT_CATEGORY: &str = "EventCategory";
pub const FIELD_EVENT_ACTION: &str = "EventAction";

/// A single event hit.
///
/// Events are validated when they are built and can't be changed afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    tracking_id: String,
    client_id: Option<String>,
    user_id: Option<UserId>,
    category: String,
    action: String,
    label: Option<String>,
    value: Option<String>,
    non_interaction: bool,
}

impl Event {
    /// Create an event for exactly one identity, without label or value.
    pub fn new(
        tracking_id: impl Into<String>,
        identity: impl Into<Identity>,
        category: impl Into<String>,
        action: impl Into<String>,
    ) -> Result<Self, Error> {
        EventBuilder::new(tracking_id)
            .identity(identity)
            .category(category)
            .action(action)
            .build()
    }

    pub fn builder(tracking_id: impl Into<String>) -> EventBuilder {
        EventBuilder::new(tracking_id)
    }

    /// The web property, like `UA-XXXXX-Y`.
    pub fn tracking_id(&self) -> &str {
        &self.tracking_id
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn non_interaction(&self) -> bool {
        self.non_interaction
    }
}

/// Collects the fields of an [`Event`].
///
/// Nothing is checked until [`EventBuilder::build`]. Setting both a client id and a user id is
/// allowed, the measurement protocol accepts both on the same hit.
#[derive(Clone, Debug, Default)]
pub struct EventBuilder {
    tracking_id: String,
    client_id: Option<String>,
    user_id: Option<String>,
    category: Option<String>,
    action: Option<String>,
    label: Option<String>,
    value: Option<String>,
    non_interaction: bool,
}

impl EventBuilder {
    pub fn new(tracking_id: impl Into<String>) -> Self {
        Self {
            tracking_id: tracking_id.into(),
            ..Default::default()
        }
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Set exactly one identity, clearing the other one.
    pub fn identity(mut self, identity: impl Into<Identity>) -> Self {
        match identity.into() {
            Identity::Anonymous(client_id) => {
                self.client_id = Some(client_id);
                self.user_id = None;
            }
            Identity::User(user_id) => {
                self.client_id = None;
                self.user_id = Some(user_id.into());
            }
        }
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn non_interaction(mut self, non_interaction: bool) -> Self {
        self.non_interaction = non_interaction;
        self
    }

    /// Validate the fields and create the event.
    ///
    /// Fields are checked in the order tracking id, identity, category, action. The error names
    /// the first field that is missing or blank.
    pub fn build(self) -> Result<Event, Error> {
        if is_blank(&self.tracking_id) {
            return Err(Error::blank(FIELD_TRACKING_ID));
        }

        let client_id = self.client_id.filter(|id| !is_blank(id));
        let user_id = self.user_id.filter(|id| !is_blank(id));
        if client_id.is_none() && user_id.is_none() {
            return Err(Error::blank(FIELD_IDENTITY));
        }

        let category = required(self.category, FIELD_EVENT_CATEGORY)?;
        let action = required(self.action, FIELD_EVENT_ACTION)?;

        Ok(Event {
            tracking_id: self.tracking_id,
            client_id,
            user_id: user_id.map(UserId::new),
            category,
            action,
            label: self.label,
            value: self.value,
            non_interaction: self.non_interaction,
        })
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn required(value: Option<String>, field: &'static str) -> Result<String, Error> {
    match value {
        Some(value) if !is_blank(&value) => Ok(value),
        _ => Err(Error::blank(field)),
    }
}
