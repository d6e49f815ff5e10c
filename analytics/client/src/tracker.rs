use crate::{DataSender, Error, HttpDataSender, TrackerConfig};
use analytics_model::{CustomPayload, Event, Payload, TrackingResult, MEASUREMENT_PROTOCOL_VERSION};
use url::Url;

/// Sends events to the collection endpoint.
#[derive(Debug)]
pub struct EventTracker {
    sender: Box<dyn DataSender>,
    collect_url: Url,
    debug_url: Url,
    custom: CustomPayload,
}

impl EventTracker {
    pub fn new(config: TrackerConfig) -> Result<Self, Error> {
        let sender = HttpDataSender::new(config.build_client()?);
        Ok(Self::with_sender(sender, config.collect_url, config.debug_url))
    }

    /// Create a tracker using a different transport.
    pub fn with_sender<S>(sender: S, collect_url: Url, debug_url: Url) -> Self
    where
        S: DataSender + 'static,
    {
        Self {
            sender: Box::new(sender),
            collect_url,
            debug_url,
            custom: Default::default(),
        }
    }

    /// Add a parameter which is sent with every following hit.
    ///
    /// Parameters which are set from the event can't be overridden and are rejected.
    pub fn add_to_custom_payload(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), analytics_model::Error> {
        self.custom.try_insert(key, value)
    }

    pub fn custom_payload(&self) -> &CustomPayload {
        &self.custom
    }

    pub fn clear_custom_payload(&mut self) {
        self.custom.clear();
    }

    pub fn payload(&self, event: &Event) -> Payload {
        Payload::build(MEASUREMENT_PROTOCOL_VERSION, event, Some(&self.custom))
    }

    /// Send an event, as an encoded body.
    pub async fn track_event(&self, event: &Event) -> TrackingResult<Error> {
        let body = self.payload(event).to_encoded();
        let result = self
            .sender
            .send_data(&self.collect_url, body, false)
            .await
            .map(|_| None);
        capture(result)
    }

    /// Send an event, as a form built from the payload pairs.
    pub async fn track_event_form(&self, event: &Event) -> TrackingResult<Error> {
        let payload = self.payload(event);
        let result = self
            .sender
            .send_form(&self.collect_url, &payload)
            .await
            .map(|()| None);
        capture(result)
    }

    /// Check an event against the hit validation endpoint.
    ///
    /// The hit is not recorded. On success the result carries the validation response, see
    /// [`TrackingResult::is_valid`].
    pub async fn validate_hit(&self, event: &Event) -> TrackingResult<Error> {
        let body = self.payload(event).to_encoded();
        let result = self
            .sender
            .send_data(&self.debug_url, body, true)
            .await
            .map(|response| Some(response.unwrap_or_default()));
        capture(result)
    }
}

fn capture(result: Result<Option<String>, Error>) -> TrackingResult<Error> {
    if let Err(err) = &result {
        log::warn!("Failed to send analytics hit: {err}");
    }
    result.into()
}
