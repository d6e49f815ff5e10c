use crate::{Error, Event};
use std::fmt::{Display, Formatter};
use url::form_urlencoded;

/// The hit type of every event hit.
pub const HIT_TYPE_EVENT: &str = "event";

/// Measurement protocol parameters set from an [`Event`].
///
/// The keys are part of the protocol and must be sent exactly as they are. A custom parameter
/// using one of these keys is never sent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Parameter {
    Version,
    TrackingId,
    ClientId,
    UserId,
    HitType,
    EventCategory,
    EventAction,
    EventLabel,
    EventValue,
    NonInteractionHit,
}

impl Parameter {
    pub const ALL: [Parameter; 10] = [
        Self::Version,
        Self::TrackingId,
        Self::ClientId,
        Self::UserId,
        Self::HitType,
        Self::EventCategory,
        Self::EventAction,
        Self::EventLabel,
        Self::EventValue,
        Self::NonInteractionHit,
    ];

    pub const fn key(&self) -> &'static str {
        match self {
            Self::Version => "v",
            Self::TrackingId => "tid",
            Self::ClientId => "cid",
            Self::UserId => "uid",
            Self::HitType => "t",
            Self::EventCategory => "ec",
            Self::EventAction => "ea",
            Self::EventLabel => "el",
            Self::EventValue => "ev",
            Self::NonInteractionHit => "ni",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    pub fn is_reserved(key: &str) -> bool {
        Self::from_key(key).is_some()
    }
}

impl Display for Parameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Additional parameters sent along with every hit, like `qt` (queue time).
///
/// Keeps insertion order. Inserting a key again replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomPayload(Vec<(String, String)>);

impl CustomPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a parameter, without checking the key.
    ///
    /// Reserved keys are accepted here, but dropped when the payload is built.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.0.push((key, value)),
        }
    }

    /// Add or replace a parameter, rejecting reserved keys.
    pub fn try_insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<(), Error> {
        let key = key.into();
        if Parameter::is_reserved(&key) {
            return Err(Error::InvalidArgument {
                field: "key",
                reason: "is a reserved measurement protocol parameter",
            });
        }
        self.insert(key, value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(index).1)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for CustomPayload
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut payload = Self::new();
        for (k, v) in iter {
            payload.insert(k, v);
        }
        payload
    }
}

/// The wire ready parameters of a single hit, in a fixed order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Payload(Vec<(String, String)>);

impl Payload {
    /// Build the parameters for an event.
    ///
    /// Event parameters come first, in protocol order, followed by the custom parameters in
    /// insertion order. Custom parameters using a reserved key are skipped.
    pub fn build(version: &str, event: &Event, custom: Option<&CustomPayload>) -> Self {
        let mut payload = Self(Vec::with_capacity(Parameter::ALL.len()));

        payload.push(Parameter::Version, version);
        payload.push(Parameter::TrackingId, event.tracking_id());
        if let Some(client_id) = event.client_id() {
            payload.push(Parameter::ClientId, client_id);
        }
        if let Some(user_id) = event.user_id() {
            payload.push(Parameter::UserId, user_id.as_str());
        }
        payload.push(Parameter::HitType, HIT_TYPE_EVENT);
        payload.push(Parameter::EventCategory, event.category());
        payload.push(Parameter::EventAction, event.action());
        if let Some(label) = event.label() {
            payload.push(Parameter::EventLabel, label);
        }
        if let Some(value) = event.value() {
            payload.push(Parameter::EventValue, value);
        }
        if event.non_interaction() {
            payload.push(Parameter::NonInteractionHit, "1");
        }

        if let Some(custom) = custom {
            for (key, value) in custom.iter() {
                if Parameter::is_reserved(key) {
                    log::debug!("Dropping custom parameter '{key}', it is reserved");
                    continue;
                }
                payload.0.push((key.to_string(), value.to_string()));
            }
        }

        payload
    }

    fn push(&mut self, parameter: Parameter, value: &str) {
        self.0.push((parameter.key().to_string(), value.to_string()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Encode as `application/x-www-form-urlencoded`.
    pub fn to_encoded(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.0)
            .finish()
    }
}

impl Display for Payload {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_encoded())
    }
}

impl IntoIterator for Payload {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Payload {
    type Item = &'a (String, String);
    type IntoIter = std::slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
