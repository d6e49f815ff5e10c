use crate::Error;
use serde::{Deserialize, Serialize};
use md5::Md5;
use sha1::{Digest, Sha1};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Namespace for deriving client ids from names.
///
/// This is a randomly chosen value. It must never change, otherwise ids derived from the same
/// name no longer match ids stored earlier.
pub const CLIENT_ID_NAMESPACE: Uuid = Uuid::from_bytes([
    0x17, 0x4b, 0xb9, 0xdb, 0xf7, 0xdf, 0x45, 0x03, 0x93, 0x02, 0x56, 0xc6, 0xd5, 0x8e, 0x53, 0xd2,
]);

/// An anonymous client id, the `cid` parameter.
///
/// See <https://developers.google.com/analytics/devguides/collection/protocol/v1/parameters#cid>
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(Uuid);

impl ClientId {
    /// A new, random client id.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Wrap raw bytes, which must be exactly 16 bytes long.
    ///
    /// Any 16 bytes are accepted, including the nil UUID. There is no unset state to reject.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Uuid::from_slice(bytes)
            .map(Self)
            .map_err(|_| Error::InvalidArgument {
                field: "id",
                reason: "must be exactly 16 bytes",
            })
    }

    /// Derive a stable client id from a name, as a version 5 UUID in [`CLIENT_ID_NAMESPACE`].
    ///
    /// The same name always results in the same id.
    pub fn from_name(name: &str) -> Self {
        Self(Uuid::new_v5(&CLIENT_ID_NAMESPACE, name.as_bytes()))
    }

    /// Derive a client id with the bit masks used by earlier releases.
    ///
    /// Those releases masked the version and variant bits instead of setting them, so the
    /// result is not a well-formed version 5 UUID. Only use this to recompute ids that were
    /// stored by such a release.
    pub fn from_legacy_name(name: &str) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(CLIENT_ID_NAMESPACE.as_bytes());
        hasher.update(name.as_bytes());
        let hash = hasher.finalize();

        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&hash[..16]);
        bytes[6] &= 0x5f;
        bytes[8] &= 0x7f;

        Self(Uuid::from_bytes(bytes))
    }

    /// Derive a client id from a seed, as the MD5 digest of its UTF-8 bytes.
    ///
    /// The first three digest fields are read little endian, matching ids created by .NET
    /// clients through `new Guid(byte[])`. Unlike [`Self::from_name`] this is not a namespaced
    /// UUID and carries no version bits.
    pub fn from_seed(seed: &str) -> Self {
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&Md5::digest(seed.as_bytes()));
        Self(Uuid::from_bytes_le(bytes))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new_random()
    }
}

impl From<Uuid> for ClientId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ClientId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<ClientId> for String {
    fn from(id: ClientId) -> Self {
        id.to_string()
    }
}

/// A user id, the `uid` parameter.
///
/// See <https://developers.google.com/analytics/devguides/collection/protocol/v1/parameters#uid>
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Who an event is about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Identity {
    /// A device or browser, without any personal data. Usually the string form of a [`ClientId`].
    Anonymous(String),
    /// A signed in user.
    User(UserId),
}

impl From<ClientId> for Identity {
    fn from(id: ClientId) -> Self {
        Self::Anonymous(id.to_string())
    }
}

impl From<UserId> for Identity {
    fn from(id: UserId) -> Self {
        Self::User(id)
    }
}
