//! Events, payloads and client identifiers for the Universal Analytics measurement protocol.
//!
//! Everything in this crate is a plain value or a pure function. Sending a hit is the job of
//! `analytics-client`, which consumes the [`Payload`] produced here.

mod error;
mod event;
mod identity;
mod payload;
mod result;

pub use error::*;
pub use event::*;
pub use identity::*;
pub use payload::*;
pub use result::*;

/// The measurement protocol version this crate builds payloads for.
pub const MEASUREMENT_PROTOCOL_VERSION: &str = "1";
