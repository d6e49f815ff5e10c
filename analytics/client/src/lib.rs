//! Sending Universal Analytics event hits over HTTP.
//!
//! Build an [`Event`] (directly or through an [`EventFactory`]) and hand it to an
//! [`EventTracker`]. Tracking never returns an error, failures are captured in the returned
//! [`TrackingResult`].

mod config;
mod error;
mod factory;
mod sender;
mod tracker;

pub use analytics_model as model;
pub use analytics_model::{
    ClientId, CustomPayload, Event, EventBuilder, Identity, Parameter, Payload, TrackingResult, UserId,
    CLIENT_ID_NAMESPACE, HIT_TYPE_EVENT, MEASUREMENT_PROTOCOL_VERSION, VALID_HIT_MARKER,
};
pub use config::*;
pub use error::*;
pub use factory::*;
pub use sender::*;
pub use tracker::*;
