//! Telemetry uplink for the Hygrolink climate station
//!
//! - [`thingspeak`] - Rate-limited channel updates over any
//!   [`hygrolink_hal::HttpClient`]
//! - [`http`] - Request framing and status parsing for raw TCP clients

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod http;
pub mod thingspeak;

pub use http::{HttpError, Url};
pub use thingspeak::{ThingSpeak, TelemetryError, MAX_FIELDS};
