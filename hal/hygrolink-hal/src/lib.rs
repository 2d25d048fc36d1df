//! Hygrolink Hardware Abstraction Layer
//!
//! This crate defines the traits that sit between the station logic and
//! chip-specific code. Pixel and sensor lines use `embedded-hal` directly;
//! what `embedded-hal` does not cover (WiFi association, HTTP uploads,
//! bus configuration) is defined here.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (hygrolink-firmware)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  hygrolink-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ hygrolink-hal-  │
//!            │     rp2040      │
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`net::WifiStation`] - Station-mode WiFi association
//! - [`net::HttpClient`] - Minimal HTTP POST
//! - [`spi::SpiConfig`] - Bus settings shared by board crates

#![no_std]
#![deny(unsafe_code)]

pub mod net;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use net::{HttpClient, WifiStation};
pub use spi::SpiConfig;
