//! RP2040 / Pico W HAL for the climate station firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `hygrolink-hal` traits, plus board-specific functionality:
//!
//! - GPIO allocation and board pin reservations
//! - Pin bank for config-driven pin assignment
//! - SPI settings translation
//! - CYW43 WiFi station (implements `hygrolink_hal::WifiStation`)
//! - TCP HTTP client (implements `hygrolink_hal::HttpClient`)

#![no_std]

pub mod gpio;
pub mod http;
pub mod pins;
pub mod spi;
pub mod wifi;

pub use gpio::{GpioAllocator, GpioError};
pub use http::{TcpHttpClient, TcpHttpError};
pub use pins::{PinBank, PinError};
pub use wifi::Cyw43Station;
