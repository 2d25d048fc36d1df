//! TFT display driver and text layout for Hygrolink
//!
//! This crate provides:
//! - `Ili9341` driver over any `embedded-hal` SPI bus and output pins
//! - `Canvas` trait with glyph and percentage-coordinate drawing on top of
//!   pixel and rectangle primitives
//! - `TextLineLayout` for a fixed label with a differential value
//! - `ReadoutPanel`, the station's readout screen
//!
//! # Architecture
//!
//! The driver owns the bus and the control lines. Layouts and the panel only
//! keep positions and the last drawn text, and take the driver by `&mut` on
//! every call, so there is exactly one owner of the hardware.

#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod ili9341;
pub mod layout;
pub mod panel;

#[cfg(test)]
mod mock;

// Re-export key types
pub use backend::Canvas;
pub use ili9341::{DisplayError, DriverState, Ili9341, CHUNK_PIXELS};
pub use layout::{TextLineLayout, VALUE_ORIGIN_OFFSET_CHARS};
pub use panel::ReadoutPanel;
