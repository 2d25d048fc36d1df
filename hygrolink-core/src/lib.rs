//! Board-agnostic core logic for the climate station firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - RGB565 color packing
//! - 8x8 glyph table
//! - Clipping and text alignment policies
//! - Sensor trait and reading formatting
//! - Consecutive-failure monitor
//! - Configuration types and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod font;
pub mod geometry;
pub mod monitor;
pub mod traits;

pub use color::Rgb565;
pub use font::{glyph_or_blank, Glyph};
pub use geometry::{clamp_to_bounds, Align, Window};
