//! Configuration types
//!
//! Board-agnostic station configuration and the TOML subset parser that
//! fills it.

pub mod parse;
pub mod types;

pub use parse::{parse_config, parse_pin, ParseError};
pub use types::*;
