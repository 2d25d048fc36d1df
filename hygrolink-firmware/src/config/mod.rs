//! Configuration loading
//!
//! The station config is compiled in from `station.toml` and validated by
//! `build.rs`; the runtime parse still falls back to defaults so a parser
//! mismatch cannot brick the board.

use defmt::*;
use hygrolink_core::config::{parse_config, StationConfig};
use hygrolink_hal_rp2040::GpioAllocator;

/// Embedded configuration (edit station.toml and rebuild to customize)
const EMBEDDED_CONFIG: &str = include_str!("../../station.toml");

/// Parse the embedded config and check its pins against the board
pub fn load() -> StationConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            warn!("station.toml rejected ({}), using defaults", e);
            StationConfig::new()
        }
    };

    let mut gpio = GpioAllocator::pico_w();
    if let Err(e) = gpio.claim_station(&config) {
        warn!("Pin assignment invalid ({}), using default pins", e);
        let defaults = StationConfig::new();
        return StationConfig {
            display: defaults.display,
            sensor: defaults.sensor,
            ..config
        };
    }

    config
}
