//! Configuration type definitions
//!
//! These types represent the station configuration. The firmware embeds a
//! TOML file at build time and parses it into [`StationConfig`] on boot.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::monitor::DEFAULT_MAX_ERRORS;

/// Maximum SSID length (802.11 limit)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WPA passphrase length
pub const MAX_PASSWORD_LEN: usize = 64;

/// Maximum telemetry API key length
pub const MAX_API_KEY_LEN: usize = 32;

/// Maximum endpoint URL length
pub const MAX_URL_LEN: usize = 96;

/// Default ThingSpeak update endpoint
pub const DEFAULT_TELEMETRY_URL: &str = "http://api.thingspeak.com/update";

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    pub const fn with_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: true,
        }
    }
}

/// WiFi credentials
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WifiConfig {
    pub ssid: String<MAX_SSID_LEN>,
    /// Empty for open networks
    pub password: String<MAX_PASSWORD_LEN>,
}

impl Default for WifiConfig {
    fn default() -> Self {
        let mut ssid = String::new();
        let _ = ssid.push_str("Wokwi-GUEST");
        Self {
            ssid,
            password: String::new(),
        }
    }
}

/// Telemetry upload settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TelemetryConfig {
    /// Channel write key; uploads are refused while empty
    pub api_key: String<MAX_API_KEY_LEN>,
    /// Update endpoint
    pub url: String<MAX_URL_LEN>,
    /// Minimum seconds between successful uploads
    pub min_interval_s: u32,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        let mut url = String::new();
        let _ = url.push_str(DEFAULT_TELEMETRY_URL);
        Self {
            api_key: String::new(),
            url,
            min_interval_s: 15,
        }
    }
}

/// TFT panel wiring and bus settings
///
/// SCK and MOSI are fixed by the SPI peripheral; only the control lines
/// are configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayHwConfig {
    /// Panel width in pixels
    pub width: u16,
    /// Panel height in pixels
    pub height: u16,
    /// SPI clock in Hz
    pub spi_frequency: u32,
    /// SPI mode (0-3)
    pub spi_mode: u8,
    /// Chip select
    pub cs_pin: PinConfig,
    /// Data/command select
    pub dc_pin: PinConfig,
    /// Hardware reset
    pub rst_pin: PinConfig,
}

impl Default for DisplayHwConfig {
    fn default() -> Self {
        Self {
            width: 240,
            height: 320,
            spi_frequency: 40_000_000,
            spi_mode: 0,
            cs_pin: PinConfig::new(9),
            dc_pin: PinConfig::new(8),
            rst_pin: PinConfig::new(12),
        }
    }
}

/// Climate sensor wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorHwConfig {
    /// Single-wire data line
    pub data_pin: PinConfig,
}

impl Default for SensorHwConfig {
    fn default() -> Self {
        Self {
            data_pin: PinConfig::with_pullup(21),
        }
    }
}

/// Polling loop settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StationSettings {
    /// Seconds between measurement cycles
    pub poll_interval_s: u32,
    /// Consecutive sensor failures before the error screen
    pub max_errors: u8,
}

impl Default for StationSettings {
    fn default() -> Self {
        Self {
            poll_interval_s: 20,
            max_errors: DEFAULT_MAX_ERRORS,
        }
    }
}

/// Complete station configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StationConfig {
    pub wifi: WifiConfig,
    pub telemetry: TelemetryConfig,
    pub display: DisplayHwConfig,
    pub sensor: SensorHwConfig,
    pub station: StationSettings,
}

impl StationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// GPIO numbers claimed by the configuration, with a role name each
    pub fn claimed_pins(&self) -> [(u8, &'static str); 4] {
        [
            (self.display.cs_pin.pin, "display.cs"),
            (self.display.dc_pin.pin, "display.dc"),
            (self.display.rst_pin.pin, "display.rst"),
            (self.sensor.data_pin.pin, "sensor.data"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StationConfig::new();
        assert_eq!(config.wifi.ssid.as_str(), "Wokwi-GUEST");
        assert!(config.wifi.password.is_empty());
        assert!(config.telemetry.api_key.is_empty());
        assert_eq!(config.telemetry.url.as_str(), DEFAULT_TELEMETRY_URL);
        assert_eq!(config.telemetry.min_interval_s, 15);
        assert_eq!((config.display.width, config.display.height), (240, 320));
        assert_eq!(config.station.poll_interval_s, 20);
        assert_eq!(config.station.max_errors, 3);
    }

    #[test]
    fn test_default_pins_distinct() {
        let pins = StationConfig::new().claimed_pins();
        for (i, (a, _)) in pins.iter().enumerate() {
            for (b, _) in &pins[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
