//! Simple TOML parser for station configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the station file. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings or escape sequences
//! - Arrays and inline tables
//! - Dotted keys

use heapless::String;

use super::types::{PinConfig, StationConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// String does not fit its fixed capacity
    TooLong,
    /// Line is neither a header nor `key = value`
    MissingField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Wifi,
    Thingspeak,
    Display,
    Sensor,
    Station,
}

/// Parse TOML configuration into StationConfig
///
/// Keys that are absent keep their defaults.
pub fn parse_config(input: &str) -> Result<StationConfig, ParseError> {
    let mut config = StationConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = strip_comment(line);
            if !header.ends_with(']') || header.len() < 2 {
                return Err(ParseError::InvalidSection);
            }
            section = parse_section_header(&header[1..header.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::MissingField)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "wifi" => Ok(Section::Wifi),
        "thingspeak" => Ok(Section::Thingspeak),
        "display" => Ok(Section::Display),
        "sensor" => Ok(Section::Sensor),
        "station" => Ok(Section::Station),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Cut a trailing `# comment` that is not inside a string
fn strip_comment(value: &str) -> &str {
    let mut in_string = false;
    for (i, ch) in value.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return value[..i].trim(),
            _ => {}
        }
    }
    value
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_str(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

fn parse_string<const N: usize>(value: &str) -> Result<String<N>, ParseError> {
    String::try_from(parse_str(value)).map_err(|_| ParseError::TooLong)
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a pin string like "gpio11", "!gpio12", "^gpio4"
pub fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let mut s = parse_str(value);
    let mut inverted = false;
    let mut pull_up = false;

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let digits = s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    let pin: u8 = digits.parse().map_err(|_| ParseError::InvalidPin)?;
    if pin > 29 {
        return Err(ParseError::InvalidPin);
    }

    Ok(PinConfig {
        pin,
        inverted,
        pull_up,
    })
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut StationConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => return Err(ParseError::UnknownKey),
        Section::Wifi => match key {
            "ssid" => config.wifi.ssid = parse_string(value)?,
            "password" => config.wifi.password = parse_string(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Thingspeak => match key {
            "api_key" => config.telemetry.api_key = parse_string(value)?,
            "url" => config.telemetry.url = parse_string(value)?,
            "min_interval_s" => config.telemetry.min_interval_s = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Display => match key {
            "width" => config.display.width = parse_nonzero(value)?,
            "height" => config.display.height = parse_nonzero(value)?,
            "spi_frequency" => config.display.spi_frequency = parse_nonzero(value)?,
            "spi_mode" => {
                let mode: u8 = parse_int(value)?;
                if mode > 3 {
                    return Err(ParseError::InvalidValue);
                }
                config.display.spi_mode = mode;
            }
            "cs_pin" => config.display.cs_pin = parse_pin(value)?,
            "dc_pin" => config.display.dc_pin = parse_pin(value)?,
            "rst_pin" => config.display.rst_pin = parse_pin(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Sensor => match key {
            "data_pin" => config.sensor.data_pin = parse_pin(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Station => match key {
            "poll_interval_s" => config.station.poll_interval_s = parse_nonzero(value)?,
            "max_errors" => config.station.max_errors = parse_nonzero(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
    }
    Ok(())
}

fn parse_nonzero<T>(value: &str) -> Result<T, ParseError>
where
    T: core::str::FromStr + PartialEq + Default,
{
    let parsed: T = parse_int(value)?;
    if parsed == T::default() {
        return Err(ParseError::InvalidValue);
    }
    Ok(parsed)
}
