//! Climate sensor trait

use core::fmt::Write;

use heapless::String;

/// Maximum length of a formatted reading ("-3276.8C")
pub const READING_TEXT_LEN: usize = 12;

/// Errors that can occur while measuring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not answer or a bit never arrived
    Timeout,
    /// Frame checksum mismatch
    Checksum,
    /// Pin access failed
    Bus,
}

/// One temperature/humidity sample
///
/// Values are fixed-point with 0.1 resolution: 23.5°C is 235,
/// 45.0 %RH is 450.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    pub temperature_x10: i16,
    pub humidity_x10: u16,
}

impl Reading {
    pub const fn new(temperature_x10: i16, humidity_x10: u16) -> Self {
        Self {
            temperature_x10,
            humidity_x10,
        }
    }

    /// Temperature in °C
    pub fn temperature_c(&self) -> f32 {
        f32::from(self.temperature_x10) / 10.0
    }

    /// Relative humidity in percent
    pub fn humidity_pct(&self) -> f32 {
        f32::from(self.humidity_x10) / 10.0
    }

    /// Temperature with one decimal and a `C` suffix, e.g. `"23.5C"`
    pub fn format_temperature(&self) -> String<READING_TEXT_LEN> {
        format_x10(i32::from(self.temperature_x10), 'C')
    }

    /// Humidity with one decimal and a `%` suffix, e.g. `"45.0%"`
    pub fn format_humidity(&self) -> String<READING_TEXT_LEN> {
        format_x10(i32::from(self.humidity_x10), '%')
    }
}

fn format_x10(value: i32, suffix: char) -> String<READING_TEXT_LEN> {
    let mut out = String::new();
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    // Fits: at most 6 digits, sign, point and suffix
    let _ = write!(out, "{}{}.{}{}", sign, abs / 10, abs % 10, suffix);
    out
}

/// Trait for combined temperature/humidity sensors
///
/// `measure` performs a bus transaction and caches the result; the
/// accessors return the last good sample without touching the bus.
pub trait ClimateSensor {
    /// Take a new measurement
    fn measure(&mut self) -> Result<(), SensorError>;

    /// Last measured temperature in 0.1°C units
    fn temperature_x10(&self) -> i16;

    /// Last measured relative humidity in 0.1 % units
    fn humidity_x10(&self) -> u16;

    /// Measure and return the new sample
    fn read(&mut self) -> Result<Reading, SensorError> {
        self.measure()?;
        Ok(Reading::new(self.temperature_x10(), self.humidity_x10()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_one_decimal() {
        let reading = Reading::new(235, 450);
        assert_eq!(reading.format_temperature().as_str(), "23.5C");
        assert_eq!(reading.format_humidity().as_str(), "45.0%");
    }

    #[test]
    fn test_format_negative_temperature() {
        assert_eq!(Reading::new(-5, 0).format_temperature().as_str(), "-0.5C");
        assert_eq!(Reading::new(-123, 0).format_temperature().as_str(), "-12.3C");
    }

    #[test]
    fn test_format_extremes_fit() {
        assert_eq!(Reading::new(i16::MIN, 0).format_temperature().as_str(), "-3276.8C");
        assert_eq!(Reading::new(0, 1000).format_humidity().as_str(), "100.0%");
    }

    #[test]
    fn test_float_accessors() {
        let reading = Reading::new(-40, 655);
        assert_eq!(reading.temperature_c(), -4.0);
        assert_eq!(reading.humidity_pct(), 65.5);
    }

    struct FixedSensor {
        fail: bool,
    }

    impl ClimateSensor for FixedSensor {
        fn measure(&mut self) -> Result<(), SensorError> {
            if self.fail {
                Err(SensorError::Timeout)
            } else {
                Ok(())
            }
        }

        fn temperature_x10(&self) -> i16 {
            215
        }

        fn humidity_x10(&self) -> u16 {
            600
        }
    }

    #[test]
    fn test_read_measures_first() {
        let mut sensor = FixedSensor { fail: false };
        assert_eq!(sensor.read(), Ok(Reading::new(215, 600)));

        let mut sensor = FixedSensor { fail: true };
        assert_eq!(sensor.read(), Err(SensorError::Timeout));
    }
}
