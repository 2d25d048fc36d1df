//! DHT22 / AM2302 temperature and humidity sensor
//!
//! The single-wire transaction itself comes from `dht-sensor`; this module
//! adapts it to [`ClimateSensor`] and fixed-point readings. The line must
//! be open drain with a pull-up. The bit loop is timing sensitive, so long
//! interrupt handlers during a read show up as checksum errors or
//! timeouts.

use dht_sensor::{dht22, DhtError};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use hygrolink_core::traits::{ClimateSensor, Reading, SensorError};

/// Convert a sample to tenths
fn to_reading(sample: dht22::Reading) -> Reading {
    Reading::new(
        tenths(sample.temperature) as i16,
        tenths(sample.relative_humidity).max(0) as u16,
    )
}

/// Scale by ten, rounding half away from zero
fn tenths(value: f32) -> i32 {
    let scaled = value * 10.0;
    if scaled < 0.0 {
        (scaled - 0.5) as i32
    } else {
        (scaled + 0.5) as i32
    }
}

fn map_error<E>(error: DhtError<E>) -> SensorError {
    match error {
        DhtError::PinError(_) => SensorError::Bus,
        DhtError::ChecksumMismatch => SensorError::Checksum,
        DhtError::Timeout => SensorError::Timeout,
    }
}

/// DHT22 on one open-drain GPIO
///
/// `set_high` must release the line; `is_high` must read the actual line
/// level.
pub struct Dht22<P, D> {
    pin: P,
    delay: D,
    last: Reading,
}

impl<P, D> Dht22<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// Create a driver and release the line
    pub fn new(mut pin: P, delay: D) -> Self {
        // Idle state is released; a failure here surfaces on first read
        let _ = pin.set_high();
        Self {
            pin,
            delay,
            last: Reading::default(),
        }
    }
}

impl<P, D> ClimateSensor for Dht22<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn measure(&mut self) -> Result<(), SensorError> {
        let sample = dht22::blocking::read(&mut self.delay, &mut self.pin).map_err(map_error)?;
        self.last = to_reading(sample);
        Ok(())
    }

    fn temperature_x10(&self) -> i16 {
        self.last.temperature_x10
    }

    fn humidity_x10(&self) -> u16 {
        self.last.humidity_x10
    }
}
