//! GPIO allocation for the Pico W
//!
//! Tracks which GPIO pins are in use so a config that points two roles at
//! the same pin, or at a pin the board already wires to something, is
//! rejected before any peripheral is touched.

use heapless::FnvIndexMap;
use hygrolink_core::config::StationConfig;

/// Number of GPIO pins on RP2040
pub const GPIO_COUNT: u8 = 30;

/// SPI1 clock to the TFT
pub const DISPLAY_SCK_PIN: u8 = 10;

/// SPI1 MOSI to the TFT
pub const DISPLAY_MOSI_PIN: u8 = 11;

/// Pins the board claims before config is applied
///
/// 23-25 and 29 belong to the CYW43 radio on the Pico W.
pub const BOARD_PINS: [(u8, &str); 6] = [
    (DISPLAY_SCK_PIN, "display sck"),
    (DISPLAY_MOSI_PIN, "display mosi"),
    (23, "radio power"),
    (24, "radio data"),
    (25, "radio cs"),
    (29, "radio clock"),
];

/// Why a pin could not be allocated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Pin number out of range
    InvalidPin(u8),
    /// Pin already claimed by another role
    Conflict {
        pin: u8,
        role: &'static str,
        holder: &'static str,
    },
}

/// Tracks pin ownership by role name
pub struct GpioAllocator {
    allocated: FnvIndexMap<u8, &'static str, 32>,
}

impl Default for GpioAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioAllocator {
    /// Allocator with nothing claimed
    pub fn new() -> Self {
        Self {
            allocated: FnvIndexMap::new(),
        }
    }

    /// Allocator with the board pins already claimed
    pub fn pico_w() -> Self {
        let mut alloc = Self::new();
        for (pin, role) in BOARD_PINS {
            // Distinct and in range
            let _ = alloc.allocate(pin, role);
        }
        alloc
    }

    /// Claim `pin` for `role`
    pub fn allocate(&mut self, pin: u8, role: &'static str) -> Result<(), GpioError> {
        if pin >= GPIO_COUNT {
            return Err(GpioError::InvalidPin(pin));
        }
        if let Some(&holder) = self.allocated.get(&pin) {
            return Err(GpioError::Conflict { pin, role, holder });
        }
        self.allocated
            .insert(pin, role)
            .map_err(|_| GpioError::InvalidPin(pin))?;
        Ok(())
    }

    /// Claim every configurable pin of a station config
    pub fn claim_station(&mut self, config: &StationConfig) -> Result<(), GpioError> {
        for (pin, role) in config.claimed_pins() {
            self.allocate(pin, role)?;
        }
        Ok(())
    }

    pub fn release(&mut self, pin: u8) {
        self.allocated.remove(&pin);
    }

    pub fn is_allocated(&self, pin: u8) -> bool {
        self.allocated.contains_key(&pin)
    }

    /// Role holding `pin`, if any
    pub fn holder(&self, pin: u8) -> Option<&'static str> {
        self.allocated.get(&pin).copied()
    }

    pub fn allocated_count(&self) -> usize {
        self.allocated.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hygrolink_core::config::PinConfig;

    #[test]
    fn test_allocator() {
        let mut alloc = GpioAllocator::new();
        assert!(alloc.allocate(8, "display dc").is_ok());
        assert_eq!(alloc.holder(8), Some("display dc"));
        assert_eq!(
            alloc.allocate(8, "sensor data"),
            Err(GpioError::Conflict {
                pin: 8,
                role: "sensor data",
                holder: "display dc"
            })
        );

        alloc.release(8);
        assert!(!alloc.is_allocated(8));
        assert!(alloc.allocate(8, "sensor data").is_ok());
        assert_eq!(alloc.allocate(30, "x"), Err(GpioError::InvalidPin(30)));
    }

    #[test]
    fn test_default_station_fits_board() {
        let mut alloc = GpioAllocator::pico_w();
        assert_eq!(alloc.allocated_count(), BOARD_PINS.len());
        assert!(alloc.claim_station(&StationConfig::new()).is_ok());
        assert_eq!(alloc.allocated_count(), BOARD_PINS.len() + 4);
    }

    #[test]
    fn test_radio_pin_rejected() {
        let mut config = StationConfig::new();
        config.sensor.data_pin = PinConfig::with_pullup(24);
        let mut alloc = GpioAllocator::pico_w();
        assert!(matches!(
            alloc.claim_station(&config),
            Err(GpioError::Conflict {
                pin: 24,
                holder: "radio data",
                ..
            })
        ));
    }
}
