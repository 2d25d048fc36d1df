//! 16-bit RGB565 colors
//!
//! The panel runs in 16 bits per pixel (COLMOD 0x55): 5 bits red,
//! 6 bits green, 5 bits blue, sent high byte first.

/// Packed RGB565 color
///
/// Only built from 8-bit channels through [`Rgb565::pack`], so every value
/// in circulation came from the same truncation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb565(u16);

impl Rgb565 {
    pub const BLACK: Self = Self::pack(0, 0, 0);
    pub const WHITE: Self = Self::pack(255, 255, 255);
    pub const RED: Self = Self::pack(255, 0, 0);
    pub const GREEN: Self = Self::pack(0, 255, 0);
    pub const BLUE: Self = Self::pack(0, 0, 255);

    /// Pack 8-bit channels into RGB565
    ///
    /// Low bits of each channel are dropped: 3 of red, 2 of green, 3 of blue.
    pub const fn pack(r: u8, g: u8, b: u8) -> Self {
        let r = (r as u16 & 0xF8) << 8;
        let g = (g as u16 & 0xFC) << 3;
        let b = b as u16 >> 3;
        Self(r | g | b)
    }

    /// Raw 16-bit value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Bytes in wire order (high byte first)
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extremes() {
        assert_eq!(Rgb565::pack(255, 255, 255).raw(), 0xFFFF);
        assert_eq!(Rgb565::pack(0, 0, 0).raw(), 0x0000);
    }

    #[test]
    fn test_pure_red_has_no_green_or_blue() {
        let red = Rgb565::pack(255, 0, 0).raw();
        assert_eq!(red, 0xF800);
        assert_eq!(red & 0x07FF, 0);
    }

    #[test]
    fn test_primary_constants() {
        assert_eq!(Rgb565::GREEN.raw(), 0x07E0);
        assert_eq!(Rgb565::BLUE.raw(), 0x001F);
        assert_eq!(Rgb565::WHITE.to_be_bytes(), [0xFF, 0xFF]);
        assert_eq!(Rgb565::RED.to_be_bytes(), [0xF8, 0x00]);
    }

    #[test]
    fn test_wide_inputs_truncate_like_bytes() {
        // 0x1FF as a byte is 0xFF
        let wide: u32 = 0x1FF;
        assert_eq!(Rgb565::pack(wide as u8, 0, 0), Rgb565::RED);
    }

    proptest! {
        #[test]
        fn prop_matches_formula(r: u8, g: u8, b: u8) {
            let expected = ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3);
            prop_assert_eq!(Rgb565::pack(r, g, b).raw(), expected);
        }

        #[test]
        fn prop_low_bits_ignored(r: u8, g: u8, b: u8) {
            prop_assert_eq!(Rgb565::pack(r, g, b), Rgb565::pack(r | 0x07, g | 0x03, b | 0x07));
        }
    }
}
