//! Pixel canvas trait
//!
//! Defines the drawing surface the text layer renders onto. A backend only
//! has to provide single pixels and solid rectangles; glyphs, text runs and
//! the percentage coordinate system are built on top of those.

use hygrolink_core::font::{glyph_or_blank, lit_cells, GLYPH_SIZE};
use hygrolink_core::{Align, Rgb565};

/// Pixel-addressed drawing surface
///
/// Coordinates are signed so callers can place things partly off screen;
/// implementations clip.
pub trait Canvas {
    /// Transport error
    type Error;

    /// Panel size in pixels as `(width, height)`
    fn size(&self) -> (u16, u16);

    /// Set one pixel; out-of-bounds coordinates are ignored
    fn draw_pixel(&mut self, x: i32, y: i32, color: Rgb565) -> Result<(), Self::Error>;

    /// Fill a rectangle, clipped to the panel
    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565)
        -> Result<(), Self::Error>;

    /// Fill the whole panel
    fn fill_screen(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        let (width, height) = self.size();
        self.draw_rect(0, 0, i32::from(width), i32::from(height), color)
    }

    /// Convert panel fractions to pixels, truncating toward zero
    ///
    /// Fractions are not range checked; values above 1.0 land off screen.
    fn percent_to_pixel(&self, x_pct: f64, y_pct: f64) -> (i32, i32) {
        let (width, height) = self.size();
        (
            (f64::from(width) * x_pct) as i32,
            (f64::from(height) * y_pct) as i32,
        )
    }

    /// Draw one 8x8 glyph scaled by `scale`, foreground pixels only
    ///
    /// Unsupported characters draw nothing.
    fn draw_char(
        &mut self,
        x: i32,
        y: i32,
        ch: char,
        color: Rgb565,
        scale: u8,
    ) -> Result<(), Self::Error> {
        let scale = i32::from(scale);
        for (row, col) in lit_cells(glyph_or_blank(ch)) {
            let px = x.saturating_add(col * scale);
            let py = y.saturating_add(row * scale);
            for dx in 0..scale {
                for dy in 0..scale {
                    self.draw_pixel(px.saturating_add(dx), py.saturating_add(dy), color)?;
                }
            }
        }
        Ok(())
    }

    /// Draw `text` as a run of glyph cells placed by `align` around `edge`
    fn draw_run(
        &mut self,
        edge: i32,
        y: i32,
        text: &str,
        align: Align,
        color: Rgb565,
        scale: u8,
    ) -> Result<(), Self::Error> {
        let advance = GLYPH_SIZE * i32::from(scale);
        let len = text.chars().count();
        for (index, ch) in text.chars().enumerate() {
            let x = align.cell_x(edge, index, len, advance);
            self.draw_char(x, y, ch, color, scale)?;
        }
        Ok(())
    }

    /// Draw text centred on a point given as panel fractions
    fn draw_text(
        &mut self,
        x_pct: f64,
        y_pct: f64,
        text: &str,
        color: Rgb565,
        scale: u8,
    ) -> Result<(), Self::Error> {
        let (x, y) = self.percent_to_pixel(x_pct, y_pct);
        let len = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
        let half_cell = (GLYPH_SIZE / 2) * i32::from(scale);
        let edge = x.saturating_sub(len.saturating_mul(half_cell));
        self.draw_run(edge, y, text, Align::LeftAligned, color, scale)
    }

    /// Fill a rectangle given entirely in panel fractions
    fn draw_rect_percent(
        &mut self,
        x_pct: f64,
        y_pct: f64,
        w_pct: f64,
        h_pct: f64,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        let (x, y) = self.percent_to_pixel(x_pct, y_pct);
        let (w, h) = self.percent_to_pixel(w_pct, h_pct);
        self.draw_rect(x, y, w, h, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::FrameBuffer;

    #[test]
    fn test_percent_to_pixel_center() {
        let fb = FrameBuffer::new(240, 320);
        assert_eq!(fb.percent_to_pixel(0.5, 0.5), (120, 160));
        assert_eq!(fb.percent_to_pixel(0.0, 1.0), (0, 320));
    }

    #[test]
    fn test_percent_to_pixel_truncates() {
        let fb = FrameBuffer::new(240, 320);
        // 240 * 1.3 must not come out as 311
        assert_eq!(fb.percent_to_pixel(1.3, 0.7), (312, 224));
        assert_eq!(fb.percent_to_pixel(0.73, 0.25), (175, 80));
        assert_eq!(fb.percent_to_pixel(-0.01, 0.0), (-2, 0));
    }

    #[test]
    fn test_unknown_char_draws_nothing() {
        let mut fb = FrameBuffer::new(240, 320);
        fb.draw_char(10, 10, '!', Rgb565::RED, 2).unwrap();
        fb.draw_char(10, 10, ' ', Rgb565::RED, 2).unwrap();
        assert_eq!(fb.count(Rgb565::RED), 0);
    }

    #[test]
    fn test_char_scaling_blocks() {
        let mut fb = FrameBuffer::new(240, 320);
        fb.draw_char(0, 0, '.', Rgb565::BLACK, 1).unwrap();
        let small = fb.count(Rgb565::BLACK);
        assert_eq!(small, 4);

        let mut fb = FrameBuffer::new(240, 320);
        fb.draw_char(0, 0, '.', Rgb565::BLACK, 3).unwrap();
        assert_eq!(fb.count(Rgb565::BLACK), small * 9);
        // '.' row 5, col 3 at scale 3 starts at (9, 15)
        assert_eq!(fb.get(9, 15), Some(Rgb565::BLACK));
        assert_eq!(fb.get(8, 15), Some(Rgb565::WHITE));
    }

    #[test]
    fn test_draw_text_matches_reversed_run() {
        let mut text = FrameBuffer::new(240, 320);
        text.draw_text(0.5, 0.5, "AB1", Rgb565::BLUE, 2).unwrap();

        // Centre 120, edge 120 - 3*4*2 = 96; reversed order from the edge
        let mut manual = FrameBuffer::new(240, 320);
        for (i, ch) in "1BA".chars().enumerate() {
            manual
                .draw_char(96 + i as i32 * 16, 160, ch, Rgb565::BLUE, 2)
                .unwrap();
        }
        assert!(text == manual);
    }

    #[test]
    fn test_far_off_screen_text_is_clipped() {
        let mut fb = FrameBuffer::new(240, 320);
        fb.draw_text(1.0e12, 0.5, "DATA:", Rgb565::RED, 2).unwrap();
        fb.draw_text(-1.0e12, 0.5, "DATA:", Rgb565::RED, 2).unwrap();
        fb.draw_text(0.5, 1.0e12, "DATA:", Rgb565::RED, 3).unwrap();
        fb.draw_char(i32::MAX, i32::MIN, 'A', Rgb565::RED, 4).unwrap();
        assert_eq!(fb.count(Rgb565::RED), 0);
    }

    #[test]
    fn test_rect_percent() {
        let mut fb = FrameBuffer::new(240, 320);
        fb.draw_rect_percent(0.0, 0.0, 1.0, 0.16, Rgb565::RED).unwrap();
        // 320 * 0.16 = 51.2 -> 51 rows
        assert_eq!(fb.count(Rgb565::RED), 240 * 51);
    }
}
