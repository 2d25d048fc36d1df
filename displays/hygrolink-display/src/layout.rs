//! Label + value text lines
//!
//! A [`TextLineLayout`] draws a fixed label once and then keeps a value
//! next to it up to date, erasing only what the previous value covered.

use heapless::String;
use hygrolink_core::font::GLYPH_SIZE;
use hygrolink_core::{Align, Rgb565};

use crate::backend::Canvas;

/// Value origin, in character cells, measured from the label's left edge
///
/// The value's right edge sits at `x_text + (label_len - 7) * cell`. All
/// screen positions were tuned against this offset, so it stays fixed.
pub const VALUE_ORIGIN_OFFSET_CHARS: i32 = 7;

/// Longest value a line remembers
pub const MAX_VALUE_LEN: usize = 24;

/// One label/value line on the panel
///
/// The layout does not own the display; pass the same canvas to every call.
#[derive(Debug, Clone)]
pub struct TextLineLayout {
    anchor: (i32, i32),
    value_color: Rgb565,
    bg_color: Rgb565,
    scale: u8,
    x_var: i32,
    y_var: i32,
    current: String<MAX_VALUE_LEN>,
}

impl TextLineLayout {
    /// Place a line centred on a point given as panel fractions and draw
    /// its label
    #[allow(clippy::too_many_arguments)]
    pub fn new<C: Canvas>(
        display: &mut C,
        label: &'static str,
        x_pct: f64,
        y_pct: f64,
        label_color: Rgb565,
        value_color: Rgb565,
        bg_color: Rgb565,
        scale: u8,
    ) -> Result<Self, C::Error> {
        let scale = scale.max(1);
        let anchor = display.percent_to_pixel(x_pct, y_pct);
        let cell = GLYPH_SIZE * i32::from(scale);
        let label_len = i32::try_from(label.chars().count()).unwrap_or(i32::MAX);

        let x_text = anchor.0.saturating_sub(label_len.saturating_mul(cell) / 2);
        display.draw_run(x_text, anchor.1, label, Align::LeftAligned, label_color, scale)?;

        let offset = label_len.saturating_sub(VALUE_ORIGIN_OFFSET_CHARS);
        Ok(Self {
            anchor,
            value_color,
            bg_color,
            scale,
            x_var: x_text.saturating_add(offset.saturating_mul(cell)),
            y_var: anchor.1,
            current: String::new(),
        })
    }

    /// Replace the value, redrawing only when it changed
    ///
    /// The old value's cells are cleared to the background first. `color`
    /// overrides the value color for this draw only.
    ///
    /// Only the first [`MAX_VALUE_LEN`] bytes of `text` are kept: longer
    /// values are cut at a char boundary before they are compared, drawn
    /// and stored, so two values sharing that prefix count as equal.
    pub fn update_var_text<C: Canvas>(
        &mut self,
        display: &mut C,
        text: &str,
        color: Option<Rgb565>,
    ) -> Result<(), C::Error> {
        let text = truncate(text, MAX_VALUE_LEN);
        if text == self.current.as_str() {
            return Ok(());
        }

        let cell = self.cell();
        let old_width = self.current.chars().count() as i32 * cell;
        display.draw_rect(
            self.x_var.saturating_sub(old_width),
            self.y_var,
            old_width,
            cell,
            self.bg_color,
        )?;

        display.draw_run(
            self.x_var,
            self.y_var,
            text,
            Align::RightAligned,
            color.unwrap_or(self.value_color),
            self.scale,
        )?;

        self.current.clear();
        // Fits: truncated to capacity above
        let _ = self.current.push_str(text);
        Ok(())
    }

    /// Currently displayed value
    pub fn value(&self) -> &str {
        &self.current
    }

    /// Resolved pixel anchor
    pub fn anchor(&self) -> (i32, i32) {
        self.anchor
    }

    /// Right edge of the value run and its top row
    pub fn value_origin(&self) -> (i32, i32) {
        (self.x_var, self.y_var)
    }

    fn cell(&self) -> i32 {
        GLYPH_SIZE * i32::from(self.scale)
    }
}

/// Longest prefix of `text` within `max` bytes, cut at a char boundary
fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
