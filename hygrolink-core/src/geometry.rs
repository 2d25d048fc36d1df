//! Screen geometry policies
//!
//! Rectangle clipping against the panel and the placement of text cells
//! along a run. Both are pure so drawing code stays a thin layer over the
//! transport.

/// Inclusive pixel window on the panel
///
/// When produced by [`clamp_to_bounds`], `x0 <= x1 < width` and
/// `y0 <= y1 < height` hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Window {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl Window {
    /// Single-pixel window
    pub const fn pixel(x: u16, y: u16) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x,
            y1: y,
        }
    }

    pub const fn width(&self) -> u32 {
        (self.x1 - self.x0) as u32 + 1
    }

    pub const fn height(&self) -> u32 {
        (self.y1 - self.y0) as u32 + 1
    }

    /// Number of pixels covered
    pub const fn pixel_count(&self) -> u32 {
        self.width() * self.height()
    }
}

/// Clip a rectangle to a `width` x `height` panel
///
/// Negative origins shrink the rectangle, overhang past the right or bottom
/// edge is cut off. Returns `None` when nothing remains.
pub fn clamp_to_bounds(x: i32, y: i32, w: i32, h: i32, width: u16, height: u16) -> Option<Window> {
    let (x0, x1) = clamp_span(x, w, width)?;
    let (y0, y1) = clamp_span(y, h, height)?;
    Some(Window { x0, y0, x1, y1 })
}

/// Clip `[start, start + len)` to `[0, limit)`, returning inclusive ends
fn clamp_span(start: i32, len: i32, limit: u16) -> Option<(u16, u16)> {
    let start = i64::from(start);
    let end = start + i64::from(len);
    let lo = start.max(0);
    let hi = end.min(i64::from(limit));
    if hi <= lo {
        return None;
    }
    Some((lo as u16, (hi - 1) as u16))
}

/// Placement of characters along a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Align {
    /// Run starts at `edge` and grows right; the last character sits at
    /// `edge`, the first one furthest right
    LeftAligned,
    /// Run ends at `edge` and grows left; the first character sits
    /// immediately left of `edge`
    RightAligned,
}

impl Align {
    /// X position of character `index` in a run of `len` characters
    ///
    /// `advance` is the cell width in pixels. Positions saturate at the
    /// `i32` range; anything that far out is clipped by the canvas anyway.
    pub fn cell_x(self, edge: i32, index: usize, len: usize, advance: i32) -> i32 {
        match self {
            Align::LeftAligned => {
                let slot = len.saturating_sub(1).saturating_sub(index);
                edge.saturating_add(saturating_i32(slot).saturating_mul(advance))
            }
            Align::RightAligned => {
                let cells = saturating_i32(index).saturating_add(1);
                edge.saturating_sub(cells.saturating_mul(advance))
            }
        }
    }
}

fn saturating_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
