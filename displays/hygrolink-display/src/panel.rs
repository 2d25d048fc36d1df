//! Station readout screen
//!
//! White background, red title band, then temperature, humidity and a
//! status line, all at scale 2.

use hygrolink_core::traits::Reading;
use hygrolink_core::Rgb565;

use crate::backend::Canvas;
use crate::layout::TextLineLayout;

pub const BACKGROUND: Rgb565 = Rgb565::WHITE;
pub const HEADER_COLOR: Rgb565 = Rgb565::RED;
pub const LABEL_COLOR: Rgb565 = Rgb565::BLUE;
pub const VALUE_COLOR: Rgb565 = Rgb565::BLACK;
pub const ERROR_COLOR: Rgb565 = Rgb565::RED;

pub const TEXT_SCALE: u8 = 2;

pub const TITLE: &str = "DATA:";
pub const TEMPERATURE_LABEL: &str = "Temp.: ";
pub const HUMIDITY_LABEL: &str = "Humid: ";

pub const STATUS_SENDING: &str = "SENDING...";
pub const STATUS_ERROR: &str = "ERROR";

/// Header band height as a fraction of the panel
const HEADER_HEIGHT_PCT: f64 = 0.16;

/// The three readout lines
pub struct ReadoutPanel {
    temperature: TextLineLayout,
    humidity: TextLineLayout,
    status: TextLineLayout,
}

impl ReadoutPanel {
    /// Clear the screen and draw the static parts
    pub fn new<C: Canvas>(display: &mut C) -> Result<Self, C::Error> {
        display.fill_screen(BACKGROUND)?;
        display.draw_rect_percent(0.0, 0.0, 1.0, HEADER_HEIGHT_PCT, HEADER_COLOR)?;
        display.draw_text(0.5, 0.04, TITLE, BACKGROUND, TEXT_SCALE)?;

        let temperature = line(display, TEMPERATURE_LABEL, 0.73, 0.25)?;
        let humidity = line(display, HUMIDITY_LABEL, 0.73, 0.40)?;
        let status = line(display, "", 1.3, 0.70)?;

        Ok(Self {
            temperature,
            humidity,
            status,
        })
    }

    /// Show a fresh sample
    pub fn show_reading<C: Canvas>(
        &mut self,
        display: &mut C,
        reading: &Reading,
    ) -> Result<(), C::Error> {
        self.temperature
            .update_var_text(display, &reading.format_temperature(), None)?;
        self.humidity
            .update_var_text(display, &reading.format_humidity(), None)
    }

    pub fn show_status<C: Canvas>(&mut self, display: &mut C, text: &str) -> Result<(), C::Error> {
        self.status.update_var_text(display, text, None)
    }

    pub fn clear_status<C: Canvas>(&mut self, display: &mut C) -> Result<(), C::Error> {
        self.status.update_var_text(display, "", None)
    }

    /// Replace every value with a red error marker
    pub fn show_error<C: Canvas>(&mut self, display: &mut C) -> Result<(), C::Error> {
        for row in [&mut self.temperature, &mut self.humidity, &mut self.status] {
            row.update_var_text(display, STATUS_ERROR, Some(ERROR_COLOR))?;
        }
        Ok(())
    }

    pub fn temperature(&self) -> &TextLineLayout {
        &self.temperature
    }

    pub fn humidity(&self) -> &TextLineLayout {
        &self.humidity
    }

    pub fn status(&self) -> &TextLineLayout {
        &self.status
    }
}

fn line<C: Canvas>(
    display: &mut C,
    label: &'static str,
    x_pct: f64,
    y_pct: f64,
) -> Result<TextLineLayout, C::Error> {
    TextLineLayout::new(
        display,
        label,
        x_pct,
        y_pct,
        LABEL_COLOR,
        VALUE_COLOR,
        BACKGROUND,
        TEXT_SCALE,
    )
}
