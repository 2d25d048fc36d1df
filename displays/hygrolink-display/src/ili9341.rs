//! ILI9341 TFT driver
//!
//! 240x320 panel on a write-only SPI bus with separate chip select,
//! data/command and reset lines. Every command byte and every data block
//! is its own CS-framed transmission; the panel runs in RGB565.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use hygrolink_core::{clamp_to_bounds, Rgb565, Window};

use crate::backend::Canvas;

/// Native panel width in portrait orientation
pub const ILI9341_WIDTH: u16 = 240;

/// Native panel height in portrait orientation
pub const ILI9341_HEIGHT: u16 = 320;

/// Pixels sent per data transmission when filling a window
pub const CHUNK_PIXELS: usize = 1024;

/// Command opcodes used by the driver
pub mod commands {
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const PASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;

    /// COLMOD payload: 16 bits per pixel
    pub const PIXEL_FORMAT_16BIT: u8 = 0x55;
    /// MADCTL payload: BGR order, no rotation
    pub const MADCTL_BGR: u8 = 0x08;
}

/// Reset pulse and post-command settle times (ms)
const RESET_PULSE_MS: u32 = 100;
const SETTLE_MS: u32 = 150;

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// SPI transfer failed
    Spi(E),
    /// A control line could not be driven
    Pin,
}

/// Driver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    /// Constructed, panel not configured
    Uninitialized,
    /// Init sequence completed
    Ready,
}

/// ILI9341 over SPI
pub struct Ili9341<SPI, CS, DC, RST> {
    spi: SPI,
    cs: CS,
    dc: DC,
    rst: RST,
    width: u16,
    height: u16,
    state: DriverState,
}

impl<SPI, CS, DC, RST> Ili9341<SPI, CS, DC, RST>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a driver for the native 240x320 panel
    ///
    /// Nothing is sent until [`init`](Self::init).
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST) -> Self {
        Self::with_size(spi, cs, dc, rst, ILI9341_WIDTH, ILI9341_HEIGHT)
    }

    /// Create a driver with explicit logical dimensions
    pub fn with_size(spi: SPI, cs: CS, dc: DC, rst: RST, width: u16, height: u16) -> Self {
        Self {
            spi,
            cs,
            dc,
            rst,
            width,
            height,
            state: DriverState::Uninitialized,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Hardware reset and panel configuration
    ///
    /// Safe to call again; the full sequence is re-run.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), DisplayError<SPI::Error>> {
        // Idle levels
        self.cs.set_high().map_err(|_| DisplayError::Pin)?;
        self.dc.set_low().map_err(|_| DisplayError::Pin)?;
        self.rst.set_high().map_err(|_| DisplayError::Pin)?;

        self.rst.set_low().map_err(|_| DisplayError::Pin)?;
        delay.delay_ms(RESET_PULSE_MS);
        self.rst.set_high().map_err(|_| DisplayError::Pin)?;
        delay.delay_ms(RESET_PULSE_MS);

        self.write_command(commands::SWRESET)?;
        delay.delay_ms(SETTLE_MS);
        self.write_command(commands::SLPOUT)?;
        delay.delay_ms(SETTLE_MS);

        self.write_command(commands::COLMOD)?;
        self.write_data(&[commands::PIXEL_FORMAT_16BIT])?;
        self.write_command(commands::MADCTL)?;
        self.write_data(&[commands::MADCTL_BGR])?;

        self.write_command(commands::DISPON)?;
        delay.delay_ms(SETTLE_MS);

        self.state = DriverState::Ready;
        Ok(())
    }

    /// Send one command byte
    fn write_command(&mut self, cmd: u8) -> Result<(), DisplayError<SPI::Error>> {
        self.dc.set_low().map_err(|_| DisplayError::Pin)?;
        self.transmit(&[cmd])
    }

    /// Send one block of parameter or pixel bytes
    fn write_data(&mut self, data: &[u8]) -> Result<(), DisplayError<SPI::Error>> {
        self.dc.set_high().map_err(|_| DisplayError::Pin)?;
        self.transmit(data)
    }

    /// One CS-framed transfer; CS is released only after the bus drains
    fn transmit(&mut self, bytes: &[u8]) -> Result<(), DisplayError<SPI::Error>> {
        self.cs.set_low().map_err(|_| DisplayError::Pin)?;
        let result = self
            .spi
            .write(bytes)
            .and_then(|()| self.spi.flush())
            .map_err(DisplayError::Spi);
        // Release CS even when the transfer failed
        let released = self.cs.set_high().map_err(|_| DisplayError::Pin);
        result.and(released)
    }

    /// Select the inclusive RAM window for the next pixel stream
    ///
    /// No bounds checking; callers clip first.
    pub fn set_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), DisplayError<SPI::Error>> {
        self.write_command(commands::CASET)?;
        self.write_data(&span_bytes(x0, x1))?;
        self.write_command(commands::PASET)?;
        self.write_data(&span_bytes(y0, y1))?;
        self.write_command(commands::RAMWR)
    }

    /// Stream `window.pixel_count()` pixels of `color` in fixed-size chunks
    fn stream_fill(&mut self, window: Window, color: Rgb565) -> Result<(), DisplayError<SPI::Error>> {
        self.set_window(window.x0, window.y0, window.x1, window.y1)?;

        let mut chunk = [0u8; CHUNK_PIXELS * 2];
        for pixel in chunk.chunks_exact_mut(2) {
            pixel.copy_from_slice(&color.to_be_bytes());
        }

        let total = window.pixel_count() as usize;
        for _ in 0..total / CHUNK_PIXELS {
            self.write_data(&chunk)?;
        }
        let remainder = total % CHUNK_PIXELS;
        if remainder > 0 {
            self.write_data(&chunk[..remainder * 2])?;
        }
        Ok(())
    }
}

fn span_bytes(start: u16, end: u16) -> [u8; 4] {
    let [s_hi, s_lo] = start.to_be_bytes();
    let [e_hi, e_lo] = end.to_be_bytes();
    [s_hi, s_lo, e_hi, e_lo]
}

impl<SPI, CS, DC, RST> Canvas for Ili9341<SPI, CS, DC, RST>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    type Error = DisplayError<SPI::Error>;

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn draw_pixel(&mut self, x: i32, y: i32, color: Rgb565) -> Result<(), Self::Error> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return Ok(());
        }
        let (x, y) = (x as u16, y as u16);
        self.set_window(x, y, x, y)?;
        self.write_data(&color.to_be_bytes())
    }

    fn draw_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        match clamp_to_bounds(x, y, w, h, self.width, self.height) {
            Some(window) => self.stream_fill(window, color),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{self, data_writes, transactions, Event};
    use proptest::prelude::*;

    #[test]
    fn test_new_is_uninitialized_and_silent() {
        let (display, _delay, log) = mock::display();
        assert_eq!(display.state(), DriverState::Uninitialized);
        assert_eq!(display.size(), (240, 320));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_init_sequence() {
        let (mut display, mut delay, log) = mock::display();
        display.init(&mut delay).unwrap();
        assert_eq!(display.state(), DriverState::Ready);

        let events = log.borrow();
        assert_eq!(
            &events[..7],
            &[
                Event::Cs(true),
                Event::Dc(false),
                Event::Rst(true),
                Event::Rst(false),
                Event::DelayMs(100),
                Event::Rst(true),
                Event::DelayMs(100),
            ]
        );
        let delays: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                Event::DelayMs(ms) => Some(*ms),
                _ => None,
            })
            .collect();
        assert_eq!(delays, [100, 100, 150, 150, 150]);
        drop(events);

        let expected: Vec<(u8, Vec<Vec<u8>>)> = vec![
            (commands::SWRESET, vec![]),
            (commands::SLPOUT, vec![]),
            (commands::COLMOD, vec![vec![0x55]]),
            (commands::MADCTL, vec![vec![0x08]]),
            (commands::DISPON, vec![]),
        ];
        assert_eq!(transactions(&log), expected);
    }

    #[test]
    fn test_reinit_reruns_sequence() {
        let (mut display, mut delay, log) = mock::display();
        display.init(&mut delay).unwrap();
        let first = log.borrow().len();
        display.init(&mut delay).unwrap();
        assert_eq!(log.borrow().len(), first * 2);
        assert_eq!(display.state(), DriverState::Ready);
    }

    #[test]
    fn test_command_framing() {
        let (mut display, _delay, log) = mock::display();
        display.write_command(commands::RAMWR).unwrap();
        display.write_data(&[1, 2, 3]).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                Event::Dc(false),
                Event::Cs(false),
                Event::Write(vec![0x2C]),
                Event::Flush,
                Event::Cs(true),
                Event::Dc(true),
                Event::Cs(false),
                Event::Write(vec![1, 2, 3]),
                Event::Flush,
                Event::Cs(true),
            ]
        );
    }

    #[test]
    fn test_set_window_bytes() {
        let (mut display, _delay, log) = mock::display();
        display.set_window(0x0012, 0x0034, 0x0100, 0x013F).unwrap();
        let expected: Vec<(u8, Vec<Vec<u8>>)> = vec![
            (commands::CASET, vec![vec![0x00, 0x12, 0x01, 0x00]]),
            (commands::PASET, vec![vec![0x00, 0x34, 0x01, 0x3F]]),
            (commands::RAMWR, vec![]),
        ];
        assert_eq!(transactions(&log), expected);
    }

    #[test]
    fn test_pixel_in_bounds() {
        let (mut display, _delay, log) = mock::display();
        display.draw_pixel(5, 7, Rgb565::RED).unwrap();
        let txs = transactions(&log);
        assert_eq!(txs.len(), 3);
        assert_eq!(txs[0].1, vec![vec![0, 5, 0, 5]]);
        assert_eq!(txs[1].1, vec![vec![0, 7, 0, 7]]);
        assert_eq!(txs[2].1, vec![vec![0xF8, 0x00]]);
    }

    #[test]
    fn test_pixel_out_of_bounds_is_silent() {
        let (mut display, _delay, log) = mock::display();
        for (x, y) in [(-1, 0), (0, -1), (240, 0), (0, 320), (1000, 1000)] {
            display.draw_pixel(x, y, Rgb565::RED).unwrap();
        }
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_rect_out_of_bounds_is_silent() {
        let (mut display, _delay, log) = mock::display();
        display.draw_rect(240, 0, 10, 10, Rgb565::RED).unwrap();
        display.draw_rect(-50, -50, 20, 20, Rgb565::RED).unwrap();
        display.draw_rect(10, 10, 0, 5, Rgb565::RED).unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_full_screen_chunking() {
        let (mut display, _delay, log) = mock::display();
        display.fill_screen(Rgb565::WHITE).unwrap();

        let data = data_writes(&log);
        // Two window payloads, then pixels
        let pixels = &data[2..];
        // 76800 pixels = 75 full chunks, no remainder
        assert_eq!(pixels.len(), 75);
        assert!(pixels.iter().all(|chunk| chunk.len() == CHUNK_PIXELS * 2));
        assert!(pixels.iter().flatten().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_rect_remainder_chunk() {
        let (mut display, _delay, log) = mock::display();
        // 50 x 30 = 1500 pixels: one full chunk and 476 left
        display.draw_rect(10, 10, 50, 30, Rgb565::BLUE).unwrap();
        let data = data_writes(&log);
        assert_eq!(data[0], vec![0, 10, 0, 59]);
        assert_eq!(data[1], vec![0, 10, 0, 39]);
        assert_eq!(data[2].len(), 2048);
        assert_eq!(data[3].len(), 476 * 2);
        assert_eq!(&data[3][..2], &[0x00, 0x1F]);
        assert_eq!(data.len(), 4);
    }

    #[test]
    fn test_draw_char_pixel_order() {
        let (mut display, _delay, log) = mock::display();
        display.draw_char(0, 0, '.', Rgb565::BLACK, 2).unwrap();

        // Column windows of every pixel write, in order
        let xs: Vec<u8> = transactions(&log)
            .iter()
            .filter(|(cmd, _)| *cmd == commands::CASET)
            .map(|(_, data)| data[0][1])
            .collect();
        let ys: Vec<u8> = transactions(&log)
            .iter()
            .filter(|(cmd, _)| *cmd == commands::PASET)
            .map(|(_, data)| data[0][1])
            .collect();
        // First lit cell (row 5, col 3): dx outer, dy inner
        assert_eq!(&xs[..4], &[6, 6, 7, 7]);
        assert_eq!(&ys[..4], &[10, 11, 10, 11]);
        assert_eq!(xs.len(), 16);
    }

    #[test]
    fn test_pin_failure_propagates() {
        let (mut display, mut delay, _log) = mock::failing_display();
        assert_eq!(display.init(&mut delay), Err(DisplayError::Pin));
        assert_eq!(display.state(), DriverState::Uninitialized);
        assert_eq!(
            display.draw_pixel(0, 0, Rgb565::RED),
            Err(DisplayError::Pin)
        );
    }

    proptest! {
        #[test]
        fn prop_rect_streams_exact_pixel_count(
            x in -50i32..260,
            y in -50i32..340,
            w in 0i32..300,
            h in 0i32..40,
        ) {
            let (mut display, _delay, log) = mock::display();
            display.draw_rect(x, y, w, h, Rgb565::GREEN).unwrap();

            let expected = clamp_to_bounds(x, y, w, h, 240, 320)
                .map(|win| win.pixel_count() as usize)
                .unwrap_or(0);
            let data = data_writes(&log);
            if expected == 0 {
                prop_assert!(data.is_empty());
            } else {
                let pixels = &data[2..];
                let streamed: usize = pixels.iter().map(|c| c.len() / 2).sum();
                prop_assert_eq!(streamed, expected);
                prop_assert!(pixels.iter().all(|c| c.len() <= CHUNK_PIXELS * 2 && !c.is_empty()));
                let last = pixels.len() - 1;
                prop_assert!(pixels[..last].iter().all(|c| c.len() == CHUNK_PIXELS * 2));
            }
        }
    }
}
