//! Host-side fakes for driver and layout tests

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, SpiBus};
use hygrolink_core::{clamp_to_bounds, Rgb565};

use crate::backend::Canvas;
use crate::ili9341::Ili9341;

/// One observable transport event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Cs(bool),
    Dc(bool),
    Rst(bool),
    Write(Vec<u8>),
    Flush,
    DelayMs(u32),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub struct MockSpi {
    log: Log,
}

impl spi::ErrorType for MockSpi {
    type Error = Infallible;
}

impl SpiBus<u8> for MockSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Infallible> {
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Infallible> {
        self.log.borrow_mut().push(Event::Write(words.to_vec()));
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Infallible> {
        read.fill(0);
        self.write(write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Infallible> {
        self.log.borrow_mut().push(Event::Write(words.to_vec()));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Infallible> {
        self.log.borrow_mut().push(Event::Flush);
        Ok(())
    }
}

#[derive(Clone, Copy)]
pub enum Line {
    Cs,
    Dc,
    Rst,
}

pub struct MockPin {
    log: Log,
    line: Line,
    fail: bool,
}

impl digital::ErrorType for MockPin {
    type Error = digital::ErrorKind;
}

impl MockPin {
    fn set(&mut self, high: bool) -> Result<(), digital::ErrorKind> {
        if self.fail {
            return Err(digital::ErrorKind::Other);
        }
        let event = match self.line {
            Line::Cs => Event::Cs(high),
            Line::Dc => Event::Dc(high),
            Line::Rst => Event::Rst(high),
        };
        self.log.borrow_mut().push(event);
        Ok(())
    }
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true)
    }
}

pub struct MockDelay {
    log: Log,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ms));
    }
}

pub type TestDisplay = Ili9341<MockSpi, MockPin, MockPin, MockPin>;

/// Build a 240x320 driver over fakes sharing one event log
pub fn display() -> (TestDisplay, MockDelay, Log) {
    display_with(false)
}

/// Same as [`display`] but every pin write fails
pub fn failing_display() -> (TestDisplay, MockDelay, Log) {
    display_with(true)
}

fn display_with(fail: bool) -> (TestDisplay, MockDelay, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let pin = |line| MockPin {
        log: log.clone(),
        line,
        fail,
    };
    let display = Ili9341::new(
        MockSpi { log: log.clone() },
        pin(Line::Cs),
        pin(Line::Dc),
        pin(Line::Rst),
    );
    let delay = MockDelay { log: log.clone() };
    (display, delay, log)
}

/// Split a log into (command, payload) transactions
///
/// Each entry is the command byte followed by the bytes of every data
/// transmission up to the next command.
pub fn transactions(log: &Log) -> Vec<(u8, Vec<Vec<u8>>)> {
    let mut out: Vec<(u8, Vec<Vec<u8>>)> = Vec::new();
    let mut dc_high = false;
    for event in log.borrow().iter() {
        match event {
            Event::Dc(high) => dc_high = *high,
            Event::Write(bytes) if !dc_high => out.push((bytes[0], Vec::new())),
            Event::Write(bytes) => {
                if let Some(last) = out.last_mut() {
                    last.1.push(bytes.clone());
                }
            }
            _ => {}
        }
    }
    out
}

/// Bytes written while DC was high
pub fn data_writes(log: &Log) -> Vec<Vec<u8>> {
    transactions(log).into_iter().flat_map(|(_, data)| data).collect()
}

/// In-memory RGB565 canvas, cleared to white
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    pixels: Vec<Rgb565>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb565::WHITE; width as usize * height as usize],
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgb565> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    pub fn count(&self, color: Rgb565) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }
}

impl Canvas for FrameBuffer {
    type Error = Infallible;

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn draw_pixel(&mut self, x: i32, y: i32, color: Rgb565) -> Result<(), Infallible> {
        if self.get(x, y).is_some() {
            self.pixels[y as usize * self.width as usize + x as usize] = color;
        }
        Ok(())
    }

    fn draw_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Rgb565,
    ) -> Result<(), Infallible> {
        if let Some(win) = clamp_to_bounds(x, y, w, h, self.width, self.height) {
            for py in win.y0..=win.y1 {
                for px in win.x0..=win.x1 {
                    self.pixels[py as usize * self.width as usize + px as usize] = color;
                }
            }
        }
        Ok(())
    }
}
