//! Hygrolink - DHT22 Climate Station Firmware
//!
//! Pico W firmware that reads a DHT22 every poll interval, shows the values
//! on an ILI9341 TFT and uploads them to a ThingSpeak channel.

#![no_std]
#![no_main]

extern crate alloc;

use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::*;
use embassy_executor::Spawner;
use embassy_net::StackResources;
use embassy_rp::bind_interrupts;
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Level, Output, OutputOpenDrain};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_rp::spi::Spi;
use embassy_time::Delay;
use embedded_alloc::LlffHeap as Heap;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use hygrolink_display::{Ili9341, ReadoutPanel};
use hygrolink_drivers::sensor::Dht22;
use hygrolink_hal::spi::{Mode, SpiConfig};
use hygrolink_hal_rp2040::{pins, spi, Cyw43Station, TcpHttpClient};
use hygrolink_telemetry::ThingSpeak;

mod config;
mod tasks;

// Heap for JSON request bodies
#[global_allocator]
static HEAP: Heap = Heap::empty();

const HEAP_SIZE: usize = 8 * 1024;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

static RADIO_STATE: StaticCell<cyw43::State> = StaticCell::new();
static NET_RESOURCES: StaticCell<StackResources<4>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Hygrolink firmware starting...");

    init_heap();

    let p = embassy_rp::init(Default::default());
    let config = config::load();
    let (mut bank, radio, bus) = pins::split(p);
    info!("Peripherals initialized");

    // Display on SPI1, transmit only
    let mode = Mode::from_number(config.display.spi_mode).unwrap_or(Mode::Mode0);
    let spi_config = spi::to_embassy_config(&SpiConfig::new(config.display.spi_frequency, mode));
    let spi_bus = Spi::new_blocking_txonly(bus.spi, bus.sck, bus.mosi, spi_config);

    let hw = &config.display;
    if hw.cs_pin.inverted || hw.dc_pin.inverted || hw.rst_pin.inverted {
        warn!("Display control lines have fixed polarity, '!' ignored");
    }
    let cs = Output::new(unwrap!(bank.take(config.display.cs_pin.pin)), Level::High);
    let dc = Output::new(unwrap!(bank.take(config.display.dc_pin.pin)), Level::High);
    let rst = Output::new(unwrap!(bank.take(config.display.rst_pin.pin)), Level::High);

    let mut display = Ili9341::with_size(
        spi_bus,
        cs,
        dc,
        rst,
        config.display.width,
        config.display.height,
    );

    let panel = match display.init(&mut Delay) {
        Ok(()) => match ReadoutPanel::new(&mut display) {
            Ok(panel) => Some(panel),
            Err(e) => {
                warn!("Panel draw failed: {}", e);
                None
            }
        },
        Err(e) => {
            warn!("Display init failed: {}", e);
            None
        }
    };
    info!("Display ready: {}", panel.is_some());

    // DHT22 on an open-drain line
    let data = OutputOpenDrain::new(unwrap!(bank.take(config.sensor.data_pin.pin)), Level::High);
    let sensor = Dht22::new(data, Delay);

    // CYW43 radio over PIO SPI
    let fw = include_bytes!("../cyw43-firmware/43439A0.bin");
    let clm = include_bytes!("../cyw43-firmware/43439A0_clm.bin");

    let pwr = Output::new(radio.pwr, Level::Low);
    let radio_cs = Output::new(radio.cs, Level::High);
    let mut pio = Pio::new(radio.pio, Irqs);
    let radio_spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        radio_cs,
        radio.dio,
        radio.clk,
        radio.dma,
    );

    let state = RADIO_STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, radio_spi, fw).await;
    spawner.spawn(tasks::cyw43_task(runner)).unwrap();

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;

    let seed = RoscRng.next_u64();
    let (stack, net_runner) = embassy_net::new(
        net_device,
        embassy_net::Config::dhcpv4(Default::default()),
        NET_RESOURCES.init(StackResources::new()),
        seed,
    );
    spawner.spawn(tasks::net_task(net_runner)).unwrap();
    info!("Network stack started");

    let uplink = ThingSpeak::from_config(TcpHttpClient::new(stack), &config.telemetry);
    let station = tasks::Station {
        display,
        panel,
        sensor,
        uplink,
        wifi: Cyw43Station::new(control, stack),
        config,
    };

    spawner.spawn(tasks::station_task(station)).unwrap();
    info!("All tasks spawned");
}

fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}
