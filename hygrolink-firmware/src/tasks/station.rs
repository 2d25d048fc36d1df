//! Station polling task
//!
//! Every poll interval: read the DHT22, show the values, upload them, and
//! after too many failed reads in a row mark the screen with an error.

use defmt::*;
use embassy_rp::gpio::{Output, OutputOpenDrain};
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::{Delay, Duration, Instant, Timer};

use hygrolink_core::config::StationConfig;
use hygrolink_core::monitor::{ErrorMonitor, FailureAction};
use hygrolink_core::traits::{ClimateSensor, Reading};
use hygrolink_display::panel::STATUS_SENDING;
use hygrolink_display::{Ili9341, ReadoutPanel};
use hygrolink_drivers::sensor::Dht22;
use hygrolink_hal::WifiStation;
use hygrolink_hal_rp2040::{Cyw43Station, TcpHttpClient};
use hygrolink_telemetry::{TelemetryError, ThingSpeak};

pub type Display = Ili9341<
    Spi<'static, SPI1, Blocking>,
    Output<'static>,
    Output<'static>,
    Output<'static>,
>;

pub type Sensor = Dht22<OutputOpenDrain<'static>, Delay>;

pub type Uplink = ThingSpeak<TcpHttpClient<'static>>;

/// Everything the polling loop owns
pub struct Station {
    pub display: Display,
    pub panel: Option<ReadoutPanel>,
    pub sensor: Sensor,
    pub uplink: Uplink,
    pub wifi: Cyw43Station<'static>,
    pub config: StationConfig,
}

impl Station {
    /// One poll: read, show, upload
    async fn poll(&mut self, monitor: &mut ErrorMonitor) {
        match self.sensor.read() {
            Ok(reading) => {
                monitor.record_success();
                info!(
                    "Reading: {=str} {=str}",
                    reading.format_temperature().as_str(),
                    reading.format_humidity().as_str()
                );
                self.show_reading(&reading);
                self.upload(&reading).await;
            }
            Err(e) => {
                warn!("Sensor read failed: {}", e);
                if monitor.record_failure() == FailureAction::Escalate {
                    error!("{} consecutive sensor failures", monitor.threshold());
                    if let Some(panel) = self.panel.as_mut() {
                        if let Err(e) = panel.show_error(&mut self.display) {
                            warn!("Display error: {}", e);
                        }
                    }
                }
            }
        }
    }

    fn show_reading(&mut self, reading: &Reading) {
        let Some(panel) = self.panel.as_mut() else {
            return;
        };
        let result = panel
            .show_reading(&mut self.display, reading)
            .and_then(|_| panel.show_status(&mut self.display, STATUS_SENDING));
        if let Err(e) = result {
            warn!("Display error: {}", e);
        }
    }

    async fn upload(&mut self, reading: &Reading) {
        if self.uplink.has_api_key() {
            self.send(reading).await;
        } else {
            debug!("No API key, upload skipped");
        }

        if let Some(panel) = self.panel.as_mut() {
            if let Err(e) = panel.clear_status(&mut self.display) {
                warn!("Display error: {}", e);
            }
        }
    }

    async fn send(&mut self, reading: &Reading) {
        if !self.wifi.is_connected() {
            info!("WiFi down, reconnecting");
            let wifi = &self.config.wifi;
            if let Err(e) = self
                .uplink
                .connect_wifi(&mut self.wifi, &mut Delay, &wifi.ssid, &wifi.password)
                .await
            {
                warn!("WiFi reconnect failed: {}", e);
                return;
            }
        }

        let fields = [
            ("temperature", reading.temperature_c()),
            ("humidity", reading.humidity_pct()),
        ];
        match self.uplink.send_data(Instant::now().as_millis(), &fields).await {
            Ok(()) => info!("Upload accepted"),
            Err(TelemetryError::TooSoon { remaining_ms }) => {
                debug!("Upload skipped, rate limited for {} ms", remaining_ms)
            }
            Err(e) => warn!("Upload failed: {}", e),
        }
    }
}

/// Bring up WiFi and telemetry, then poll forever
#[embassy_executor::task]
pub async fn station_task(mut station: Station) -> ! {
    let config = station.config.clone();

    match station
        .uplink
        .setup(
            &config.telemetry.api_key,
            &mut station.wifi,
            &mut Delay,
            &config.wifi.ssid,
            &config.wifi.password,
        )
        .await
    {
        Ok(()) => info!("WiFi connected to {}", config.wifi.ssid.as_str()),
        Err(TelemetryError::MissingApiKey) => warn!("No ThingSpeak API key, uploads disabled"),
        Err(e) => warn!("WiFi setup failed: {}", e),
    }

    let mut monitor = ErrorMonitor::new(config.station.max_errors);
    let interval = Duration::from_secs(u64::from(config.station.poll_interval_s));

    loop {
        station.poll(&mut monitor).await;
        Timer::after(interval).await;
    }
}
