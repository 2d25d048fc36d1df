//! ThingSpeak channel update client
//!
//! Posts up to eight numeric fields as JSON to the channel update endpoint.
//! The service rejects updates that come faster than the channel's rate
//! limit, so the client refuses to send within `min_interval` of the last
//! accepted update instead of burning a request.

use alloc::vec::Vec;

use embedded_hal_async::delay::DelayNs;
use heapless::String;
use hygrolink_core::config::{TelemetryConfig, DEFAULT_TELEMETRY_URL, MAX_API_KEY_LEN, MAX_URL_LEN};
use hygrolink_hal::{HttpClient, WifiStation};
use serde::Serialize;

/// Fields per channel
pub const MAX_FIELDS: usize = 8;

/// Default spacing between accepted updates (ms)
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 15_000;

/// Link polls after a join request
pub const WIFI_POLL_ATTEMPTS: u8 = 10;

/// Spacing between link polls (ms)
pub const WIFI_POLL_INTERVAL_MS: u32 = 1_000;

const JSON_HEADERS: [(&str, &str); 1] = [("Content-Type", "application/json")];

/// Telemetry errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryError<E> {
    /// No usable API key configured
    MissingApiKey,
    /// Last accepted update was too recent
    TooSoon { remaining_ms: u64 },
    /// Server answered with something other than 200
    Status(u16),
    /// Connection or transfer failed
    Transport(E),
    /// Body could not be serialized
    Encode,
    /// Could not associate with the access point
    WifiUnavailable,
}

/// JSON body of a channel update
#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    api_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field1: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field2: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field3: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field4: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field5: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field6: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field7: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field8: Option<f32>,
}

impl<'a> UpdateRequest<'a> {
    /// Assign values to `field1..` in order; names are not sent
    fn new(api_key: &'a str, fields: &[(&str, f32)]) -> Self {
        let mut values = [None; MAX_FIELDS];
        for (slot, &(_, value)) in values.iter_mut().zip(fields) {
            *slot = Some(value);
        }
        let [field1, field2, field3, field4, field5, field6, field7, field8] = values;
        Self {
            api_key,
            field1,
            field2,
            field3,
            field4,
            field5,
            field6,
            field7,
            field8,
        }
    }
}

/// ThingSpeak client over any [`HttpClient`]
pub struct ThingSpeak<H> {
    http: H,
    api_key: String<MAX_API_KEY_LEN>,
    url: String<MAX_URL_LEN>,
    min_interval_ms: u64,
    /// Time of the last accepted update; `None` until the first one
    last_send_ms: Option<u64>,
}

impl<H: HttpClient> ThingSpeak<H> {
    /// Client for the public endpoint with the default rate limit and no key
    pub fn new(http: H) -> Self {
        let mut url = String::new();
        // Fits: the default endpoint is shorter than MAX_URL_LEN
        let _ = url.push_str(DEFAULT_TELEMETRY_URL);
        Self {
            http,
            api_key: String::new(),
            url,
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
            last_send_ms: None,
        }
    }

    /// Client using endpoint, key and rate limit from configuration
    pub fn from_config(http: H, config: &TelemetryConfig) -> Self {
        Self {
            http,
            api_key: config.api_key.clone(),
            url: config.url.clone(),
            min_interval_ms: u64::from(config.min_interval_s) * 1000,
            last_send_ms: None,
        }
    }

    /// Store the API key and bring the WiFi link up
    ///
    /// An empty key, or one longer than [`MAX_API_KEY_LEN`], leaves the
    /// client without a key and returns [`TelemetryError::MissingApiKey`].
    pub async fn setup<W, D>(
        &mut self,
        api_key: &str,
        wifi: &mut W,
        delay: &mut D,
        ssid: &str,
        password: &str,
    ) -> Result<(), TelemetryError<H::Error>>
    where
        W: WifiStation,
        D: DelayNs,
    {
        self.api_key = match String::try_from(api_key) {
            Ok(key) if !key.is_empty() => key,
            _ => {
                self.api_key.clear();
                return Err(TelemetryError::MissingApiKey);
            }
        };
        self.connect_wifi(wifi, delay, ssid, password).await
    }

    /// Join `ssid` unless already connected
    ///
    /// Polls the link [`WIFI_POLL_ATTEMPTS`] times, one second apart.
    pub async fn connect_wifi<W, D>(
        &mut self,
        wifi: &mut W,
        delay: &mut D,
        ssid: &str,
        password: &str,
    ) -> Result<(), TelemetryError<H::Error>>
    where
        W: WifiStation,
        D: DelayNs,
    {
        if wifi.is_connected() {
            return Ok(());
        }

        wifi.join(ssid, password)
            .await
            .map_err(|_| TelemetryError::WifiUnavailable)?;

        for _ in 0..WIFI_POLL_ATTEMPTS {
            if wifi.is_connected() {
                return Ok(());
            }
            delay.delay_ms(WIFI_POLL_INTERVAL_MS).await;
        }
        Err(TelemetryError::WifiUnavailable)
    }

    /// Post one update
    ///
    /// `fields` fill `field1` to `field8` in order; extra entries are
    /// dropped. `now_ms` is any monotonic millisecond clock. Only a 200
    /// response counts as sent and starts the next rate-limit window.
    pub async fn send_data(
        &mut self,
        now_ms: u64,
        fields: &[(&str, f32)],
    ) -> Result<(), TelemetryError<H::Error>> {
        if self.api_key.is_empty() {
            return Err(TelemetryError::MissingApiKey);
        }

        if let Some(remaining_ms) = self.remaining_ms(now_ms) {
            return Err(TelemetryError::TooSoon { remaining_ms });
        }

        let body = self.encode(fields)?;
        let status = self
            .http
            .post(&self.url, &body, &JSON_HEADERS)
            .await
            .map_err(TelemetryError::Transport)?;

        if status != 200 {
            return Err(TelemetryError::Status(status));
        }

        self.last_send_ms = Some(now_ms);
        Ok(())
    }

    /// Time left in the current rate-limit window, if any
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        let last = self.last_send_ms?;
        let elapsed = now_ms.saturating_sub(last);
        (elapsed < self.min_interval_ms).then(|| self.min_interval_ms - elapsed)
    }

    fn encode(&self, fields: &[(&str, f32)]) -> Result<Vec<u8>, TelemetryError<H::Error>> {
        serde_json::to_vec(&UpdateRequest::new(&self.api_key, fields))
            .map_err(|_| TelemetryError::Encode)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn last_send_ms(&self) -> Option<u64> {
        self.last_send_ms
    }
}
