//! CYW43 station-mode WiFi

use cyw43::{Control, ControlError, JoinOptions};
use embassy_net::Stack;
use hygrolink_hal::WifiStation;

/// Pico W radio plus the IP stack running on it
pub struct Cyw43Station<'a> {
    control: Control<'a>,
    stack: Stack<'a>,
}

impl<'a> Cyw43Station<'a> {
    pub fn new(control: Control<'a>, stack: Stack<'a>) -> Self {
        Self { control, stack }
    }

    pub fn stack(&self) -> Stack<'a> {
        self.stack
    }
}

impl WifiStation for Cyw43Station<'_> {
    type Error = ControlError;

    async fn join(&mut self, ssid: &str, password: &str) -> Result<(), ControlError> {
        let options = if password.is_empty() {
            JoinOptions::new_open()
        } else {
            JoinOptions::new(password.as_bytes())
        };
        self.control.join(ssid, options).await
    }

    /// Link up and DHCP lease held
    fn is_connected(&self) -> bool {
        self.stack.is_link_up() && self.stack.config_v4().is_some()
    }
}
