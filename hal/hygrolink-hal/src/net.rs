//! Network abstractions
//!
//! The station only needs two things from the network: joining an access
//! point and POSTing a small body to a URL. Board crates implement these
//! over their radio and IP stack.

/// Station-mode WiFi interface
#[allow(async_fn_in_trait)]
pub trait WifiStation {
    /// Error type for association failures
    type Error;

    /// Start associating with an access point
    ///
    /// An empty `password` joins an open network. Returning `Ok` means the
    /// radio accepted the request; use [`is_connected`](Self::is_connected)
    /// to know when the link is usable.
    async fn join(&mut self, ssid: &str, password: &str) -> Result<(), Self::Error>;

    /// Check if the link is up and has an address
    fn is_connected(&self) -> bool;
}

/// HTTP client able to issue a single POST request
#[allow(async_fn_in_trait)]
pub trait HttpClient {
    /// Error type for connection or transfer failures
    type Error;

    /// POST `body` to `url` with extra `headers`
    ///
    /// Returns the response status code. A non-2xx status is not an error
    /// at this level.
    async fn post(
        &mut self,
        url: &str,
        body: &[u8],
        headers: &[(&str, &str)],
    ) -> Result<u16, Self::Error>;
}
