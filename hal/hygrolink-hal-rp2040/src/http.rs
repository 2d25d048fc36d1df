//! Plain HTTP client over an embassy-net TCP socket
//!
//! One connection per request, closed after the status line is read.

use core::net::Ipv4Addr;

use embassy_net::dns::DnsQueryType;
use embassy_net::tcp::TcpSocket;
use embassy_net::{IpAddress, Stack};
use embassy_time::Duration;
use embedded_io_async::{Read, Write};
use hygrolink_hal::HttpClient;
use hygrolink_telemetry::http::{find_line_end, parse_status_line, write_request_head};
use hygrolink_telemetry::{HttpError, Url};

/// Socket buffer size, each direction
pub const SOCKET_BUF_LEN: usize = 1024;

/// Request head and status line buffer
pub const HEAD_BUF_LEN: usize = 256;

/// Connect, send and receive timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TcpHttpError {
    /// Bad URL, oversized head, or unreadable response
    Http(HttpError),
    /// Host did not resolve
    Dns,
    /// TCP connect failed
    Connect,
    /// Socket read or write failed
    Io,
    /// Server closed before sending a status line
    NoResponse,
}

impl From<HttpError> for TcpHttpError {
    fn from(e: HttpError) -> Self {
        Self::Http(e)
    }
}

/// HTTP/1.1 POST client owning its socket buffers
pub struct TcpHttpClient<'a> {
    stack: Stack<'a>,
    rx: [u8; SOCKET_BUF_LEN],
    tx: [u8; SOCKET_BUF_LEN],
    head: [u8; HEAD_BUF_LEN],
}

impl<'a> TcpHttpClient<'a> {
    pub fn new(stack: Stack<'a>) -> Self {
        Self {
            stack,
            rx: [0; SOCKET_BUF_LEN],
            tx: [0; SOCKET_BUF_LEN],
            head: [0; HEAD_BUF_LEN],
        }
    }

    async fn resolve(&self, host: &str) -> Result<IpAddress, TcpHttpError> {
        if let Ok(ip) = host.parse::<Ipv4Addr>() {
            return Ok(IpAddress::Ipv4(ip));
        }
        let addrs = self
            .stack
            .dns_query(host, DnsQueryType::A)
            .await
            .map_err(|_| TcpHttpError::Dns)?;
        addrs.first().copied().ok_or(TcpHttpError::Dns)
    }
}

impl HttpClient for TcpHttpClient<'_> {
    type Error = TcpHttpError;

    async fn post(
        &mut self,
        url: &str,
        body: &[u8],
        headers: &[(&str, &str)],
    ) -> Result<u16, TcpHttpError> {
        let url = Url::parse(url)?;
        let addr = self.resolve(url.host).await?;
        let head_len = write_request_head(&mut self.head, &url, headers, body.len())?;

        let mut socket = TcpSocket::new(self.stack, &mut self.rx, &mut self.tx);
        socket.set_timeout(Some(REQUEST_TIMEOUT));
        socket
            .connect((addr, url.port))
            .await
            .map_err(|_| TcpHttpError::Connect)?;

        socket
            .write_all(&self.head[..head_len])
            .await
            .map_err(|_| TcpHttpError::Io)?;
        socket.write_all(body).await.map_err(|_| TcpHttpError::Io)?;
        socket.flush().await.map_err(|_| TcpHttpError::Io)?;

        // Reuse the head buffer for the status line
        let mut filled = 0;
        let status = loop {
            if let Some(end) = find_line_end(&self.head[..filled]) {
                break parse_status_line(&self.head[..end]).map_err(TcpHttpError::from);
            }
            if filled == self.head.len() {
                break Err(HttpError::MalformedResponse.into());
            }
            match socket.read(&mut self.head[filled..]).await {
                Ok(0) => break Err(TcpHttpError::NoResponse),
                Ok(n) => filled += n,
                Err(_) => break Err(TcpHttpError::Io),
            }
        };

        socket.close();
        status
    }
}
