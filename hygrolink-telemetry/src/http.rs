//! Minimal HTTP/1.1 request framing
//!
//! Just enough to POST a small body over a raw TCP socket and read back the
//! status code. No TLS, no chunked encoding, no redirects.

use core::fmt::{self, Write};

/// HTTP framing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HttpError {
    /// Only `http://` is supported
    UnsupportedScheme,
    /// Missing host or bad port
    InvalidUrl,
    /// Request head does not fit the buffer
    BufferTooSmall,
    /// Status line could not be parsed
    MalformedResponse,
}

/// Parsed `http://host[:port]/path` URL, borrowing from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Url<'a> {
    pub host: &'a str,
    pub port: u16,
    pub path: &'a str,
}

impl<'a> Url<'a> {
    pub const DEFAULT_PORT: u16 = 80;

    pub fn parse(url: &'a str) -> Result<Self, HttpError> {
        let rest = match url.split_once("://") {
            Some(("http", rest)) => rest,
            Some(_) => return Err(HttpError::UnsupportedScheme),
            None => return Err(HttpError::InvalidUrl),
        };

        let (authority, path) = match rest.find('/') {
            Some(slash) => (&rest[..slash], &rest[slash..]),
            None => (rest, "/"),
        };

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => (
                host,
                port.parse::<u16>().map_err(|_| HttpError::InvalidUrl)?,
            ),
            None => (authority, Self::DEFAULT_PORT),
        };

        if host.is_empty() || port == 0 {
            return Err(HttpError::InvalidUrl);
        }

        Ok(Self { host, port, path })
    }
}

/// `fmt::Write` over a fixed byte slice
struct SliceWriter<'b> {
    buf: &'b mut [u8],
    len: usize,
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        if end > self.buf.len() {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

/// Write a POST request head for a body of `content_length` bytes
///
/// `headers` are emitted in order after `Host`. Returns the number of bytes
/// written; the body goes right after.
pub fn write_request_head(
    buf: &mut [u8],
    url: &Url<'_>,
    headers: &[(&str, &str)],
    content_length: usize,
) -> Result<usize, HttpError> {
    let mut w = SliceWriter { buf, len: 0 };
    write_head(&mut w, url, headers, content_length).map_err(|_| HttpError::BufferTooSmall)?;
    Ok(w.len)
}

fn write_head(
    w: &mut SliceWriter<'_>,
    url: &Url<'_>,
    headers: &[(&str, &str)],
    content_length: usize,
) -> fmt::Result {
    write!(w, "POST {} HTTP/1.1\r\n", url.path)?;
    if url.port == Url::DEFAULT_PORT {
        write!(w, "Host: {}\r\n", url.host)?;
    } else {
        write!(w, "Host: {}:{}\r\n", url.host, url.port)?;
    }
    for (name, value) in headers {
        write!(w, "{}: {}\r\n", name, value)?;
    }
    write!(w, "Content-Length: {}\r\n", content_length)?;
    w.write_str("Connection: close\r\n\r\n")
}

/// Position of the first `\r\n`, if any
pub fn find_line_end(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|pair| pair == b"\r\n")
}

/// Parse the status code out of `HTTP/1.x NNN Reason`
///
/// A trailing `\r\n` is allowed.
pub fn parse_status_line(line: &[u8]) -> Result<u16, HttpError> {
    let line = core::str::from_utf8(line).map_err(|_| HttpError::MalformedResponse)?;
    let mut parts = line.trim_end().splitn(3, ' ');

    let version = parts.next().unwrap_or_default();
    if !version.starts_with("HTTP/1.") {
        return Err(HttpError::MalformedResponse);
    }

    let code = parts.next().ok_or(HttpError::MalformedResponse)?;
    if code.len() != 3 {
        return Err(HttpError::MalformedResponse);
    }
    code.parse().map_err(|_| HttpError::MalformedResponse)
}
