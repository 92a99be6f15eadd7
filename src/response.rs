//! Native mutable HTTP response.

use std::fs::File;
use std::io::{self, Read};

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, StatusCode};

use crate::error::{Error, Result};

/// Response body: buffered in memory or streamed from an open file handle.
#[derive(Debug)]
pub enum NativeBody {
    /// Complete body held in memory.
    Buffered(Bytes),
    /// Open file handle streamed out without buffering.
    Stream(File),
}

impl NativeBody {
    /// Whether this body is stream-backed.
    #[inline]
    pub fn is_stream(&self) -> bool {
        matches!(self, NativeBody::Stream(_))
    }
}

/// Mutable HTTP response.
///
/// Note: Clone is intentionally not derived, a stream-backed body owns its
/// file handle.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: NativeBody,
}

impl Response {
    /// Create a new response builder.
    #[inline]
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::new()
    }

    /// Create a 200 OK response with body.
    #[inline]
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: NativeBody::Buffered(body.into()),
        }
    }

    /// Create an empty buffered response with the given status.
    #[inline]
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: NativeBody::Buffered(Bytes::new()),
        }
    }

    /// Parse a raw HTTP message into a response.
    ///
    /// Accepts `"HTTP/<ver> <code> <reason>\r\n<headers>\r\n\r\n<body>"`.
    /// Header lines are split at the first `':'`; bare-`\n` line endings are
    /// tolerated. The reason phrase is not retained, it is derived from the
    /// status code on the way back out.
    pub fn from_raw(raw: &[u8]) -> Result<Self> {
        let (head, payload) = split_head(raw);
        let head = std::str::from_utf8(head)
            .map_err(|_| Error::MalformedMessage("message head is not valid UTF-8".to_string()))?;

        let mut lines = head.lines();
        let status_line = lines
            .next()
            .ok_or_else(|| Error::MalformedMessage("empty message".to_string()))?;
        let status = parse_status_line(status_line)?;

        let mut headers = HeaderMap::new();
        for line in lines {
            if line.is_empty() {
                continue;
            }
            let (name, value) = line.split_once(':').ok_or_else(|| {
                Error::MalformedMessage(format!("header line without ':': {:?}", line))
            })?;
            let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|_| {
                Error::MalformedMessage(format!("invalid header name: {:?}", name))
            })?;
            let value = HeaderValue::from_bytes(value.trim().as_bytes()).map_err(|_| {
                Error::MalformedMessage(format!("invalid header value: {:?}", value))
            })?;
            headers.append(name, value);
        }

        Ok(Self {
            status,
            headers,
            body: NativeBody::Buffered(Bytes::copy_from_slice(payload)),
        })
    }

    // Getters

    /// Get the status code.
    #[inline]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the headers.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get a mutable reference to headers.
    #[inline]
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Consume the response, returning its headers.
    #[inline]
    pub fn into_headers(self) -> HeaderMap {
        self.headers
    }

    /// Get a header value by name (case-insensitive).
    #[inline]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get the response body.
    #[inline]
    pub fn body(&self) -> &NativeBody {
        &self.body
    }

    // Modifiers

    /// Set the status code.
    #[inline]
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Replace the headers collection.
    #[inline]
    pub fn set_headers(&mut self, headers: HeaderMap) {
        self.headers = headers;
    }

    /// Append a header by string name and value. Invalid names or values are
    /// silently skipped.
    #[inline]
    pub fn append_header(&mut self, name: impl AsRef<str>, value: impl AsRef<str>) {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.append(name, value);
        }
    }

    /// Set a buffered body.
    #[inline]
    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = NativeBody::Buffered(body.into());
    }

    /// Bind an open file handle as the body stream.
    ///
    /// The handle is owned by the response from here on; it is never closed
    /// early by the conversion layer.
    #[inline]
    pub fn set_stream(&mut self, file: File) {
        self.body = NativeBody::Stream(file);
    }

    /// Read the entire body to completion.
    ///
    /// Buffered bodies are a cheap clone; stream-backed bodies are drained
    /// from the current file position.
    pub fn read_body(&mut self) -> io::Result<Bytes> {
        match &mut self.body {
            NativeBody::Buffered(bytes) => Ok(bytes.clone()),
            NativeBody::Stream(file) => {
                let mut buf = Vec::new();
                file.read_to_end(&mut buf)?;
                Ok(Bytes::from(buf))
            }
        }
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::empty(StatusCode::OK)
    }
}

/// Split a raw message into head and body at the first blank line,
/// whichever terminator form comes first.
fn split_head(raw: &[u8]) -> (&[u8], &[u8]) {
    match (find(raw, b"\r\n\r\n"), find(raw, b"\n\n")) {
        (Some(crlf), Some(lf)) if lf < crlf => (&raw[..lf], &raw[lf + 2..]),
        (Some(crlf), _) => (&raw[..crlf], &raw[crlf + 4..]),
        (None, Some(lf)) => (&raw[..lf], &raw[lf + 2..]),
        (None, None) => (raw, &[][..]),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Parse `"HTTP/<ver> <code> <reason>"` into a status code.
fn parse_status_line(line: &str) -> Result<StatusCode> {
    let mut parts = line.splitn(3, ' ');

    let proto = parts.next().unwrap_or("");
    if !proto.starts_with("HTTP/") {
        return Err(Error::MalformedMessage(format!(
            "bad status line: {:?}",
            line
        )));
    }

    let code = parts
        .next()
        .ok_or_else(|| Error::MalformedMessage(format!("status line without code: {:?}", line)))?;
    let code = code
        .parse::<u16>()
        .map_err(|_| Error::MalformedMessage(format!("invalid status code: {:?}", code)))?;

    StatusCode::from_u16(code)
        .map_err(|_| Error::MalformedMessage(format!("status code out of range: {}", code)))
}

/// Builder for creating responses.
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Option<HeaderMap>, // Lazy allocation
    body: Bytes,
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseBuilder {
    /// Create a new response builder.
    #[inline]
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: None,
            body: Bytes::new(),
        }
    }

    /// Set the status code.
    #[inline]
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Add header by strings. Invalid names or values are silently skipped.
    #[inline]
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers
                .get_or_insert_with(HeaderMap::new)
                .append(name, value);
        }
        self
    }

    /// Set the body.
    #[inline]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Build the response.
    #[inline]
    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers.unwrap_or_default(),
            body: NativeBody::Buffered(self.body),
        }
    }
}
