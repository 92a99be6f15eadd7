//! Conversions between message-form and native responses.
//!
//! The message form is an immutable `http::Response<Body>`; the native form
//! is the mutable [`Response`] used by framework handlers. Conversions are
//! synchronous and stateless: each call reads one representation and builds
//! the other, with no state shared between calls. The only external effect
//! is opening a file handle on the file-backed path of [`to_native`].

use std::fs::File;
use std::io::Write;

use http::header::{GetAll, HeaderValue};
use http::{HeaderMap, StatusCode, Version};

use crate::body::{Body, Storage};
use crate::error::{Error, Result};
use crate::response::Response;

/// Convert a message-form response into the native mutable form.
///
/// Temp-backed bodies are cheap to buffer, so the whole response is
/// serialized into a raw HTTP message and handed to [`Response::from_raw`],
/// keeping the native parser the single source of truth for line handling.
/// File-backed bodies may be large and are never buffered: status and
/// headers are copied structurally and the file is opened and bound as a
/// stream. Failure to open the file surfaces [`Error::FileOpen`] with no
/// retry or fallback.
///
/// Multi-valued headers are joined with `", "` on the serialize path and
/// `"; "` on the stream path. The asymmetry is long-standing observable
/// behavior and is preserved.
pub fn to_native(source: &http::Response<Body>) -> Result<Response> {
    match source.body().storage() {
        Storage::Temp => {
            tracing::debug!(status = %source.status(), "serializing temp-backed response");

            let payload = source.body().contents()?;

            let mut raw = Vec::with_capacity(64 + payload.len());
            raw.extend_from_slice(b"HTTP/");
            raw.extend_from_slice(version_str(source.version()).as_bytes());
            raw.push(b' ');
            raw.extend_from_slice(source.status().as_str().as_bytes());
            raw.push(b' ');
            raw.extend_from_slice(reason_phrase(source.status()).as_bytes());
            raw.extend_from_slice(b"\r\n");
            raw.extend_from_slice(format_header_block(source.headers()).as_bytes());
            raw.extend_from_slice(b"\r\n");
            raw.extend_from_slice(&payload);

            Response::from_raw(&raw)
        }
        Storage::File(path) => {
            tracing::debug!(path = %path.display(), "streaming file-backed response");

            let mut native = Response::empty(source.status());

            let mut headers = HeaderMap::new();
            for name in source.headers().keys() {
                let joined = join_values(source.headers().get_all(name), "; ");
                if let Ok(value) = HeaderValue::try_from(joined) {
                    headers.append(name.clone(), value);
                }
            }
            native.set_headers(headers);

            let file = File::open(path).map_err(|err| {
                tracing::error!(path = %path.display(), error = %err, "failed to open file-backed body");
                Error::FileOpen {
                    path: path.to_path_buf(),
                    source: err,
                }
            })?;
            native.set_stream(file);

            Ok(native)
        }
    }
}

/// Convert a native response back into the message form.
///
/// The native body is drained to completion into a fresh temp buffer, so
/// the result is always temp-backed and shares nothing with the input.
/// Draining a stream-backed body can fail, which surfaces as [`Error::Io`].
pub fn from_native(mut native: Response) -> Result<http::Response<Body>> {
    let status = native.status();
    let payload = native.read_body()?;

    let mut body = Body::temp();
    body.write_all(&payload)?;

    let mut message = http::Response::new(body);
    *message.status_mut() = status;
    *message.headers_mut() = native.into_headers();

    Ok(message)
}

/// Former name of [`to_native`].
#[deprecated(since = "0.2.0", note = "renamed to `to_native`")]
pub fn to_server(source: &http::Response<Body>) -> Result<Response> {
    to_native(source)
}

/// Former name of [`from_native`].
#[deprecated(since = "0.2.0", note = "renamed to `from_native`")]
pub fn from_server(native: Response) -> Result<http::Response<Body>> {
    from_native(native)
}

/// Render the header block for a serialized message: one `"name: v1, v2"`
/// line per header name, in map iteration order.
fn format_header_block(headers: &HeaderMap) -> String {
    let mut block = String::new();
    for name in headers.keys() {
        block.push_str(name.as_str());
        block.push_str(": ");
        block.push_str(&join_values(headers.get_all(name), ", "));
        block.push_str("\r\n");
    }
    block
}

/// Join every value under one header name with `sep`. Values that are not
/// valid UTF-8 are converted lossily.
fn join_values(values: GetAll<'_, HeaderValue>, sep: &str) -> String {
    let mut out = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        match value.to_str() {
            Ok(s) => out.push_str(s),
            Err(_) => out.push_str(&String::from_utf8_lossy(value.as_bytes())),
        }
    }
    out
}

/// Protocol version as it appears in a status line.
fn version_str(version: Version) -> &'static str {
    if version == Version::HTTP_09 {
        "0.9"
    } else if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2.0"
    } else if version == Version::HTTP_3 {
        "3.0"
    } else {
        "1.1"
    }
}

/// Canonical reason phrase, empty for codes that have none.
fn reason_phrase(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("")
}
