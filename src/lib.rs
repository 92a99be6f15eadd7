//! response-bridge - Conversions between two HTTP response representations.
//!
//! This crate converts between the immutable message form of a response
//! (`http::Response<Body>`, the shape hyper-side code works with) and the
//! mutable native [`Response`] type framework handlers build up
//! incrementally.
//!
//! # Conversions
//!
//! - [`to_native`] - message form to native form. Temp-backed bodies are
//!   serialized and re-parsed through the native message parser; file-backed
//!   bodies are passed through as an open stream without buffering.
//! - [`from_native`] - native form back to message form. The body is always
//!   drained into a fresh in-memory buffer.
//!
//! Both directions are synchronous and stateless; calls are independent and
//! safe to issue from multiple threads on distinct inputs.
//!
//! # Example
//!
//! ```rust,ignore
//! use response_bridge::{from_native, to_native, Body};
//!
//! let source: http::Response<Body> = build_message_response()?;
//! let native = to_native(&source)?;
//! let message = from_native(native)?;
//! ```

/// Package version from Cargo.toml
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod body;
pub mod bridge;
pub mod error;
pub mod response;

// Re-exports for convenience
pub use body::{Body, Storage};
pub use bridge::{from_native, to_native};
pub use error::{Error, Result};
pub use response::{NativeBody, Response, ResponseBuilder};
