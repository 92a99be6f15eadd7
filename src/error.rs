//! Conversion error types.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors surfaced by the response conversions.
#[derive(Debug)]
pub enum Error {
    /// Raw HTTP message text failed to parse.
    MalformedMessage(String),

    /// A file-backed body could not be opened.
    FileOpen {
        path: PathBuf,
        source: io::Error,
    },

    /// I/O error while reading or writing a body stream.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedMessage(msg) => write!(f, "malformed message: {}", msg),
            Error::FileOpen { path, source } => {
                write!(f, "failed to open {}: {}", path.display(), source)
            }
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FileOpen { source, .. } => Some(source),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MalformedMessage("header line without ':'".to_string());
        assert_eq!(err.to_string(), "malformed message: header line without ':'");

        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err = Error::FileOpen {
            path: PathBuf::from("/tmp/missing"),
            source: io_err,
        };
        assert_eq!(err.to_string(), "failed to open /tmp/missing: no such file");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();

        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error as _;

        let err = Error::FileOpen {
            path: PathBuf::from("/tmp/f"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());

        let err = Error::MalformedMessage("bad".to_string());
        assert!(err.source().is_none());
    }
}
