//! Message body streams.
//!
//! A [`Body`] is either a temporary in-memory read/write buffer or a
//! reference to a file on disk. The conversion layer dispatches on
//! [`Body::storage`]: temp-backed bodies are cheap to read in full, while
//! file-backed bodies are passed through as streams and never buffered.

use std::fs;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;

/// Identifies the storage backing a [`Body`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage<'a> {
    /// Temporary in-memory buffer, safe to read in full.
    Temp,
    /// A file on disk.
    File(&'a Path),
}

/// Message body: a seekable in-memory buffer or a reference to a file.
#[derive(Debug)]
pub struct Body {
    kind: BodyKind,
}

#[derive(Debug)]
enum BodyKind {
    Temp(Cursor<Vec<u8>>),
    File(PathBuf),
}

impl Body {
    /// Create an empty in-memory read/write buffer.
    #[inline]
    pub fn temp() -> Self {
        Self {
            kind: BodyKind::Temp(Cursor::new(Vec::new())),
        }
    }

    /// Create an in-memory buffer pre-filled with `data`, positioned at the start.
    #[inline]
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: BodyKind::Temp(Cursor::new(data.into())),
        }
    }

    /// Reference a file on disk. The file is not opened or checked here.
    #[inline]
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: BodyKind::File(path.into()),
        }
    }

    /// The storage backing this body.
    #[inline]
    pub fn storage(&self) -> Storage<'_> {
        match &self.kind {
            BodyKind::Temp(_) => Storage::Temp,
            BodyKind::File(path) => Storage::File(path),
        }
    }

    /// Read the body to completion, regardless of the current cursor position.
    ///
    /// File-backed bodies are read from disk.
    pub fn contents(&self) -> io::Result<Bytes> {
        match &self.kind {
            BodyKind::Temp(buf) => Ok(Bytes::copy_from_slice(buf.get_ref())),
            BodyKind::File(path) => Ok(Bytes::from(fs::read(path)?)),
        }
    }

    /// Total size of the body in bytes.
    ///
    /// File-backed bodies report their on-disk size.
    pub fn len(&self) -> io::Result<u64> {
        match &self.kind {
            BodyKind::Temp(buf) => Ok(buf.get_ref().len() as u64),
            BodyKind::File(path) => Ok(fs::metadata(path)?.len()),
        }
    }

    /// Whether the body holds no bytes.
    pub fn is_empty(&self) -> io::Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl Write for Body {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.kind {
            BodyKind::Temp(cursor) => cursor.write(buf),
            BodyKind::File(_) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "file-backed body is read-only",
            )),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.kind {
            BodyKind::Temp(cursor) => cursor.read(buf),
            BodyKind::File(_) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "file-backed body must be opened to be read",
            )),
        }
    }
}

impl Seek for Body {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match &mut self.kind {
            BodyKind::Temp(cursor) => cursor.seek(pos),
            BodyKind::File(_) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "file-backed body is not seekable in place",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_body_write_and_contents() {
        let mut body = Body::temp();
        body.write_all(b"hello").unwrap();

        // Cursor sits at the end after the write; contents() ignores it.
        assert_eq!(body.contents().unwrap().as_ref(), b"hello");
        assert_eq!(body.len().unwrap(), 5);
        assert!(!body.is_empty().unwrap());
    }

    #[test]
    fn test_temp_body_read_after_rewind() {
        let mut body = Body::from_bytes(b"abc".to_vec());
        let mut out = Vec::new();
        body.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"abc");

        body.seek(SeekFrom::Start(1)).unwrap();
        let mut out = Vec::new();
        body.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"bc");
    }

    #[test]
    fn test_storage_identifiers() {
        let temp = Body::temp();
        assert_eq!(temp.storage(), Storage::Temp);

        let file = Body::from_file("/tmp/payload.bin");
        assert_eq!(file.storage(), Storage::File(Path::new("/tmp/payload.bin")));
    }

    #[test]
    fn test_file_body_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.txt");
        fs::write(&path, b"data").unwrap();

        let body = Body::from_file(&path);
        assert_eq!(body.contents().unwrap().as_ref(), b"data");
        assert_eq!(body.len().unwrap(), 4);
    }

    #[test]
    fn test_file_body_rejects_writes() {
        let mut body = Body::from_file("/tmp/whatever");
        let err = body.write(b"x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }

    #[test]
    fn test_missing_file_contents_errors() {
        let body = Body::from_file("/nonexistent/path/f.txt");
        assert!(body.contents().is_err());
    }
}
