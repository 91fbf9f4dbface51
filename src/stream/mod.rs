//! Pull-based stream reading
//!
//! A preview source hands the control an opaque stream. The caller supplies
//! a buffer, the provider fills part of it and reports how many bytes it
//! wrote. A zero-length read marks the end of the stream.

pub mod memory;

pub use memory::MemoryStream;

use crate::error::{PreviewError, Result};

/// Default number of bytes requested per read call
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Sequential pull-read byte source
pub trait ReadStream {
    /// Read up to `buf.len()` bytes into `buf`, returning the count written.
    ///
    /// Returning `Ok(0)` signals end-of-stream.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;
}

impl<S: ReadStream + ?Sized> ReadStream for &mut S {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).read(buf)
    }
}

impl<S: ReadStream + ?Sized> ReadStream for Box<S> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).read(buf)
    }
}

/// Adapter exposing any `std::io::Read` as a [`ReadStream`]
pub struct IoStream<R> {
    inner: R,
}

impl<R: std::io::Read> IoStream<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: std::io::Read> ReadStream for IoStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        // Interrupted is not retried here; any failure ends the read
        Ok(self.inner.read(buf)?)
    }
}

/// Bounds applied while draining a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadLimits {
    /// Bytes requested per read call
    pub chunk_size: usize,
    /// Total size cap (None = unlimited)
    pub max_bytes: Option<usize>,
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_bytes: None,
        }
    }
}

/// Drain `stream` into a single buffer.
///
/// Fails fast: the first error from the provider is returned as-is and the
/// partially read data is dropped.
pub fn read_all<S: ReadStream + ?Sized>(stream: &mut S, limits: ReadLimits) -> Result<Vec<u8>> {
    let mut chunk = vec![0u8; limits.chunk_size.max(1)];
    let mut buffer = Vec::new();

    loop {
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        if n > chunk.len() {
            return Err(PreviewError::stream(format!(
                "provider reported {} bytes read into a {} byte buffer",
                n,
                chunk.len()
            )));
        }
        if let Some(limit) = limits.max_bytes {
            if buffer.len() + n > limit {
                return Err(PreviewError::too_large(limit));
            }
        }
        buffer.extend_from_slice(&chunk[..n]);
    }

    log::debug!("stream drained: {} bytes", buffer.len());
    Ok(buffer)
}
