//! In-memory stream with injectable failures

use super::ReadStream;
use crate::error::{PreviewError, Result};

/// In-memory [`ReadStream`] used for tests and for previewing owned buffers.
///
/// Reads can be capped to simulate providers that return short chunks, and a
/// failure can be injected at a chosen read call.
#[derive(Debug, Clone)]
pub struct MemoryStream {
    data: Vec<u8>,
    pos: usize,
    max_chunk: Option<usize>,
    failure: Option<(usize, String)>,
    reads: usize,
}

impl MemoryStream {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
            max_chunk: None,
            failure: None,
            reads: 0,
        }
    }

    /// A stream whose very first read fails
    pub fn failing(msg: impl Into<String>) -> Self {
        Self::new(Vec::new()).fail_on_read(0, msg)
    }

    /// Never hand out more than `n` bytes per read call
    pub fn with_max_chunk(mut self, n: usize) -> Self {
        self.max_chunk = Some(n.max(1));
        self
    }

    /// Fail the read call with zero-based index `index`
    pub fn fail_on_read(mut self, index: usize, msg: impl Into<String>) -> Self {
        self.failure = Some((index, msg.into()));
        self
    }

    /// Number of read calls made so far, failed ones included
    pub fn read_calls(&self) -> usize {
        self.reads
    }
}

impl ReadStream for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let call = self.reads;
        self.reads += 1;

        if let Some((index, msg)) = &self.failure {
            if *index == call {
                return Err(PreviewError::stream(msg.clone()));
            }
        }

        let remaining = &self.data[self.pos..];
        let mut n = remaining.len().min(buf.len());
        if let Some(max) = self.max_chunk {
            n = n.min(max);
        }
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Ok(n)
    }
}
