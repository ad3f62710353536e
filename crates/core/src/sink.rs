//! Append-only output sink.

use std::io::{self, Write};

/// Byte-at-a-time writer that remembers how much it has produced.
///
/// Writes go straight to the wrapped writer; wrap files in a `BufWriter`.
pub(crate) struct Sink<W> {
    inner: W,
    written: u64,
    last: Option<u8>,
}

impl<W: Write> Sink<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self {
            inner,
            written: 0,
            last: None,
        }
    }

    pub(crate) fn put(&mut self, byte: u8) -> io::Result<()> {
        self.inner.write_all(&[byte])?;
        self.written += 1;
        self.last = Some(byte);
        Ok(())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// The most recently written byte, `None` before the first write.
    pub(crate) fn last(&self) -> Option<u8> {
        self.last
    }

    pub(crate) fn written(&self) -> u64 {
        self.written
    }
}
