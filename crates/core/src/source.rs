//! Effective-character source.
//!
//! Raw bytes are normalized on the way in: `\r` becomes `\n`, every other control byte
//! below space becomes `' '`. End of input is `None`, never a byte value.
//!
//! [`CharSource::peek`] provides one character of pushback; at most one character is ever
//! pending.

use std::io::{self, BufRead, Bytes};

/// Forward-only reader of effective characters with one character of lookahead.
pub(crate) struct CharSource<R> {
    bytes: Bytes<R>,
    /// `Some(c)` when a character has been peeked but not fetched (`c` may be EOF).
    lookahead: Option<Option<u8>>,
    consumed: u64,
}

impl<R: BufRead> CharSource<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            bytes: reader.bytes(),
            lookahead: None,
            consumed: 0,
        }
    }

    /// Consume and return the next effective character.
    pub(crate) fn fetch(&mut self) -> io::Result<Option<u8>> {
        if let Some(c) = self.lookahead.take() {
            return Ok(c);
        }

        let raw = self.bytes.next().transpose()?;
        if raw.is_some() {
            self.consumed += 1;
        }
        Ok(raw.map(normalize))
    }

    /// Return the next effective character without consuming it.
    ///
    /// Repeated calls without an intervening [`fetch`](Self::fetch) return the same value.
    pub(crate) fn peek(&mut self) -> io::Result<Option<u8>> {
        if let Some(c) = self.lookahead {
            return Ok(c);
        }

        let c = self.fetch()?;
        self.lookahead = Some(c);
        Ok(c)
    }

    /// Number of raw input bytes pulled from the reader so far.
    pub(crate) fn consumed(&self) -> u64 {
        self.consumed
    }
}

/// Map a raw byte to its effective character.
pub(crate) fn normalize(byte: u8) -> u8 {
    match byte {
        b'\n' | b'\r' => b'\n',
        0..b' ' => b' ',
        _ => byte,
    }
}

/// Identifier-like bytes: letters, digits, `_`, `$`, `\` and anything above `~`.
///
/// EOF is never alphanumeric.
pub(crate) fn is_alphanum(c: Option<u8>) -> bool {
    matches!(
        c,
        Some(b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'$' | b'\\' | 127..=u8::MAX)
    )
}
