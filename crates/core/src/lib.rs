//! Streaming minifier for JavaScript-like scripts.
//!
//! This crate removes comments and insignificant whitespace in a single forward pass over the
//! input bytes. It does not parse: it only classifies enough characters to find comment,
//! string, template and regex literal boundaries, and keeps literals byte-for-byte.
//!
//! Entry points:
//!
//! - [`minify`] streams from any [`BufRead`] into any [`Write`].
//! - [`minify_bytes`] and [`minify_str`] work on in-memory buffers.
//! - [`Minifier`] is the underlying owned automaton.
//!
//! Internals:
//!
//! - `source` normalizes raw bytes into effective characters with one byte of lookahead.
//! - `comment` collapses line and block comments.
//! - `literal` copies quoted and regex literals.
//! - `minify` holds the separator rule table and the automaton loop.

use std::io::{BufRead, Write};

mod comment;
mod literal;
mod minify;
mod sink;
mod source;

pub use crate::minify::{Minifier, Summary};

/// Errors that abort a minification run.
#[derive(thiserror::Error, Debug)]
pub enum MinifyError {
    #[error("unterminated comment")]
    UnterminatedComment,

    #[error("unterminated string literal")]
    UnterminatedStringLiteral,

    #[error("unterminated character class in regex")]
    UnterminatedCharacterClass,

    #[error("unterminated regex literal")]
    UnterminatedRegexLiteral,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Minify everything `reader` yields into `writer`.
///
/// The writer is not flushed; pass `&mut writer` to keep ownership and flush afterwards.
pub fn minify<R: BufRead, W: Write>(reader: R, writer: W) -> Result<Summary, MinifyError> {
    Minifier::new(reader, writer).run()
}

/// Minify an in-memory buffer.
pub fn minify_bytes(source: &[u8]) -> Result<Vec<u8>, MinifyError> {
    let mut out = Vec::with_capacity(source.len());
    minify(source, &mut out)?;
    Ok(out)
}

/// Minify UTF-8 source text.
///
/// Bytes at or above 0x80 are never dropped or reordered, so the output stays UTF-8.
pub fn minify_str(source: &str) -> Result<String, MinifyError> {
    let out = minify_bytes(source.as_bytes())?;
    Ok(String::from_utf8(out).expect("output must be utf-8"))
}
