//! Verbatim copying of string, template and regular-expression literals.
//!
//! Literals are opaque: whitespace and comment syntax inside them is significant, so every
//! character is copied as-is until the matching terminator. A backslash always copies the
//! following character too, which keeps escaped delimiters from closing the literal.

use std::io::{BufRead, Write};

use crate::{MinifyError, sink::Sink, source::CharSource};

/// Quote characters that open a string or template literal.
pub(crate) fn is_quote(c: u8) -> bool {
    matches!(c, b'\'' | b'"' | b'`')
}

/// Whether a `/` following `prev` starts a regex literal rather than a division.
pub(crate) fn opens_regex(prev: u8) -> bool {
    matches!(
        prev,
        b'('
            | b','
            | b'='
            | b':'
            | b'['
            | b'!'
            | b'&'
            | b'|'
            | b'?'
            | b'+'
            | b'-'
            | b'~'
            | b'*'
            | b'/'
            | b'{'
            | b'}'
            | b';'
    )
}

/// Copy a quoted literal whose opening `delim` has already been read.
///
/// Writes the opening delimiter and the body. The closing delimiter is consumed but not
/// written; it becomes the automaton's next pending character.
pub(crate) fn copy_quoted<R: BufRead, W: Write>(
    source: &mut CharSource<R>,
    sink: &mut Sink<W>,
    delim: u8,
) -> Result<(), MinifyError> {
    let mut c = delim;
    loop {
        sink.put(c)?;
        let mut next = source.fetch()?;
        if next == Some(delim) {
            return Ok(());
        }
        if next == Some(b'\\') {
            sink.put(b'\\')?;
            next = source.fetch()?;
        }
        c = next.ok_or(MinifyError::UnterminatedStringLiteral)?;
    }
}

/// Copy a regex literal whose opening `/` has already been read.
///
/// Writes the opening `/` and the body. The closing `/` is consumed but not written; flags
/// that follow it are left to ordinary processing.
pub(crate) fn copy_regex<R: BufRead, W: Write>(
    source: &mut CharSource<R>,
    sink: &mut Sink<W>,
) -> Result<(), MinifyError> {
    sink.put(b'/')?;
    loop {
        match source.fetch()? {
            Some(b'/') => return Ok(()),
            Some(b'[') => copy_class(source, sink)?,
            Some(b'\\') => {
                sink.put(b'\\')?;
                let escaped = source
                    .fetch()?
                    .ok_or(MinifyError::UnterminatedRegexLiteral)?;
                sink.put(escaped)?;
            }
            Some(c) => sink.put(c)?,
            None => return Err(MinifyError::UnterminatedRegexLiteral),
        }
    }
}

/// Copy a `[...]` character class, brackets included. `/` does not terminate it.
fn copy_class<R: BufRead, W: Write>(
    source: &mut CharSource<R>,
    sink: &mut Sink<W>,
) -> Result<(), MinifyError> {
    sink.put(b'[')?;
    loop {
        let mut c = source.fetch()?;
        if c == Some(b'\\') {
            sink.put(b'\\')?;
            c = source.fetch()?;
        } else if c == Some(b']') {
            sink.put(b']')?;
            return Ok(());
        }
        sink.put(c.ok_or(MinifyError::UnterminatedCharacterClass)?)?;
    }
}
