//! Comment skipping.
//!
//! Comments are replaced by a single effective character so the automaton sees them as
//! ordinary separators: a line comment stands in for the newline (or EOF) that ends it, a
//! block comment stands in for a space.

use std::io::BufRead;

use crate::{MinifyError, source::CharSource};

/// Fetch the next character with any comment starting at it collapsed.
pub(crate) fn next_char<R: BufRead>(
    source: &mut CharSource<R>,
) -> Result<Option<u8>, MinifyError> {
    let c = source.fetch()?;
    if c != Some(b'/') {
        return Ok(c);
    }

    match source.peek()? {
        Some(b'/') => skip_line_comment(source),
        Some(b'*') => {
            source.fetch()?;
            skip_block_comment(source)
        }
        _ => Ok(c),
    }
}

/// Consume through the end of the line; the terminator is the replacement.
fn skip_line_comment<R: BufRead>(source: &mut CharSource<R>) -> Result<Option<u8>, MinifyError> {
    loop {
        match source.fetch()? {
            c @ (None | Some(b'\n')) => return Ok(c),
            Some(_) => {}
        }
    }
}

/// Consume through the closing `*/`. The opening `/*` is already consumed.
fn skip_block_comment<R: BufRead>(source: &mut CharSource<R>) -> Result<Option<u8>, MinifyError> {
    loop {
        match source.fetch()? {
            Some(b'*') => {
                if source.peek()? == Some(b'/') {
                    source.fetch()?;
                    return Ok(Some(b' '));
                }
            }
            Some(_) => {}
            None => return Err(MinifyError::UnterminatedComment),
        }
    }
}
