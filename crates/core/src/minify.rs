//! The minification automaton.
//!
//! The automaton keeps a pair of effective characters: `a`, the last character that may
//! still be written, and `b`, the candidate after it. Every iteration looks only at that
//! pair and picks one [`Step`] from the rule table in [`decide`]. Comments are collapsed
//! while fetching `b`; literals are copied whole when they reach `a` (quotes) or when a `/`
//! in regex position arrives as `b`.
//!
//! Two byte-level guards sit on top of the table:
//!
//! - When a dropped separator stood between two operators that would fuse (`+ +`, `- -`,
//!   `/ /`, `/ *`), one space is written back so `a+ +b` never becomes `a++b`.
//! - A regex literal following `/` or `*` gets a space before its opening slash so the
//!   output never forms `//` or `*/`.
//!
//! A kept line break is not significant for regex detection: when `a` is a pending newline,
//! the `/` is judged by the last byte written before it, and the newline is dropped if a
//! regex opens there. Before anything is written, a `/` always opens a regex.
//!
//! The run starts with `a` primed to a newline, so leading comments and blank lines are
//! handled as if a line had just ended. That newline, and any other newline before the
//! first written byte, is never written.

use std::io::{BufRead, Write};

use crate::{
    MinifyError,
    comment::next_char,
    literal::{copy_quoted, copy_regex, is_quote, opens_regex},
    sink::Sink,
    source::{CharSource, is_alphanum},
};

/// What to do with the current `(a, b)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Write `a`, then move `b` into `a` and fetch a new `b`.
    Emit,
    /// Drop `a`, then move `b` into `a` and fetch a new `b`.
    Elide,
    /// Keep `a` pending, drop `b` and fetch a new `b`.
    Defer,
}

/// The separator rule table.
///
/// | `a`      | `b`                          | step                              |
/// |----------|------------------------------|-----------------------------------|
/// | space    | alphanumeric                 | `Emit` (one space survives)       |
/// | space    | anything else                | `Elide`                           |
/// | newline  | `{ [ ( + - ! ~`              | `Emit` (line break survives)      |
/// | newline  | space                        | `Defer`                           |
/// | newline  | alphanumeric                 | `Emit`                            |
/// | newline  | anything else                | `Elide`                           |
/// | ordinary | space                        | `Emit` if `a` alphanumeric, else `Defer` |
/// | ordinary | newline                      | `Emit` if `a` may end a line, else `Defer` |
/// | ordinary | anything else                | `Emit`                            |
pub(crate) fn decide(a: u8, b: Option<u8>) -> Step {
    match a {
        b' ' => {
            if is_alphanum(b) {
                Step::Emit
            } else {
                Step::Elide
            }
        }
        b'\n' => match b {
            Some(b'{' | b'[' | b'(' | b'+' | b'-' | b'!' | b'~') => Step::Emit,
            Some(b' ') => Step::Defer,
            _ if is_alphanum(b) => Step::Emit,
            _ => Step::Elide,
        },
        _ => match b {
            Some(b' ') if is_alphanum(Some(a)) => Step::Emit,
            Some(b' ') => Step::Defer,
            Some(b'\n') if ends_line(a) => Step::Emit,
            Some(b'\n') => Step::Defer,
            _ => Step::Emit,
        },
    }
}

/// Characters after which a following line break is kept.
fn ends_line(a: u8) -> bool {
    matches!(
        a,
        b'{' | b'}' | b']' | b')' | b'+' | b'-' | b'"' | b'\'' | b'`'
    ) || is_alphanum(Some(a))
}

/// Whether `a` written directly before `b` fuses into a different token.
fn fuses(a: u8, b: Option<u8>) -> bool {
    matches!(
        (a, b),
        (b'+', Some(b'+')) | (b'-', Some(b'-')) | (b'/', Some(b'/' | b'*'))
    )
}

/// Byte counts for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Raw bytes consumed from the input.
    pub bytes_read: u64,
    /// Bytes written to the output.
    pub bytes_written: u64,
}

/// A single minification run over one input and one output.
///
/// The minifier owns its source, sink and automaton state; independent instances never
/// share anything. Output is written as it is decided, so on error whatever was already
/// written stays written.
pub struct Minifier<R, W> {
    source: CharSource<R>,
    sink: Sink<W>,
    a: Option<u8>,
    b: Option<u8>,
    /// A separator between `a` and `b` was dropped by a `Defer`.
    dropped_separator: bool,
}

impl<R: BufRead, W: Write> Minifier<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            source: CharSource::new(reader),
            sink: Sink::new(writer),
            a: Some(b'\n'),
            b: None,
            dropped_separator: false,
        }
    }

    /// Minify the whole input.
    ///
    /// The writer is not flushed.
    pub fn run(mut self) -> Result<Summary, MinifyError> {
        match self.drive() {
            Ok(()) => {
                let summary = Summary {
                    bytes_read: self.source.consumed(),
                    bytes_written: self.sink.written(),
                };
                tracing::debug!(
                    bytes_read = summary.bytes_read,
                    bytes_written = summary.bytes_written,
                    "minified script"
                );
                Ok(summary)
            }
            Err(err) => {
                tracing::debug!(
                    error = %err,
                    bytes_read = self.source.consumed(),
                    "minification aborted"
                );
                Err(err)
            }
        }
    }

    fn drive(&mut self) -> Result<(), MinifyError> {
        self.fetch_b()?;
        while let Some(a) = self.a {
            match decide(a, self.b) {
                Step::Emit => {
                    self.write_a(a)?;
                    self.shift()?;
                    self.fetch_b()?;
                }
                Step::Elide => {
                    self.shift()?;
                    self.fetch_b()?;
                }
                Step::Defer => {
                    self.dropped_separator = true;
                    self.fetch_b()?;
                }
            }
        }
        Ok(())
    }

    fn write_a(&mut self, a: u8) -> Result<(), MinifyError> {
        if a == b'\n' && self.sink.is_empty() {
            return Ok(());
        }
        self.sink.put(a)?;
        if self.dropped_separator && fuses(a, self.b) {
            self.sink.put(b' ')?;
        }
        Ok(())
    }

    /// Move `b` into `a`, copying a string or template literal if one starts there.
    fn shift(&mut self) -> Result<(), MinifyError> {
        self.a = self.b;
        self.dropped_separator = false;
        if let Some(delim) = self.a.filter(|&c| is_quote(c)) {
            copy_quoted(&mut self.source, &mut self.sink, delim)?;
        }
        Ok(())
    }

    /// Fetch a new `b`, copying a regex literal if one starts there.
    fn fetch_b(&mut self) -> Result<(), MinifyError> {
        self.b = next_char(&mut self.source)?;
        let Some(a) = self.a else {
            return Ok(());
        };
        if self.b != Some(b'/') {
            return Ok(());
        }

        if a == b'\n' {
            if !self.sink.last().is_none_or(opens_regex) {
                return Ok(());
            }
        } else {
            if !opens_regex(a) {
                return Ok(());
            }
            self.sink.put(a)?;
            if matches!(a, b'/' | b'*') {
                self.sink.put(b' ')?;
            }
        }
        copy_regex(&mut self.source, &mut self.sink)?;
        self.a = Some(b'/');
        self.dropped_separator = false;
        self.b = next_char(&mut self.source)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minify(src: &str) -> String {
        let mut out = Vec::new();
        Minifier::new(src.as_bytes(), &mut out).run().unwrap();
        String::from_utf8(out).unwrap()
    }

    fn minify_err(src: &str) -> MinifyError {
        let mut out = Vec::new();
        Minifier::new(src.as_bytes(), &mut out).run().unwrap_err()
    }

    /// Space rows of the table.
    #[test]
    fn decide_after_space() {
        assert_eq!(decide(b' ', Some(b'x')), Step::Emit);
        assert_eq!(decide(b' ', Some(b'$')), Step::Emit);
        assert_eq!(decide(b' ', Some(0xe2)), Step::Emit);
        assert_eq!(decide(b' ', Some(b'(')), Step::Elide);
        assert_eq!(decide(b' ', Some(b'\n')), Step::Elide);
        assert_eq!(decide(b' ', None), Step::Elide);
    }

    /// Newline rows of the table.
    #[test]
    fn decide_after_newline() {
        for b in b"{[(+-!~" {
            assert_eq!(decide(b'\n', Some(*b)), Step::Emit, "{}", *b as char);
        }
        assert_eq!(decide(b'\n', Some(b' ')), Step::Defer);
        assert_eq!(decide(b'\n', Some(b'f')), Step::Emit);
        assert_eq!(decide(b'\n', Some(b'}')), Step::Elide);
        assert_eq!(decide(b'\n', Some(b'\n')), Step::Elide);
        assert_eq!(decide(b'\n', Some(b'.')), Step::Elide);
        assert_eq!(decide(b'\n', None), Step::Elide);
    }

    /// Ordinary rows of the table.
    #[test]
    fn decide_after_ordinary() {
        assert_eq!(decide(b'x', Some(b' ')), Step::Emit);
        assert_eq!(decide(b'=', Some(b' ')), Step::Defer);
        for a in b"{}])+-\"'`x9" {
            assert_eq!(decide(*a, Some(b'\n')), Step::Emit, "{}", *a as char);
        }
        for a in b";,=(*." {
            assert_eq!(decide(*a, Some(b'\n')), Step::Defer, "{}", *a as char);
        }
        assert_eq!(decide(b'+', Some(b'+')), Step::Emit);
        assert_eq!(decide(b';', None), Step::Emit);
    }

    /// The worked example from a leading comment through a function body.
    #[test]
    fn minifies_function() {
        let src = "// c\nfunction add(a, b) {\n  return a + b;\n}\n";
        assert_eq!(minify(src), "function add(a,b){\nreturn a+b;}");
    }

    /// Exactly one space survives between two identifier-like tokens.
    #[test]
    fn keeps_required_space() {
        assert_eq!(minify("return   x"), "return x");
        assert_eq!(minify("var\t\ty"), "var y");
    }

    /// Dropping a separator never fuses two operators.
    #[test]
    fn keeps_operators_apart() {
        assert_eq!(minify("a+ +b"), "a+ +b");
        assert_eq!(minify("a + +b"), "a+ +b");
        assert_eq!(minify("a - -b"), "a- -b");
        assert_eq!(minify("a ++b"), "a++b");
        assert_eq!(minify("a + b"), "a+b");
        assert_eq!(minify("a / *b"), "a/ *b");
    }

    /// Operator pairs that cannot fuse lose their separator.
    #[test]
    fn joins_non_fusing_operators() {
        assert_eq!(minify("a + -b"), "a+-b");
        assert_eq!(minify("a * -b"), "a*-b");
        assert_eq!(minify("x = a *\n-b"), "x=a*-b");
        assert_eq!(minify("a/\n+b"), "a/+b");
    }

    /// A slash after an ordinary operand is division.
    #[test]
    fn division_is_not_regex() {
        assert_eq!(minify("a/b/g"), "a/b/g");
        assert_eq!(minify("(a) / 2"), "(a)/2");
    }

    /// A slash after an operator starts a regex literal copied verbatim.
    #[test]
    fn regex_after_operator() {
        assert_eq!(minify("x=/ab+/g;"), "x=/ab+/g;");
        assert_eq!(minify("x = /a b/ ;"), "x=/a b/;");
        assert_eq!(minify("f(/[/]  x/i)"), "f(/[/]  x/i)");
    }

    /// A regex on the line after `{` or `+` is judged by that character.
    #[test]
    fn regex_after_line_break() {
        assert_eq!(
            minify("if (x) {\n  / +/g.exec(s);\n}"),
            "if(x){/ +/g.exec(s);}"
        );
        assert_eq!(
            minify("function f(s) {\n  /[/*]/.test(s);\n}"),
            "function f(s){/[/*]/.test(s);}"
        );
        assert_eq!(minify("a +\n/ x/g"), "a+/ x/g");
        assert_eq!(minify("x=1;\n/[/*]/.test(s);"), "x=1;/[/*]/.test(s);");
    }

    /// A slash before any output opens a regex.
    #[test]
    fn regex_at_start() {
        assert_eq!(minify("/ +/.test(s)"), "/ +/.test(s)");
        assert_eq!(minify("// c\n/a b/.test(s)"), "/a b/.test(s)");
    }

    /// A regex following `/` keeps a space so no comment opener forms.
    #[test]
    fn regex_after_slash_keeps_space() {
        assert_eq!(
            minify("x = a / /b/.source.length"),
            "x=a/ /b/.source.length"
        );
    }

    /// String and template literals keep their inner whitespace and comment syntax.
    #[test]
    fn literals_are_opaque() {
        assert_eq!(
            minify("s = 'it\\'s // not /* a */ comment' ;"),
            "s='it\\'s // not /* a */ comment';"
        );
        assert_eq!(minify("t = `a\n    b` ;"), "t=`a\n    b`;");
        assert_eq!(minify("u = \"x\"\n+ y"), "u=\"x\"\n+y");
    }

    /// Comments collapse into the separators they stand for.
    #[test]
    fn comments_collapse() {
        assert_eq!(minify("a/* c */b"), "a b");
        assert_eq!(minify("a = 1; /* c */ b = 2"), "a=1;b=2");
        assert_eq!(minify("a // c\nb"), "a\nb");
        assert_eq!(minify("a // c"), "a");
    }

    /// Leading blank lines and comments never produce a leading newline.
    #[test]
    fn no_leading_newline() {
        assert_eq!(minify("\n\n  x"), "x");
        assert_eq!(minify("/* header */\n\n(function(){})()"), "(function(){})()");
        assert_eq!(minify("// a\n// b\n[1]"), "[1]");
    }

    /// A comment-only line between two statements acts like a blank line.
    #[test]
    fn comment_line_between_statements() {
        assert_eq!(minify("a()\n// note\nb()"), "a()\nb()");
        assert_eq!(minify("a();\n  // note\n  b()"), "a();b()");
        assert_eq!(minify("x\n/* note */\n(y)"), "x\n(y)");
    }

    /// Line breaks that may end a statement are kept; others go.
    #[test]
    fn line_breaks() {
        assert_eq!(minify("a\n(b)"), "a\n(b)");
        assert_eq!(minify("a;\n(b)"), "a;(b)");
        assert_eq!(minify("a\r\nb"), "a\nb");
        assert_eq!(minify("{\n}\n"), "{}");
        assert_eq!(minify("x\n\n\n"), "x");
    }

    /// Empty and whitespace-only inputs produce nothing.
    #[test]
    fn empty_input() {
        assert_eq!(minify(""), "");
        assert_eq!(minify(" \n\t\r\n"), "");
        assert_eq!(minify("// only a comment"), "");
    }

    /// Every lexical fault aborts the run.
    #[test]
    fn lexical_faults() {
        assert!(matches!(
            minify_err("var s = \"abc"),
            MinifyError::UnterminatedStringLiteral
        ));
        assert!(matches!(
            minify_err("a /* b"),
            MinifyError::UnterminatedComment
        ));
        assert!(matches!(
            minify_err("x = /[abc"),
            MinifyError::UnterminatedCharacterClass
        ));
        assert!(matches!(
            minify_err("x = /abc"),
            MinifyError::UnterminatedRegexLiteral
        ));
    }

    /// Byte counts cover raw input and produced output.
    #[test]
    fn reports_summary() {
        let mut out = Vec::new();
        let summary = Minifier::new(&b"a  =\r\n1"[..], &mut out).run().unwrap();
        assert_eq!(out, b"a=1");
        assert_eq!(
            summary,
            Summary {
                bytes_read: 7,
                bytes_written: 3
            }
        );
    }
}
