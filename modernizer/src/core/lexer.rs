//! Minimal Dart lexer that locates string literals and comments.
//!
//! Only delimiters are recognized; everything else is treated as code. The
//! scan works on bytes since every delimiter is ASCII and UTF-8 continuation
//! bytes never collide with them.
//!
//! Interpolations (`"${a}"`) are part of the surrounding literal, so a string
//! nested inside an interpolation with the same quote character ends the outer
//! literal early.

use std::ops::Range;

/// Sorted, non-overlapping byte ranges covering literals and comments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiteralSpans {
    spans: Vec<Range<usize>>,
}

impl LiteralSpans {
    pub fn scan(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut spans = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            let end = match bytes[i] {
                b'/' if bytes.get(i + 1) == Some(&b'/') => line_comment_end(bytes, i),
                b'/' if bytes.get(i + 1) == Some(&b'*') => block_comment_end(bytes, i),
                b'r' if is_raw_prefix(bytes, i) => string_end(bytes, i + 1, true),
                b'\'' | b'"' => string_end(bytes, i, false),
                _ => {
                    i += 1;
                    continue;
                }
            };
            spans.push(i..end);
            i = end;
        }
        Self { spans }
    }

    /// Whether byte `offset` falls inside a literal or comment.
    pub fn contains(&self, offset: usize) -> bool {
        let idx = self.spans.partition_point(|span| span.end <= offset);
        self.spans.get(idx).is_some_and(|span| span.start <= offset)
    }

    pub fn as_slice(&self) -> &[Range<usize>] {
        &self.spans
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// `r'..'` / `r"..."` only when `r` is not the tail of an identifier.
fn is_raw_prefix(bytes: &[u8], i: usize) -> bool {
    let quote_follows = matches!(bytes.get(i + 1), Some(b'\'' | b'"'));
    let standalone = i == 0 || !is_ident_byte(bytes[i - 1]);
    quote_follows && standalone
}

fn line_comment_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |pos| start + pos)
}

fn block_comment_end(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    let mut i = start;
    while i < bytes.len() {
        if bytes[i..].starts_with(b"/*") {
            depth += 1;
            i += 2;
        } else if bytes[i..].starts_with(b"*/") {
            depth -= 1;
            i += 2;
            if depth == 0 {
                return i;
            }
        } else {
            i += 1;
        }
    }
    bytes.len()
}

/// End (exclusive) of the string whose opening quote is at `quote_at`.
///
/// Unterminated single-line strings stop at the newline; unterminated
/// triple-quoted strings run to the end of input.
fn string_end(bytes: &[u8], quote_at: usize, raw: bool) -> usize {
    let quote = bytes[quote_at];
    let triple = [quote; 3];
    let multiline = bytes[quote_at..].starts_with(&triple);
    let mut i = quote_at + if multiline { 3 } else { 1 };
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\\' && !raw {
            i += 2;
            continue;
        }
        if multiline {
            if bytes[i..].starts_with(&triple) {
                return i + 3;
            }
        } else if b == quote {
            return i + 1;
        } else if b == b'\n' {
            return i;
        }
        i += 1;
    }
    bytes.len()
}
