//! ANSI escape sequence scanning.
//!
//! Splits strings into escape sequences and printable runs so that width
//! measurement and column slicing can treat escapes as zero-width and never
//! cut one in half. Recognised forms:
//! - CSI sequences: `ESC [` ... final byte (0x40-0x7E)
//! - OSC sequences: `ESC ]` ... BEL (0x07) or ST (ESC \)
//! - DCS/PM/APC sequences: `ESC P`/`ESC ^`/`ESC _` ... ST
//! - Two-character sequences: `ESC` + single char

use std::borrow::Cow;

const ESC: u8 = 0x1B;

/// One piece of a string: either a complete escape sequence or a run of
/// printable text containing no escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiSegment<'a> {
    Escape(&'a str),
    Text(&'a str),
}

/// Iterator over the [`AnsiSegment`]s of a string, in order.
#[derive(Debug, Clone)]
pub struct AnsiSegments<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Iterator for AnsiSegments<'a> {
    type Item = AnsiSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.source.as_bytes();
        let start = self.pos;
        if start >= bytes.len() {
            return None;
        }

        if bytes[start] == ESC {
            let end = skip_escape_sequence(bytes, start);
            self.pos = end;
            // ESC and every terminator are ASCII, so `end` is a char boundary.
            return Some(AnsiSegment::Escape(&self.source[start..end]));
        }

        let end = bytes[start..]
            .iter()
            .position(|&b| b == ESC)
            .map_or(bytes.len(), |offset| start + offset);
        self.pos = end;
        Some(AnsiSegment::Text(&self.source[start..end]))
    }
}

/// Split a string into escape sequences and printable runs.
pub fn ansi_segments(s: &str) -> AnsiSegments<'_> {
    AnsiSegments { source: s, pos: 0 }
}

/// Whether the string contains any escape byte at all.
#[inline]
pub fn has_ansi(s: &str) -> bool {
    s.as_bytes().contains(&ESC)
}

/// Strip ANSI escape sequences from a string.
///
/// Returns `Cow::Borrowed` when no escape sequences are present (zero allocation).
/// Returns `Cow::Owned` with sequences removed otherwise.
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !has_ansi(s) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for segment in ansi_segments(s) {
        if let AnsiSegment::Text(text) = segment {
            result.push_str(text);
        }
    }

    Cow::Owned(result)
}

/// Skip an escape sequence starting at `pos` (which points to ESC byte).
/// Returns the byte index after the complete sequence.
fn skip_escape_sequence(bytes: &[u8], pos: usize) -> usize {
    let next = pos + 1;
    if next >= bytes.len() {
        return bytes.len();
    }

    match bytes[next] {
        b'[' => skip_csi(bytes, next + 1),
        b']' | b'P' | b'^' | b'_' => skip_string_terminated(bytes, next + 1),
        // A lone ESC before a multi-byte char must not swallow half of it.
        b if b >= 0x80 => next,
        _ => next + 1,
    }
}

/// Skip a CSI sequence. `pos` is the byte after `[`.
///
/// CSI format: parameter bytes (0x30-0x3F), intermediate bytes (0x20-0x2F),
/// final byte (0x40-0x7E).
fn skip_csi(bytes: &[u8], pos: usize) -> usize {
    let len = bytes.len();
    let mut i = pos;

    while i < len {
        let b = bytes[i];
        if (0x40..=0x7E).contains(&b) {
            return i + 1;
        }
        if !(0x20..=0x7E).contains(&b) {
            return i; // Invalid byte, abort sequence
        }
        i += 1;
    }

    len
}

/// Skip a string-terminated sequence (OSC, DCS, PM, APC).
/// `pos` is the byte after the type indicator.
///
/// Terminates with BEL (0x07) or ST (ESC \).
fn skip_string_terminated(bytes: &[u8], pos: usize) -> usize {
    let len = bytes.len();
    let mut i = pos;

    while i < len {
        match bytes[i] {
            0x07 => return i + 1,
            ESC if i + 1 < len && bytes[i + 1] == b'\\' => return i + 2,
            _ => i += 1,
        }
    }

    len
}
