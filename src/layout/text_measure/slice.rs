//! Column slicing that is safe for escape sequences and wide characters.
//!
//! A slice keeps the escape sequences that sit inside its range, in order.
//! SGR escapes before the first kept grapheme are folded into the styles
//! active there and re-opened as one sequence; styles still open at its end are
//! closed with one sequence. A sliced piece can therefore be spliced next to
//! other pieces without bleeding colour across them, and slicing never
//! multiplies the escapes of its input.

use unicode_segmentation::UnicodeSegmentation;

use super::ansi::{AnsiSegment, ansi_segments, has_ansi};
use super::sgr::{SgrState, is_sgr};
use super::width::grapheme_width;

/// Slice `s` to the visual columns `[from, to)`.
///
/// A wide grapheme cut by either boundary is replaced by spaces for the
/// columns it covers inside the range, so the result is exactly as wide as
/// the part of `s` that overlaps the range. `to` may exceed the width of `s`;
/// `from >= to` yields an empty string.
pub fn slice_ansi(s: &str, from: usize, to: usize) -> String {
    slice_columns(s, from, to, true)
}

/// Keep graphemes that lie entirely inside `[from, to)`, dropping any that
/// straddle a boundary instead of padding them.
///
/// Used for truncation, where a half-visible wide character must disappear
/// rather than turn into a space.
pub fn slice_ansi_inner(s: &str, from: usize, to: usize) -> String {
    slice_columns(s, from, to, false)
}

/// Output of a slice in progress. The carried-in styles are written lazily,
/// the first time anything inside the range is kept.
struct Slice {
    out: String,
    state: SgrState,
    started: bool,
}

impl Slice {
    fn push(&mut self, piece: &str) {
        if !self.started {
            self.started = true;
            self.out.push_str(&self.state.opening());
        }
        self.out.push_str(piece);
    }

    fn finish(mut self) -> String {
        if self.started {
            self.out.push_str(&self.state.closing());
        }
        self.out
    }
}

fn slice_columns(s: &str, from: usize, to: usize, pad: bool) -> String {
    if s.is_empty() || from >= to {
        return String::new();
    }

    if !has_ansi(s) && s.bytes().all(|b| (0x20..0x7F).contains(&b)) {
        let len = s.len();
        let start = from.min(len);
        let end = to.min(len).max(start);
        return s[start..end].to_string();
    }

    let mut slice = Slice {
        out: String::with_capacity(s.len()),
        state: SgrState::default(),
        started: false,
    };
    let mut column = 0usize;

    'segments: for segment in ansi_segments(s) {
        let text = match segment {
            AnsiSegment::Escape(escape) => {
                if column >= to {
                    break;
                }
                if slice.started || (column >= from && !is_sgr(escape)) {
                    slice.push(escape);
                }
                slice.state.apply(escape);
                continue;
            }
            AnsiSegment::Text(text) => text,
        };

        for grapheme in text.graphemes(true) {
            let start = column;
            if start >= to {
                break 'segments;
            }
            let width = grapheme_width(grapheme);
            let end = start + width;
            column = end;

            if width == 0 {
                if start >= from {
                    slice.push(grapheme);
                }
            } else if start >= from && end <= to {
                slice.push(grapheme);
            } else if pad && end > from {
                let covered = end.min(to) - start.max(from);
                slice.push(&" ".repeat(covered));
            }
        }
    }

    slice.finish()
}
