//! Text truncation with an ellipsis.
//!
//! Cuts a line down to a terminal cell width at the end, the start, or the
//! middle, marking the cut with `…`. Never breaks a grapheme cluster or an
//! escape sequence; a wide character that would straddle the cut is dropped.

use super::slice::slice_ansi_inner;
use super::width::string_width;

/// Marker inserted where text was cut.
pub const ELLIPSIS: &str = "…";

/// Where the cut happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncatePosition {
    Start,
    Middle,
    End,
}

/// Truncate a single line to fit within `max_width` cells.
///
/// Returns the line unchanged when it already fits. `max_width == 0`
/// yields an empty string.
pub fn truncate_line(line: &str, max_width: usize, position: TruncatePosition) -> String {
    if max_width == 0 {
        return String::new();
    }

    let width = string_width(line);
    if width <= max_width {
        return line.to_string();
    }

    if max_width == 1 {
        return ELLIPSIS.to_string();
    }

    // ELLIPSIS occupies exactly one cell.
    let keep = max_width - 1;
    match position {
        TruncatePosition::End => format!("{}{ELLIPSIS}", slice_ansi_inner(line, 0, keep)),
        TruncatePosition::Start => {
            format!("{ELLIPSIS}{}", slice_ansi_inner(line, width - keep, width))
        }
        TruncatePosition::Middle => {
            let head = max_width / 2;
            let tail = keep - head;
            format!(
                "{}{ELLIPSIS}{}",
                slice_ansi_inner(line, 0, head),
                slice_ansi_inner(line, width - tail, width)
            )
        }
    }
}

/// Truncate every `\n`-separated line of `text` independently.
pub fn truncate_text(text: &str, max_width: usize, position: TruncatePosition) -> String {
    text.split('\n')
        .map(|line| truncate_line(line, max_width, position))
        .collect::<Vec<_>>()
        .join("\n")
}
