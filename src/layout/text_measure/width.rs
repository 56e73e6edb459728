//! Width calculation for terminal text.
//!
//! Measures the display width of characters, grapheme clusters, strings and
//! multi-line blocks in terminal cells. Uses Unicode East Asian Width for
//! character widths and grapheme cluster analysis for emoji sequences.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use super::ansi::{AnsiSegment, ansi_segments, has_ansi};

/// Display width of a single codepoint in terminal cells.
///
/// Control characters and combining marks are zero-width; East Asian wide
/// and fullwidth characters (including emoji with wide presentation) are 2.
#[inline]
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Display width of a grapheme cluster in terminal cells.
///
/// Emoji sequences (ZWJ joins, VS16 presentation, skin tones, keycaps) and
/// regional indicator pairs occupy two cells; any other cluster takes the
/// width of its base character.
pub fn grapheme_width(grapheme: &str) -> usize {
    let mut chars = grapheme.chars();
    let Some(first) = chars.next() else {
        return 0;
    };

    let rest = chars.as_str();
    if rest.is_empty() {
        return char_width(first);
    }

    if ('\u{1F1E6}'..='\u{1F1FF}').contains(&first) {
        return 2;
    }

    let is_emoji_sequence = rest.chars().any(|c| {
        matches!(c, '\u{200D}' | '\u{FE0F}' | '\u{20E3}' | '\u{1F3FB}'..='\u{1F3FF}')
    });
    if is_emoji_sequence {
        return 2;
    }

    char_width(first)
}

/// Display width of a string in terminal cells.
///
/// Correctly handles:
/// - ANSI escape sequences (zero-width)
/// - East Asian wide characters (CJK = 2 cells)
/// - Emoji sequences (ZWJ, skin tones, flags = 2 cells)
/// - Combining marks and control characters (zero-width)
///
/// Line breaks are not special here; use [`widest_line`] for multi-line text.
pub fn string_width(s: &str) -> usize {
    if s.is_empty() {
        return 0;
    }

    // Fast path: pure ASCII with no escape sequences.
    if s.is_ascii() && !has_ansi(s) {
        return s.bytes().filter(|&b| b >= 0x20 && b != 0x7F).count();
    }

    ansi_segments(s)
        .map(|segment| match segment {
            AnsiSegment::Escape(_) => 0,
            AnsiSegment::Text(text) => text.graphemes(true).map(grapheme_width).sum(),
        })
        .sum()
}

/// Width of the widest `\n`-separated line of `text`.
pub fn widest_line(text: &str) -> usize {
    text.split('\n').map(string_width).max().unwrap_or(0)
}

/// Widest line and number of lines, as a `(width, height)` pair.
///
/// Empty text measures `(0, 0)`.
pub fn measure_text(text: &str) -> (usize, usize) {
    if text.is_empty() {
        return (0, 0);
    }
    (widest_line(text), text.split('\n').count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_widths() {
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width('\t'), 0);
        assert_eq!(char_width('\u{0301}'), 0);
        assert_eq!(char_width('你'), 2);
        assert_eq!(char_width('Ａ'), 2);
        assert_eq!(char_width('─'), 1);
    }

    #[test]
    fn grapheme_clusters() {
        assert_eq!(grapheme_width(""), 0);
        assert_eq!(grapheme_width("e\u{0301}"), 1);
        assert_eq!(grapheme_width("👨\u{200D}👩\u{200D}👧"), 2);
        assert_eq!(grapheme_width("👍\u{1F3FD}"), 2);
        assert_eq!(grapheme_width("🇺🇸"), 2);
        assert_eq!(grapheme_width("1\u{FE0F}\u{20E3}"), 2);
    }

    #[test]
    fn string_width_ascii() {
        assert_eq!(string_width("hello"), 5);
        assert_eq!(string_width(""), 0);
        assert_eq!(string_width("a\tb"), 2);
    }

    #[test]
    fn string_width_wide_and_combining() {
        assert_eq!(string_width("hello你好"), 9);
        assert_eq!(string_width("cafe\u{0301}"), 4);
    }

    #[test]
    fn string_width_skips_escapes() {
        assert_eq!(string_width("\x1b[31mred\x1b[0m"), 3);
        assert_eq!(string_width("\x1b[1m\x1b[31m你好\x1b[0m"), 4);
        assert_eq!(string_width("\x1b]8;;https://a.b\x07link\x1b]8;;\x07"), 4);
    }

    #[test]
    fn widest_line_picks_longest() {
        assert_eq!(widest_line("ab\nabcd\nabc"), 4);
        assert_eq!(widest_line(""), 0);
        assert_eq!(widest_line("\x1b[31mHello\x1b[39m\nHi"), 5);
    }

    #[test]
    fn measure_text_block() {
        assert_eq!(measure_text("Hello\nWorld!"), (6, 2));
        assert_eq!(measure_text(""), (0, 0));
        assert_eq!(measure_text("\n"), (0, 2));
    }
}
