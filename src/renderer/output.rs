//! Virtual output - records drawing operations and flattens them into rows.
//!
//! Nothing is drawn while the tree is walked. Writes and clip changes are
//! appended to an operation log, and [`Output::flatten`] replays the log
//! against a grid of blank rows:
//!
//! ```text
//! write / clip_* / reset_clipping  →  Vec<Operation>  →  flatten()  →  text
//! ```
//!
//! # Clipping
//!
//! Clip bounds are closed intervals in absolute buffer coordinates. A clip
//! operation replaces the bound on its axis for every later write;
//! [`Output::reset_clipping`] clears both axes. Callers that nest clips are
//! responsible for intersecting them before emitting.

use std::fmt;

use crate::layout::text_measure::{slice_ansi, string_width, widest_line};
use crate::types::{ClipRegion, ClipSpan, OutputTransformer};

/// One entry of the operation log.
#[derive(Clone)]
pub enum Operation {
    Write {
        x: i32,
        y: i32,
        text: String,
        /// Applied left to right to each clipped line.
        transformers: Vec<OutputTransformer>,
    },
    ClipHorizontal {
        x1: i32,
        x2: i32,
    },
    ClipVertical {
        y1: i32,
        y2: i32,
    },
    ResetClipping,
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write {
                x,
                y,
                text,
                transformers,
            } => f
                .debug_struct("Write")
                .field("x", x)
                .field("y", y)
                .field("text", text)
                .field("transformers", &transformers.len())
                .finish(),
            Self::ClipHorizontal { x1, x2 } => f
                .debug_struct("ClipHorizontal")
                .field("x1", x1)
                .field("x2", x2)
                .finish(),
            Self::ClipVertical { y1, y2 } => f
                .debug_struct("ClipVertical")
                .field("y1", y1)
                .field("y2", y2)
                .finish(),
            Self::ResetClipping => f.write_str("ResetClipping"),
        }
    }
}

/// Result of [`Output::flatten`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedOutput {
    /// Rows joined with `\n`, trailing whitespace stripped from each row.
    pub text: String,
    /// Number of rows, always the buffer height.
    pub height: usize,
}

/// A `width` x `height` grid of terminal cells plus the operations that will
/// be drawn onto it.
#[derive(Debug, Clone, Default)]
pub struct Output {
    width: usize,
    height: usize,
    operations: Vec<Operation>,
}

impl Output {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            operations: Vec::new(),
        }
    }

    /// The operation log, in emission order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Queue `text` (possibly multi-line) at `(x, y)`.
    ///
    /// Empty text records nothing. Coordinates outside the grid are allowed;
    /// the parts that fall outside are dropped when flattening.
    pub fn write(&mut self, x: i32, y: i32, text: &str, transformers: &[OutputTransformer]) {
        if text.is_empty() {
            return;
        }
        self.operations.push(Operation::Write {
            x,
            y,
            text: text.to_string(),
            transformers: transformers.to_vec(),
        });
    }

    /// Restrict later writes to columns `x1..=x2`.
    pub fn clip_horizontally(&mut self, x1: i32, x2: i32) {
        self.operations.push(Operation::ClipHorizontal { x1, x2 });
    }

    /// Restrict later writes to rows `y1..=y2`.
    pub fn clip_vertically(&mut self, y1: i32, y2: i32) {
        self.operations.push(Operation::ClipVertical { y1, y2 });
    }

    /// Lift both clip bounds for later writes.
    pub fn reset_clipping(&mut self) {
        self.operations.push(Operation::ResetClipping);
    }

    /// Emit the clip operations that make `region` the active clip.
    pub fn apply_clip(&mut self, region: ClipRegion) {
        if let Some(span) = region.horizontal {
            self.clip_horizontally(span.start, span.end);
        }
        if let Some(span) = region.vertical {
            self.clip_vertically(span.start, span.end);
        }
    }

    /// Replay the log onto blank rows and join them.
    ///
    /// Pure with respect to the log: flattening twice gives the same result.
    pub fn flatten(&self) -> FlattenedOutput {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "output_flatten",
            width = self.width,
            height = self.height,
            operations = self.operations.len()
        )
        .entered();

        let mut rows = vec![" ".repeat(self.width); self.height];
        let mut clip = ClipRegion::NONE;

        for operation in &self.operations {
            match operation {
                Operation::ClipHorizontal { x1, x2 } => {
                    clip.horizontal = Some(ClipSpan::new(*x1, *x2));
                }
                Operation::ClipVertical { y1, y2 } => {
                    clip.vertical = Some(ClipSpan::new(*y1, *y2));
                }
                Operation::ResetClipping => clip = ClipRegion::NONE,
                Operation::Write {
                    x,
                    y,
                    text,
                    transformers,
                } => self.draw(&mut rows, clip, *x, *y, text, transformers),
            }
        }

        let text = rows
            .iter()
            .map(|row| row.trim_end())
            .collect::<Vec<_>>()
            .join("\n");

        FlattenedOutput {
            text,
            height: self.height,
        }
    }

    fn draw(
        &self,
        rows: &mut [String],
        clip: ClipRegion,
        mut x: i32,
        mut y: i32,
        text: &str,
        transformers: &[OutputTransformer],
    ) {
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();

        if let Some(span) = clip.horizontal {
            let width = cells(widest_line(text));
            if span.is_empty() || x.saturating_add(width) <= span.start || x > span.end {
                return;
            }

            let from = span.start.saturating_sub(x).max(0);
            let limit = span.end.saturating_sub(x).saturating_add(1);
            for line in &mut lines {
                let to = cells(string_width(line)).min(limit);
                *line = slice_ansi(line, from as usize, to.max(0) as usize);
            }
            x = x.max(span.start);
        }

        if let Some(span) = clip.vertical {
            let height = cells(lines.len());
            if span.is_empty() || y.saturating_add(height) <= span.start || y > span.end {
                return;
            }

            let from = span.start.saturating_sub(y).max(0) as usize;
            let to = (span.end.saturating_sub(y).saturating_add(1).min(height)).max(0) as usize;
            lines = lines.drain(from.min(to)..to).collect();
            y = y.max(span.start);
        }

        let buffer_width = cells(self.width);
        for (offset, line) in lines.into_iter().enumerate() {
            let row_index = y.saturating_add(cells(offset));
            let Some(row) = usize::try_from(row_index)
                .ok()
                .and_then(|index| rows.get_mut(index))
            else {
                continue;
            };

            let (mut col, mut line) = (x, line);
            if col < 0 {
                line = slice_ansi(&line, col.unsigned_abs() as usize, usize::MAX);
                col = 0;
            }
            if col >= buffer_width {
                continue;
            }
            let room = (buffer_width - col) as usize;
            let mut line_width = string_width(&line);
            if line_width > room {
                line = slice_ansi(&line, 0, room);
                line_width = room;
            }

            let col = col as usize;
            let transformed = transformers
                .iter()
                .fold(line, |current, transform| transform(&current));

            *row = format!(
                "{}{}{}",
                slice_ansi(row, 0, col),
                transformed,
                slice_ansi(row, col + line_width, usize::MAX)
            );
        }
    }
}

/// Column or row count as a signed coordinate.
#[inline]
fn cells(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::transformer;

    fn flat(output: &Output) -> String {
        output.flatten().text
    }

    #[test]
    fn blank_buffer() {
        let output = Output::new(3, 2);
        assert_eq!(output.flatten(), FlattenedOutput {
            text: "\n".to_string(),
            height: 2,
        });
    }

    #[test]
    fn write_places_text() {
        let mut output = Output::new(10, 2);
        output.write(2, 1, "hi", &[]);
        assert_eq!(flat(&output), "\n  hi");
    }

    #[test]
    fn empty_write_is_not_recorded() {
        let mut output = Output::new(10, 1);
        output.write(0, 0, "", &[]);
        assert!(output.operations().is_empty());
    }

    #[test]
    fn later_write_wins() {
        let mut output = Output::new(10, 1);
        output.write(0, 0, "aaaaa", &[]);
        output.write(2, 0, "bb", &[]);
        assert_eq!(flat(&output), "aabba");
    }

    #[test]
    fn horizontal_clip_closed_interval() {
        let mut output = Output::new(6, 1);
        output.clip_horizontally(0, 5);
        output.write(0, 0, "Hello World", &[]);
        assert_eq!(flat(&output), "Hello");
    }

    #[test]
    fn horizontal_clip_left_of_start() {
        let mut output = Output::new(8, 1);
        output.clip_horizontally(0, 5);
        output.write(-3, 0, "Hello World", &[]);
        assert_eq!(flat(&output), "lo Wor");
    }

    #[test]
    fn vertical_clip() {
        let mut output = Output::new(5, 1);
        output.clip_vertically(0, 0);
        output.write(0, 0, "Hello\nWorld", &[]);
        assert_eq!(flat(&output), "Hello");
    }

    #[test]
    fn write_outside_clip_is_skipped() {
        let mut output = Output::new(10, 2);
        output.clip_horizontally(0, 3);
        output.write(4, 0, "far", &[]);
        output.clip_vertically(0, 0);
        output.write(0, 1, "low", &[]);
        assert_eq!(flat(&output), "\n");
    }

    #[test]
    fn empty_clip_hides_everything() {
        let mut output = Output::new(10, 1);
        output.clip_horizontally(4, 3);
        output.write(0, 0, "text", &[]);
        assert_eq!(flat(&output), "");
    }

    #[test]
    fn reset_clipping_lifts_bounds() {
        let mut output = Output::new(10, 1);
        output.clip_horizontally(0, 1);
        output.reset_clipping();
        output.write(0, 0, "open", &[]);
        assert_eq!(flat(&output), "open");
    }

    #[test]
    fn out_of_bounds_writes_are_clamped() {
        let mut output = Output::new(4, 2);
        output.write(-2, -1, "ab\ncdef\nghijkl", &[]);
        output.write(3, 1, "xyz", &[]);
        assert_eq!(flat(&output), "ef\nijkx");
    }

    #[test]
    fn transformer_sees_clipped_line() {
        let mut output = Output::new(10, 1);
        output.clip_horizontally(0, 2);
        output.write(0, 0, "abcdef", &[transformer(|line| format!("[{line}]"))]);
        assert_eq!(flat(&output), "[abc]");
    }

    #[test]
    fn transformers_apply_in_order() {
        let mut output = Output::new(10, 1);
        let outer = transformer(|line| format!("<{line}>"));
        let inner = transformer(|line| line.to_uppercase());
        output.write(0, 0, "ab", &[inner, outer]);
        assert_eq!(flat(&output), "<AB>");
    }

    #[test]
    fn splice_keeps_surrounding_style() {
        let mut output = Output::new(6, 1);
        output.write(0, 0, "\x1b[31mXXXX\x1b[39m", &[]);
        output.write(1, 0, "oo", &[]);
        assert_eq!(
            flat(&output),
            "\x1b[31mX\x1b[39moo\x1b[31mX\x1b[39m"
        );
    }

    #[test]
    fn styled_writes_on_one_row_stay_linear() {
        let red = transformer(|line| format!("\x1b[31m{line}\x1b[39m"));
        let mut output = Output::new(30, 1);
        for col in 0..20 {
            output.write(col, 0, "x", &[red.clone()]);
        }
        assert_eq!(flat(&output), "\x1b[31mx\x1b[39m".repeat(20));
    }

    #[test]
    fn overwrite_inside_styled_run_reopens_once() {
        let mut output = Output::new(8, 1);
        output.write(0, 0, "\x1b[1m\x1b[32mabcdef\x1b[39m\x1b[22m", &[]);
        output.write(2, 0, "--", &[]);
        output.write(3, 0, "+", &[]);
        assert_eq!(
            flat(&output),
            "\x1b[32;1mab\x1b[39;22m-+\x1b[32;1mef\x1b[39m\x1b[22m"
        );
    }

    #[test]
    fn wide_char_overwritten_by_half() {
        let mut output = Output::new(4, 1);
        output.write(0, 0, "你好", &[]);
        output.write(1, 0, "a", &[]);
        assert_eq!(flat(&output), " a好");
    }

    #[test]
    fn flatten_is_idempotent() {
        let mut output = Output::new(5, 2);
        output.clip_vertically(1, 1);
        output.write(0, 0, "one\ntwo", &[]);
        assert_eq!(output.flatten(), output.flatten());
        assert_eq!(flat(&output), "\ntwo");
    }

    #[test]
    fn apply_clip_emits_both_axes() {
        let mut output = Output::new(1, 1);
        output.apply_clip(
            ClipRegion::NONE
                .clip_horizontal(ClipSpan::new(0, 1))
                .clip_vertical(ClipSpan::new(2, 3)),
        );
        assert_eq!(output.operations().len(), 2);
    }
}
