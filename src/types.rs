//! Core types for spark-compositor.
//!
//! These types describe what the compositor understands: styles carried by
//! positioned nodes, border glyph tables, clip regions and output
//! transformers.

use std::sync::Arc;

// =============================================================================
// Output Transformers
// =============================================================================

/// A function rewriting one fully composed output line, e.g. to wrap it in
/// colour codes.
///
/// Transformers see a line after clipping and return the string that is
/// spliced into the output row. They must not change the line's visual width.
pub type OutputTransformer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Wrap a closure as an [`OutputTransformer`].
pub fn transformer<F>(f: F) -> OutputTransformer
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    Arc::new(f)
}

// =============================================================================
// Dimension - Supports absolute and percentage values
// =============================================================================

/// A size constraint handed to the layout engine.
///
/// ```
/// use spark_compositor::types::Dimension;
///
/// let width = Dimension::Cells(50);       // 50 characters
/// let height = Dimension::Percent(100.0); // Full parent height
/// let auto = Dimension::Auto;             // Content-determined
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    /// Size from content.
    #[default]
    Auto,
    /// Absolute size in terminal cells.
    Cells(u16),
    /// Percentage of parent size (0-100).
    Percent(f32),
}

impl From<u16> for Dimension {
    fn from(value: u16) -> Self {
        Self::Cells(value)
    }
}

impl From<i32> for Dimension {
    /// Clamps to `0..=u16::MAX` cells.
    fn from(value: i32) -> Self {
        Self::Cells(value.clamp(0, i32::from(u16::MAX)) as u16)
    }
}

// =============================================================================
// Text Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes applied by style transformers.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK = 1 << 4;
        const INVERSE = 1 << 5;
        const HIDDEN = 1 << 6;
        const STRIKETHROUGH = 1 << 7;
    }
}

// =============================================================================
// ClipRegion - For overflow handling
// =============================================================================

/// A closed interval `[start, end]` of absolute columns or rows.
///
/// `start > end` is an empty span that hides everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipSpan {
    pub start: i32,
    pub end: i32,
}

impl ClipSpan {
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Span covering `len` cells starting at `start`.
    pub const fn from_extent(start: i32, len: i32) -> Self {
        Self {
            start,
            end: start.saturating_add(len).saturating_sub(1),
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Overlap of two spans (possibly empty).
    pub fn intersect(&self, other: &ClipSpan) -> ClipSpan {
        ClipSpan {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        }
    }
}

/// The clip state in effect for a subtree: one optional span per axis.
///
/// Passed by value down the tree walk; entering a container with hidden
/// overflow narrows it, leaving the container hands the parent's region back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClipRegion {
    pub horizontal: Option<ClipSpan>,
    pub vertical: Option<ClipSpan>,
}

impl ClipRegion {
    /// No clipping on either axis.
    pub const NONE: ClipRegion = ClipRegion {
        horizontal: None,
        vertical: None,
    };

    /// Narrow the horizontal axis to `span` (intersected with any existing span).
    pub fn clip_horizontal(self, span: ClipSpan) -> Self {
        Self {
            horizontal: Some(narrow(self.horizontal, span)),
            ..self
        }
    }

    /// Narrow the vertical axis to `span` (intersected with any existing span).
    pub fn clip_vertical(self, span: ClipSpan) -> Self {
        Self {
            vertical: Some(narrow(self.vertical, span)),
            ..self
        }
    }
}

fn narrow(current: Option<ClipSpan>, span: ClipSpan) -> ClipSpan {
    match current {
        Some(existing) => existing.intersect(&span),
        None => span,
    }
}

// =============================================================================
// Border Styles
// =============================================================================

/// The six glyphs that draw a box. Every glyph is one cell wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_right: char,
    pub bottom_left: char,
}

impl BorderChars {
    pub const fn new(
        horizontal: char,
        vertical: char,
        top_left: char,
        top_right: char,
        bottom_right: char,
        bottom_left: char,
    ) -> Self {
        Self {
            horizontal,
            vertical,
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }
}

/// Border style of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    None,
    /// ─ │ ┌ ┐ └ ┘
    Single,
    /// ═ ║ ╔ ╗ ╚ ╝
    Double,
    /// ─ │ ╭ ╮ ╰ ╯
    Rounded,
    /// ━ ┃ ┏ ┓ ┗ ┛
    Bold,
    /// ┄ ┆ ┌ ┐ └ ┘
    Dashed,
    /// - | + + + +
    Ascii,
    /// █ █ █ █ █ █
    Block,
    /// ═ │ ╒ ╕ ╘ ╛ (double horizontal, single vertical)
    DoubleHorz,
    /// ─ ║ ╓ ╖ ╙ ╜ (single horizontal, double vertical)
    DoubleVert,
    /// Caller-supplied glyphs.
    Custom(BorderChars),
}

impl BorderStyle {
    /// Glyph table for this style, `None` when the style draws nothing.
    pub const fn chars(&self) -> Option<BorderChars> {
        let chars = match self {
            Self::None => return None,
            Self::Single => BorderChars::new('─', '│', '┌', '┐', '┘', '└'),
            Self::Double => BorderChars::new('═', '║', '╔', '╗', '╝', '╚'),
            Self::Rounded => BorderChars::new('─', '│', '╭', '╮', '╯', '╰'),
            Self::Bold => BorderChars::new('━', '┃', '┏', '┓', '┛', '┗'),
            Self::Dashed => BorderChars::new('┄', '┆', '┌', '┐', '┘', '└'),
            Self::Ascii => BorderChars::new('-', '|', '+', '+', '+', '+'),
            Self::Block => BorderChars::new('█', '█', '█', '█', '█', '█'),
            Self::DoubleHorz => BorderChars::new('═', '│', '╒', '╕', '╛', '╘'),
            Self::DoubleVert => BorderChars::new('─', '║', '╓', '╖', '╜', '╙'),
            Self::Custom(chars) => *chars,
        };
        Some(chars)
    }

    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// =============================================================================
// Style Enums
// =============================================================================

/// Flex direction for container layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Column,
    Row,
    ColumnReverse,
    RowReverse,
}

/// Overflow behavior on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
}

/// Whether a node takes part in rendering at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Flex,
    None,
}

/// How text wider than its node is fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextWrap {
    /// Word wrap onto further lines.
    #[default]
    Wrap,
    /// Cut the end of each line, marking it with an ellipsis.
    Truncate,
    /// Cut the middle of each line.
    TruncateMiddle,
    /// Cut the start of each line.
    TruncateStart,
}

// =============================================================================
// Tests
// =============================================================================
