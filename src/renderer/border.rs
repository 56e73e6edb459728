//! Border rendering.

use crossterm::style::Color;

use super::output::Output;
use super::style::{ColorLayer, colorize};
use crate::types::BorderStyle;

/// Queue the four edges of a box border at absolute `(x, y)`.
///
/// Writes, in order: top edge with both top corners, left edge, right edge,
/// bottom edge with both bottom corners. Vertical edges cover the rows
/// between the corners. Boxes narrower or shorter than 2 cells are drawn
/// with whatever glyphs fit; nothing here panics on them.
pub fn render_border(
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    style: BorderStyle,
    color: Option<Color>,
    output: &mut Output,
) {
    let Some(chars) = style.chars() else {
        return;
    };

    let inner_width = width.saturating_sub(2).max(0) as usize;
    let inner_height = height.saturating_sub(2).max(0) as usize;

    let paint = |text: String| match color {
        Some(color) => colorize(&text, color, ColorLayer::Foreground),
        None => text,
    };

    let horizontal = chars.horizontal.to_string().repeat(inner_width);
    let top = paint(format!("{}{horizontal}{}", chars.top_left, chars.top_right));
    let bottom = paint(format!("{}{horizontal}{}", chars.bottom_left, chars.bottom_right));
    let vertical = paint(vec![chars.vertical.to_string(); inner_height].join("\n"));

    let right = x.saturating_add(width).saturating_sub(1);
    let last_row = y.saturating_add(height).saturating_sub(1);

    output.write(x, y, &top, &[]);
    output.write(x, y.saturating_add(1), &vertical, &[]);
    output.write(right, y.saturating_add(1), &vertical, &[]);
    output.write(x, last_row, &bottom, &[]);
}
