//! Tree walking - turns a positioned node tree into output operations.
//!
//! # Coordinate System
//!
//! Node positions are relative to the parent. The walker carries the
//! parent's absolute origin down the recursion:
//!
//! ```text
//! absolute_position = parent_absolute + node.left/top
//! ```
//!
//! Positions can be negative; the output buffer clamps at flatten time.
//!
//! # Clipping
//!
//! A container with hidden overflow narrows the inherited [`ClipRegion`] to
//! its own box, emits it before its children and restores the inherited
//! region after them, so siblings rendered later are clipped exactly as
//! before the container was entered.
//!
//! # Traversal Order
//!
//! Depth first, children in order: border, then children. Later writes
//! overwrite earlier ones where they overlap.

use crate::engine::{NodeKind, PositionedNode};
use crate::error::Result;
use crate::layout::TextWrapper;
use crate::layout::text_measure::{slice_ansi, widest_line};
use crate::renderer::{Output, render_border};
use crate::types::{ClipRegion, ClipSpan, Display, Overflow, OutputTransformer};

/// State inherited from ancestors during the walk.
#[derive(Clone, Default)]
pub struct WalkContext {
    /// Absolute column of the parent's origin.
    pub offset_x: i32,
    /// Absolute row of the parent's origin.
    pub offset_y: i32,
    /// Columns a text leaf may occupy, set by the nearest hidden-overflow ancestor.
    pub overflow_width: Option<i32>,
    /// Lines a text leaf may occupy, set by the nearest hidden-overflow ancestor.
    pub overflow_height: Option<i32>,
    /// Most recently entered node first.
    pub transformers: Vec<OutputTransformer>,
    pub clip: ClipRegion,
    pub skip_static_elements: bool,
}

impl WalkContext {
    pub fn new(skip_static_elements: bool) -> Self {
        Self {
            skip_static_elements,
            ..Self::default()
        }
    }
}

impl std::fmt::Debug for WalkContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalkContext")
            .field("offset_x", &self.offset_x)
            .field("offset_y", &self.offset_y)
            .field("overflow_width", &self.overflow_width)
            .field("overflow_height", &self.overflow_height)
            .field("transformers", &self.transformers.len())
            .field("clip", &self.clip)
            .field("skip_static_elements", &self.skip_static_elements)
            .finish()
    }
}

/// Render `node` and its subtree into `output`.
///
/// Errors come only from the text wrapper and are returned as soon as they
/// happen; operations already queued stay in `output`.
pub fn render_node_to_output<W>(
    node: &PositionedNode,
    output: &mut Output,
    wrapper: &W,
    ctx: &WalkContext,
) -> Result<()>
where
    W: TextWrapper + ?Sized,
{
    if ctx.skip_static_elements && node.is_static {
        return Ok(());
    }

    let layout = &node.layout;
    if layout.display == Display::None {
        return Ok(());
    }

    let x = ctx.offset_x.saturating_add(layout.left);
    let y = ctx.offset_y.saturating_add(layout.top);

    let transformers = match &node.style.transform {
        Some(transform) => {
            let mut list = Vec::with_capacity(ctx.transformers.len() + 1);
            list.push(transform.clone());
            list.extend(ctx.transformers.iter().cloned());
            list
        }
        None => ctx.transformers.clone(),
    };

    match &node.kind {
        NodeKind::Text(_) => {
            let text = text_for_output(node, wrapper, ctx)?;
            output.write(x, y, &text, &transformers);
            Ok(())
        }
        NodeKind::Root | NodeKind::Container => {
            render_border(
                x,
                y,
                layout.width,
                layout.height,
                node.style.border_style,
                node.style.border_color,
                output,
            );

            let mut child_ctx = WalkContext {
                offset_x: x,
                offset_y: y,
                transformers,
                ..ctx.clone()
            };

            if node.style.overflow_x == Overflow::Hidden {
                child_ctx.overflow_width = Some(
                    layout
                        .width
                        .saturating_sub(layout.border.right.saturating_mul(2)),
                );
                child_ctx.clip = child_ctx
                    .clip
                    .clip_horizontal(ClipSpan::from_extent(x, layout.width));
            }

            if node.style.overflow_y == Overflow::Hidden {
                child_ctx.overflow_height = Some(
                    layout
                        .height
                        .saturating_sub(layout.border.bottom.saturating_mul(2)),
                );
                child_ctx.clip = child_ctx
                    .clip
                    .clip_vertical(ClipSpan::from_extent(y, layout.height));
            }

            let clipped = child_ctx.clip != ctx.clip;
            if clipped {
                output.apply_clip(child_ctx.clip);
            }

            for child in &node.children {
                render_node_to_output(child, output, wrapper, &child_ctx)?;
            }

            if clipped {
                output.reset_clipping();
                output.apply_clip(ctx.clip);
            }
            Ok(())
        }
    }
}

/// The final text a text leaf writes: squashed, fitted to the leaf's
/// content width, offset by its first run and cut to the inherited
/// overflow limits. Empty when there is nothing to draw.
fn text_for_output<W>(node: &PositionedNode, wrapper: &W, ctx: &WalkContext) -> Result<String>
where
    W: TextWrapper + ?Sized,
{
    let mut text = squash_text_nodes(node);
    if text.is_empty() {
        return Ok(text);
    }

    let max_width = node.layout.content_width().max(0) as usize;
    if widest_line(&text) > max_width {
        #[cfg(feature = "tracing")]
        tracing::trace!(max_width, mode = ?node.style.text_wrap, "fitting text");
        text = wrapper.wrap(&text, max_width, node.style.text_wrap)?;
    }

    if let Some(first) = node.children.first() {
        text = offset_text(&text, first.layout.left, first.layout.top);
    }

    if ctx.overflow_width.is_some() || ctx.overflow_height.is_some() {
        text = clip_text(&text, ctx.overflow_width, ctx.overflow_height);
    }

    Ok(text)
}

/// Concatenate a text leaf's own text with the text of its text runs.
///
/// A run's transform applies to that run's text alone; the leaf's own
/// transform is not applied here but to every output line at write time.
/// Children that are not text are ignored.
pub fn squash_text_nodes(node: &PositionedNode) -> String {
    let mut text = match &node.kind {
        NodeKind::Text(own) => own.clone(),
        NodeKind::Root | NodeKind::Container => String::new(),
    };

    for child in node.children.iter().filter(|child| child.is_text()) {
        let run = squash_text_nodes(child);
        match &child.style.transform {
            Some(transform) if !run.is_empty() => text.push_str(&transform(&run)),
            _ => text.push_str(&run),
        }
    }

    text
}

/// Prefix `top` blank lines and indent every non-blank line by `left` spaces.
fn offset_text(text: &str, left: i32, top: i32) -> String {
    let indent = " ".repeat(left.max(0) as usize);
    let mut out = "\n".repeat(top.max(0) as usize);
    let body = text
        .split('\n')
        .map(|line| {
            if indent.is_empty() || line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    out.push_str(&body);
    out
}

/// Keep at most `max_width` columns of each line and `max_height` lines.
fn clip_text(text: &str, max_width: Option<i32>, max_height: Option<i32>) -> String {
    let limit = max_height.map_or(usize::MAX, |height| height.max(0) as usize);
    text.split('\n')
        .take(limit)
        .map(|line| match max_width {
            Some(width) => slice_ansi(line, 0, width.max(0) as usize),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
