//! PositionedNode - A laid-out node ready for compositing.
//!
//! The compositor never computes layout. It consumes a tree whose geometry
//! was already resolved by a layout engine (see [`crate::layout`]), with every
//! position expressed relative to the node's parent.

use std::fmt;

use crossterm::style::Color;

use crate::types::{BorderStyle, Display, Overflow, OutputTransformer, TextWrap};

/// Thickness of each edge of a box, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Edges {
    pub const ZERO: Edges = Edges::all(0);

    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn all(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    #[inline]
    pub const fn horizontal(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    #[inline]
    pub const fn vertical(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }
}

/// Computed geometry of a node.
///
/// `left`/`top` are relative to the parent's origin; sizes are the full
/// border box. Nothing here is validated: negative values render as clamped
/// or empty output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub border: Edges,
    pub padding: Edges,
    pub display: Display,
}

impl Geometry {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
            border: Edges::ZERO,
            padding: Edges::ZERO,
            display: Display::Flex,
        }
    }

    pub const fn with_border(mut self, border: Edges) -> Self {
        self.border = border;
        self
    }

    pub const fn with_padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    pub const fn with_display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    /// Columns available to content: width minus horizontal padding and border.
    pub const fn content_width(&self) -> i32 {
        self.width
            .saturating_sub(self.padding.horizontal())
            .saturating_sub(self.border.horizontal())
    }
}

/// Rendering style of a node.
#[derive(Clone, Default)]
pub struct NodeStyle {
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
    pub text_wrap: TextWrap,
    /// Rewrites every output line produced by this node's subtree.
    pub transform: Option<OutputTransformer>,
    pub border_style: BorderStyle,
    pub border_color: Option<Color>,
}

impl fmt::Debug for NodeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeStyle")
            .field("overflow_x", &self.overflow_x)
            .field("overflow_y", &self.overflow_y)
            .field("text_wrap", &self.text_wrap)
            .field("transform", &self.transform.as_ref().map(|_| "<fn>"))
            .field("border_style", &self.border_style)
            .field("border_color", &self.border_color)
            .finish()
    }
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Top of the tree; sizes the output buffer.
    Root,
    /// A box: may draw a border, clip, and hold children.
    Container,
    /// A text leaf holding its own text. Its children are text runs that
    /// are squashed into the leaf when it renders.
    Text(String),
}

/// A node of the positioned tree.
#[derive(Debug, Clone)]
pub struct PositionedNode {
    pub kind: NodeKind,
    pub layout: Geometry,
    pub style: NodeStyle,
    /// Already committed to the terminal; skipped by incremental passes.
    pub is_static: bool,
    pub children: Vec<PositionedNode>,
}

impl PositionedNode {
    pub fn new(kind: NodeKind, layout: Geometry) -> Self {
        Self {
            kind,
            layout,
            style: NodeStyle::default(),
            is_static: false,
            children: Vec::new(),
        }
    }

    pub fn root(width: i32, height: i32) -> Self {
        Self::new(NodeKind::Root, Geometry::new(0, 0, width, height))
    }

    pub fn container(layout: Geometry) -> Self {
        Self::new(NodeKind::Container, layout)
    }

    pub fn text(text: impl Into<String>, layout: Geometry) -> Self {
        Self::new(NodeKind::Text(text.into()), layout)
    }

    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_transform(mut self, transform: OutputTransformer) -> Self {
        self.style.transform = Some(transform);
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_child(mut self, child: PositionedNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = PositionedNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    /// First static node in document order, including `self`. Subtrees with
    /// `display: none` are not searched.
    pub fn find_static(&self) -> Option<&PositionedNode> {
        if self.layout.display == Display::None {
            return None;
        }
        if self.is_static {
            return Some(self);
        }
        self.children.iter().find_map(PositionedNode::find_static)
    }
}
