//! Element - a styled, unpositioned node tree handed to the layout bridge.
//!
//! Elements describe *what* to lay out; [`compute_layout`](super::compute_layout)
//! turns them into [`PositionedNode`](crate::engine::PositionedNode)s.
//!
//! ```
//! use spark_compositor::layout::Element;
//! use spark_compositor::types::{BorderStyle, Overflow};
//!
//! let tree = Element::root().child(
//!     Element::boxed()
//!         .width(6)
//!         .border(BorderStyle::Rounded)
//!         .overflow_x(Overflow::Hidden)
//!         .child(Element::text("Hello World")),
//! );
//! ```

use crossterm::style::Color;

use crate::engine::Edges;
use crate::types::{
    BorderStyle, Dimension, Display, FlexDirection, Overflow, OutputTransformer, TextWrap,
};

/// What an element is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Root,
    Box,
    /// Text leaf. Text children become runs of this leaf.
    Text(String),
}

/// Layout and render style of an element.
#[derive(Clone)]
pub struct ElementStyle {
    pub width: Dimension,
    pub height: Dimension,
    pub min_width: Dimension,
    pub min_height: Dimension,
    pub max_width: Dimension,
    pub max_height: Dimension,
    pub flex_direction: FlexDirection,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub padding: Edges,
    pub margin: Edges,
    pub border_style: BorderStyle,
    pub border_color: Option<Color>,
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
    pub text_wrap: TextWrap,
    pub display: Display,
    pub transform: Option<OutputTransformer>,
}

impl Default for ElementStyle {
    /// Box defaults: row direction, shrinkable, not growing.
    fn default() -> Self {
        Self {
            width: Dimension::Auto,
            height: Dimension::Auto,
            min_width: Dimension::Auto,
            min_height: Dimension::Auto,
            max_width: Dimension::Auto,
            max_height: Dimension::Auto,
            flex_direction: FlexDirection::Row,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            padding: Edges::ZERO,
            margin: Edges::ZERO,
            border_style: BorderStyle::None,
            border_color: None,
            overflow_x: Overflow::Visible,
            overflow_y: Overflow::Visible,
            text_wrap: TextWrap::Wrap,
            display: Display::Flex,
            transform: None,
        }
    }
}

impl std::fmt::Debug for ElementStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementStyle")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("flex_direction", &self.flex_direction)
            .field("padding", &self.padding)
            .field("margin", &self.margin)
            .field("border_style", &self.border_style)
            .field("overflow_x", &self.overflow_x)
            .field("overflow_y", &self.overflow_y)
            .field("text_wrap", &self.text_wrap)
            .field("display", &self.display)
            .field("transform", &self.transform.is_some())
            .finish_non_exhaustive()
    }
}

/// A node of the element tree.
#[derive(Debug, Clone)]
pub struct Element {
    pub kind: ElementKind,
    pub style: ElementStyle,
    pub is_static: bool,
    pub children: Vec<Element>,
}

impl Element {
    fn new(kind: ElementKind, style: ElementStyle) -> Self {
        Self {
            kind,
            style,
            is_static: false,
            children: Vec::new(),
        }
    }

    /// The top of a tree. Lays out its children in a column as wide as the
    /// terminal.
    pub fn root() -> Self {
        Self::new(ElementKind::Root, ElementStyle {
            flex_direction: FlexDirection::Column,
            ..ElementStyle::default()
        })
    }

    /// A flex container, laid out as a row by default.
    pub fn boxed() -> Self {
        Self::new(ElementKind::Box, ElementStyle::default())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(ElementKind::Text(text.into()), ElementStyle::default())
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text(_))
    }

    // -------------------------------------------------------------------------
    // Children
    // -------------------------------------------------------------------------

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    // -------------------------------------------------------------------------
    // Sizing
    // -------------------------------------------------------------------------

    pub fn width(mut self, width: impl Into<Dimension>) -> Self {
        self.style.width = width.into();
        self
    }

    pub fn height(mut self, height: impl Into<Dimension>) -> Self {
        self.style.height = height.into();
        self
    }

    pub fn min_width(mut self, width: impl Into<Dimension>) -> Self {
        self.style.min_width = width.into();
        self
    }

    pub fn min_height(mut self, height: impl Into<Dimension>) -> Self {
        self.style.min_height = height.into();
        self
    }

    pub fn max_width(mut self, width: impl Into<Dimension>) -> Self {
        self.style.max_width = width.into();
        self
    }

    pub fn max_height(mut self, height: impl Into<Dimension>) -> Self {
        self.style.max_height = height.into();
        self
    }

    // -------------------------------------------------------------------------
    // Flex
    // -------------------------------------------------------------------------

    pub fn flex_direction(mut self, direction: FlexDirection) -> Self {
        self.style.flex_direction = direction;
        self
    }

    pub fn flex_grow(mut self, grow: f32) -> Self {
        self.style.flex_grow = grow;
        self
    }

    pub fn flex_shrink(mut self, shrink: f32) -> Self {
        self.style.flex_shrink = shrink;
        self
    }

    // -------------------------------------------------------------------------
    // Spacing and decoration
    // -------------------------------------------------------------------------

    pub fn padding(mut self, padding: Edges) -> Self {
        self.style.padding = padding;
        self
    }

    pub fn margin(mut self, margin: Edges) -> Self {
        self.style.margin = margin;
        self
    }

    /// Draw a border. Any style other than `None` takes one cell per edge.
    pub fn border(mut self, style: BorderStyle) -> Self {
        self.style.border_style = style;
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.style.border_color = Some(color);
        self
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Set overflow on both axes.
    pub fn overflow(self, overflow: Overflow) -> Self {
        self.overflow_x(overflow).overflow_y(overflow)
    }

    pub fn overflow_x(mut self, overflow: Overflow) -> Self {
        self.style.overflow_x = overflow;
        self
    }

    pub fn overflow_y(mut self, overflow: Overflow) -> Self {
        self.style.overflow_y = overflow;
        self
    }

    pub fn text_wrap(mut self, wrap: TextWrap) -> Self {
        self.style.text_wrap = wrap;
        self
    }

    pub fn display(mut self, display: Display) -> Self {
        self.style.display = display;
        self
    }

    pub fn transform(mut self, transform: OutputTransformer) -> Self {
        self.style.transform = Some(transform);
        self
    }

    /// Mark this subtree as already committed to the terminal.
    pub fn mark_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}
