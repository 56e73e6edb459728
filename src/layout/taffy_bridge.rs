//! Taffy Bridge - Integration with Taffy layout engine
//!
//! Converts [`Element`] styles to Taffy styles, runs layout computation and
//! reads the results back as a [`PositionedNode`] tree.
//!
//! Text leaves are measured with the same width and wrapping routines the
//! compositor renders them with, so a leaf is always laid out exactly as
//! tall as its wrapped text.

use taffy::{
    AvailableSpace, Dimension as TaffyDimension, Display as TaffyDisplay,
    FlexDirection as TaffyFlexDirection, LengthPercentage, LengthPercentageAuto, NodeId,
    Overflow as TaffyOverflow, Rect, Size, Style, TaffyTree,
};

use crate::engine::{Edges, Geometry, NodeKind, NodeStyle, PositionedNode};
use crate::error::{RenderError, Result};
use crate::pipeline::squash_text_nodes;
use crate::types::{Dimension, Display, FlexDirection, Overflow, TextWrap};

use super::element::{Element, ElementKind};
use super::text_measure::measure_text;
use super::text_wrap::{DefaultTextWrapper, TextWrapper};

// =============================================================================
// CONVERSIONS
// =============================================================================

fn to_taffy_dimension(dim: Dimension) -> TaffyDimension {
    match dim {
        Dimension::Auto => TaffyDimension::Auto,
        Dimension::Cells(n) => TaffyDimension::Length(f32::from(n)),
        Dimension::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

fn to_taffy_flex_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::Row => TaffyFlexDirection::Row,
        FlexDirection::ColumnReverse => TaffyFlexDirection::ColumnReverse,
        FlexDirection::RowReverse => TaffyFlexDirection::RowReverse,
    }
}

fn to_taffy_overflow(overflow: Overflow) -> TaffyOverflow {
    match overflow {
        Overflow::Visible => TaffyOverflow::Visible,
        Overflow::Hidden => TaffyOverflow::Clip,
    }
}

fn length_rect(edges: Edges) -> Rect<LengthPercentage> {
    Rect {
        top: LengthPercentage::Length(edges.top as f32),
        right: LengthPercentage::Length(edges.right as f32),
        bottom: LengthPercentage::Length(edges.bottom as f32),
        left: LengthPercentage::Length(edges.left as f32),
    }
}

fn length_auto_rect(edges: Edges) -> Rect<LengthPercentageAuto> {
    Rect {
        top: LengthPercentageAuto::Length(edges.top as f32),
        right: LengthPercentageAuto::Length(edges.right as f32),
        bottom: LengthPercentageAuto::Length(edges.bottom as f32),
        left: LengthPercentageAuto::Length(edges.left as f32),
    }
}

fn round_edges(rect: Rect<f32>) -> Edges {
    Edges::new(
        rect.top.round() as i32,
        rect.right.round() as i32,
        rect.bottom.round() as i32,
        rect.left.round() as i32,
    )
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

/// Build a Taffy Style from an element.
fn build_style(element: &Element) -> Style {
    let style = &element.style;
    let border = if style.border_style.is_none() {
        Edges::ZERO
    } else {
        Edges::all(1)
    };

    let mut taffy_style = Style {
        display: match style.display {
            Display::Flex => TaffyDisplay::Flex,
            Display::None => TaffyDisplay::None,
        },
        flex_direction: to_taffy_flex_direction(style.flex_direction),
        flex_grow: style.flex_grow,
        flex_shrink: style.flex_shrink,
        size: Size {
            width: to_taffy_dimension(style.width),
            height: to_taffy_dimension(style.height),
        },
        min_size: Size {
            width: to_taffy_dimension(style.min_width),
            height: to_taffy_dimension(style.min_height),
        },
        max_size: Size {
            width: to_taffy_dimension(style.max_width),
            height: to_taffy_dimension(style.max_height),
        },
        margin: length_auto_rect(style.margin),
        padding: length_rect(style.padding),
        border: length_rect(border),
        overflow: taffy::Point {
            x: to_taffy_overflow(style.overflow_x),
            y: to_taffy_overflow(style.overflow_y),
        },
        ..Default::default()
    };

    // Text may shrink below its widest word and wraps instead.
    if element.is_text() && style.min_width == Dimension::Auto {
        taffy_style.min_size.width = TaffyDimension::Length(0.0);
    }

    taffy_style
}

// =============================================================================
// TEXT MEASUREMENT
// =============================================================================

/// Measure context stored on text leaves.
struct TextContext {
    text: String,
    wrap: TextWrap,
}

/// Measure a text leaf: its natural size, or its size after fitting to a
/// narrower definite width.
fn measure_text_node<W>(
    context: &TextContext,
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
    wrapper: &W,
    error: &mut Option<RenderError>,
) -> Size<f32>
where
    W: TextWrapper + ?Sized,
{
    if let Size {
        width: Some(width),
        height: Some(height),
    } = known_dimensions
    {
        return Size { width, height };
    }

    let (mut width, mut height) = measure_text(&context.text);

    let limit = known_dimensions.width.or(match available_space.width {
        AvailableSpace::Definite(w) => Some(w),
        AvailableSpace::MinContent | AvailableSpace::MaxContent => None,
    });

    // A limit below one cell is the flex algorithm probing for room; the
    // text does not fit and keeps its natural size.
    if let Some(limit) = limit.filter(|limit| *limit >= 1.0 && (width as f32) > *limit) {
        match wrapper.wrap(&context.text, limit as usize, context.wrap) {
            Ok(wrapped) => (width, height) = measure_text(&wrapped),
            Err(err) => {
                if error.is_none() {
                    *error = Some(err);
                }
            }
        }
    }

    Size {
        width: known_dimensions.width.unwrap_or(width as f32),
        height: known_dimensions.height.unwrap_or(height as f32),
    }
}

// =============================================================================
// TREE BUILDING
// =============================================================================

/// Text children of a text element, as runs of a text leaf.
fn text_runs(element: &Element) -> Vec<PositionedNode> {
    element
        .children
        .iter()
        .filter_map(|child| match &child.kind {
            ElementKind::Text(text) => Some(
                PositionedNode::text(text.clone(), Geometry::default())
                    .with_style(node_style(child))
                    .with_children(text_runs(child)),
            ),
            ElementKind::Root | ElementKind::Box => None,
        })
        .collect()
}

fn node_style(element: &Element) -> NodeStyle {
    let style = &element.style;
    NodeStyle {
        overflow_x: style.overflow_x,
        overflow_y: style.overflow_y,
        text_wrap: style.text_wrap,
        transform: style.transform.clone(),
        border_style: style.border_style,
        border_color: style.border_color,
    }
}

fn build_node(
    tree: &mut TaffyTree<TextContext>,
    element: &Element,
    columns: Option<u16>,
) -> Result<NodeId> {
    let mut style = build_style(element);
    if let Some(columns) = columns {
        style.size.width = TaffyDimension::Length(f32::from(columns));
    }

    let node = match &element.kind {
        ElementKind::Text(text) => {
            let leaf = PositionedNode::text(text.clone(), Geometry::default())
                .with_children(text_runs(element));
            let context = TextContext {
                text: squash_text_nodes(&leaf),
                wrap: element.style.text_wrap,
            };
            tree.new_leaf_with_context(style, context)?
        }
        ElementKind::Root | ElementKind::Box => {
            let children = element
                .children
                .iter()
                .map(|child| build_node(tree, child, None))
                .collect::<Result<Vec<_>>>()?;
            tree.new_with_children(style, &children)?
        }
    };

    Ok(node)
}

fn to_positioned(
    tree: &TaffyTree<TextContext>,
    node: NodeId,
    element: &Element,
) -> Result<PositionedNode> {
    let layout = tree.layout(node)?;
    let geometry = Geometry {
        left: layout.location.x.round() as i32,
        top: layout.location.y.round() as i32,
        width: layout.size.width.round() as i32,
        height: layout.size.height.round() as i32,
        border: round_edges(layout.border),
        padding: round_edges(layout.padding),
        display: element.style.display,
    };

    let (kind, children) = match &element.kind {
        ElementKind::Text(text) => (NodeKind::Text(text.clone()), text_runs(element)),
        ElementKind::Root | ElementKind::Box => {
            let kind = if element.kind == ElementKind::Root {
                NodeKind::Root
            } else {
                NodeKind::Container
            };
            let children = tree
                .children(node)?
                .into_iter()
                .zip(&element.children)
                .map(|(child, child_element)| to_positioned(tree, child, child_element))
                .collect::<Result<Vec<_>>>()?;
            (kind, children)
        }
    };

    Ok(PositionedNode {
        kind,
        layout: geometry,
        style: node_style(element),
        is_static: element.is_static,
        children,
    })
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Lay out `element` in a terminal `columns` wide, with unbounded height.
///
/// The top element is given a width of exactly `columns`.
pub fn compute_layout(element: &Element, columns: u16) -> Result<PositionedNode> {
    compute_layout_with_wrapper(element, columns, &DefaultTextWrapper)
}

/// [`compute_layout`] with a custom [`TextWrapper`] for measuring text.
///
/// Use the same wrapper for rendering, or text may be laid out with a
/// different number of lines than it renders with.
pub fn compute_layout_with_wrapper<W>(
    element: &Element,
    columns: u16,
    wrapper: &W,
) -> Result<PositionedNode>
where
    W: TextWrapper + ?Sized,
{
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("compute_layout", columns).entered();

    let mut tree: TaffyTree<TextContext> = TaffyTree::new();
    let root = build_node(&mut tree, element, Some(columns))?;

    let available = Size {
        width: AvailableSpace::Definite(f32::from(columns)),
        height: AvailableSpace::MaxContent,
    };

    let mut wrap_error = None;
    tree.compute_layout_with_measure(
        root,
        available,
        |known_dimensions, available_space, _node_id, context, _style| match context {
            Some(context) => measure_text_node(
                context,
                known_dimensions,
                available_space,
                wrapper,
                &mut wrap_error,
            ),
            None => Size::ZERO,
        },
    )?;

    if let Some(err) = wrap_error {
        return Err(err);
    }

    to_positioned(&tree, root, element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BorderStyle;

    #[test]
    fn test_root_takes_terminal_width() {
        let node = compute_layout(&Element::root(), 80).unwrap();
        assert_eq!(node.kind, NodeKind::Root);
        assert_eq!(node.layout.width, 80);
        assert_eq!(node.layout.height, 0);
    }

    #[test]
    fn test_parent_child() {
        let tree = Element::root().child(Element::boxed().width(40).height(10).child(
            Element::boxed().width(20).height(5),
        ));
        let root = compute_layout(&tree, 80).unwrap();

        let parent = &root.children[0];
        assert_eq!(parent.kind, NodeKind::Container);
        assert_eq!((parent.layout.width, parent.layout.height), (40, 10));
        let child = &parent.children[0];
        assert_eq!((child.layout.left, child.layout.top), (0, 0));
        assert_eq!((child.layout.width, child.layout.height), (20, 5));
    }

    #[test]
    fn test_box_lays_out_row() {
        let tree = Element::root().child(
            Element::boxed()
                .child(Element::boxed().width(3).height(1))
                .child(Element::boxed().width(4).height(1)),
        );
        let root = compute_layout(&tree, 20).unwrap();
        let row = &root.children[0];
        assert_eq!(row.children[1].layout.left, 3);
        assert_eq!(row.children[1].layout.top, 0);
    }

    #[test]
    fn test_text_measured() {
        let tree = Element::root().child(Element::boxed().child(Element::text("Hello\nWorld!")));
        let root = compute_layout(&tree, 80).unwrap();
        let text = &root.children[0].children[0];
        assert_eq!((text.layout.width, text.layout.height), (6, 2));
        assert_eq!(root.layout.height, 2);
    }

    #[test]
    fn test_text_wraps_in_narrow_box() {
        let tree = Element::root()
            .child(Element::boxed().width(5).child(Element::text("Hello World")));
        let root = compute_layout(&tree, 80).unwrap();
        let text = &root.children[0].children[0];
        assert_eq!(text.layout.width, 5);
        assert_eq!(text.layout.height, 2);
    }

    #[test]
    fn test_border_and_padding_read_back() {
        let tree = Element::root().child(
            Element::boxed()
                .border(BorderStyle::Single)
                .padding(Edges::new(0, 2, 0, 1))
                .child(Element::text("x")),
        );
        let root = compute_layout(&tree, 20).unwrap();
        let boxed = &root.children[0];
        assert_eq!(boxed.layout.border, Edges::all(1));
        assert_eq!(boxed.layout.padding, Edges::new(0, 2, 0, 1));
        assert_eq!(boxed.children[0].layout.left, 2);
        assert_eq!(boxed.children[0].layout.top, 1);
    }

    #[test]
    fn test_nested_text_becomes_runs() {
        let tree = Element::root().child(Element::boxed().child(
            Element::text("ab").child(Element::text("cd").child(Element::text("ef"))),
        ));
        let root = compute_layout(&tree, 20).unwrap();
        let text = &root.children[0].children[0];
        assert_eq!(text.layout.width, 6);
        assert_eq!(text.children.len(), 1);
        assert_eq!(text.children[0].kind, NodeKind::Text("cd".into()));
        assert_eq!(text.children[0].children.len(), 1);
    }

    #[test]
    fn test_display_none_carried() {
        let tree = Element::root().child(Element::text("gone").display(Display::None));
        let root = compute_layout(&tree, 20).unwrap();
        assert_eq!(root.children[0].layout.display, Display::None);
        assert_eq!(root.layout.height, 0);
    }

    #[test]
    fn test_wrapper_error_surfaces() {
        let failing = |_: &str, _: usize, _: TextWrap| -> Result<String> {
            Err(RenderError::wrap("unavailable"))
        };
        let tree = Element::root()
            .child(Element::boxed().width(3).child(Element::text("too wide")));
        let err = compute_layout_with_wrapper(&tree, 20, &failing).unwrap_err();
        assert!(matches!(err, RenderError::Wrap(_)));
    }
}
