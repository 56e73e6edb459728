//! Tree walker scenarios on hand-built positioned trees.

use std::cell::RefCell;

use pretty_assertions::assert_eq;
use spark_compositor::Result;
use spark_compositor::engine::{Edges, Geometry, NodeStyle, PositionedNode};
use spark_compositor::layout::text_measure::strip_ansi;
use spark_compositor::layout::{TextWrapper, wrap_text_mode};
use spark_compositor::pipeline::{RenderOptions, Renderer, render_to_string};
use spark_compositor::renderer::TextStyle;
use spark_compositor::types::{Attr, BorderStyle, Overflow, TextWrap, transformer};

#[derive(Default)]
struct RecordingWrapper {
    calls: RefCell<Vec<(String, usize, TextWrap)>>,
}

impl TextWrapper for RecordingWrapper {
    fn wrap(&self, text: &str, max_width: usize, mode: TextWrap) -> Result<String> {
        self.calls
            .borrow_mut()
            .push((text.to_string(), max_width, mode));
        Ok(wrap_text_mode(text, max_width, mode))
    }
}

fn text(content: &str, left: i32, top: i32, width: i32, height: i32) -> PositionedNode {
    PositionedNode::text(content, Geometry::new(left, top, width, height))
}

fn hidden(x: Overflow, y: Overflow) -> NodeStyle {
    NodeStyle {
        overflow_x: x,
        overflow_y: y,
        ..NodeStyle::default()
    }
}

#[test]
fn wrapper_sees_text_before_clipping() {
    let root = PositionedNode::root(10, 2).with_child(
        PositionedNode::container(Geometry::new(0, 0, 4, 2))
            .with_style(hidden(Overflow::Hidden, Overflow::Visible))
            .with_child(text("Hello World", 0, 0, 6, 2)),
    );

    let renderer = Renderer::with_wrapper(RenderOptions::default(), RecordingWrapper::default());
    let result = renderer.render(&root).unwrap();

    assert_eq!(
        *renderer.wrapper().calls.borrow(),
        vec![("Hello World".to_string(), 6, TextWrap::Wrap)]
    );
    assert_eq!(result.output, "Hell\nWorl");
}

#[test]
fn wrapper_not_called_when_text_fits() {
    let root = PositionedNode::root(10, 1).with_child(text("fits", 0, 0, 4, 1));
    let renderer = Renderer::with_wrapper(RenderOptions::default(), RecordingWrapper::default());
    renderer.render(&root).unwrap();
    assert!(renderer.wrapper().calls.borrow().is_empty());
}

#[test]
fn padding_narrows_text() {
    let leaf = PositionedNode::text(
        "Hello World",
        Geometry::new(0, 0, 7, 2).with_padding(Edges::new(0, 1, 0, 1)),
    );
    let root = PositionedNode::root(10, 2).with_child(leaf);
    assert_eq!(render_to_string(&root).unwrap(), "Hello\nWorld");
}

#[test]
fn truncation_modes() {
    let truncated = |mode: TextWrap| {
        let style = NodeStyle {
            text_wrap: mode,
            ..NodeStyle::default()
        };
        let root =
            PositionedNode::root(10, 1).with_child(text("Hello World", 0, 0, 6, 1).with_style(style));
        render_to_string(&root).unwrap()
    };
    assert_eq!(truncated(TextWrap::Truncate), "Hello…");
    assert_eq!(truncated(TextWrap::TruncateStart), "…World");
    assert_eq!(truncated(TextWrap::TruncateMiddle), "Hel…ld");
}

#[test]
fn first_run_offsets_text() {
    let leaf = PositionedNode::text("", Geometry::new(0, 0, 5, 2))
        .with_child(text("ab", 2, 1, 2, 1));
    let root = PositionedNode::root(5, 2).with_child(leaf);
    assert_eq!(render_to_string(&root).unwrap(), "\n  ab");
}

#[test]
fn runs_keep_their_transforms() {
    let leaf = PositionedNode::text("a", Geometry::new(0, 0, 5, 1)).with_child(
        PositionedNode::text("b", Geometry::default()).with_transform(transformer(|s| s.repeat(2))),
    );
    let root = PositionedNode::root(5, 1).with_child(leaf);
    assert_eq!(render_to_string(&root).unwrap(), "abb");
}

#[test]
fn later_sibling_overwrites_earlier() {
    let root = PositionedNode::root(8, 1)
        .with_child(text("aaaaaa", 0, 0, 6, 1))
        .with_child(text("bb", 2, 0, 2, 1));
    assert_eq!(render_to_string(&root).unwrap(), "aabbaa");
}

#[test]
fn negative_positions_are_clamped() {
    let root = PositionedNode::root(5, 1).with_child(text("Hello", -2, 0, 5, 1));
    assert_eq!(render_to_string(&root).unwrap(), "llo");
}

#[test]
fn styled_text_keeps_layout() {
    let bold = TextStyle::new().attrs(Attr::BOLD).into_transformer();
    let root = PositionedNode::root(10, 2)
        .with_child(text("bold", 0, 0, 4, 1).with_transform(bold))
        .with_child(text("plain", 0, 1, 5, 1));

    let output = render_to_string(&root).unwrap();
    assert!(output.starts_with("\x1b[1mbold\x1b[22m"));
    assert_eq!(strip_ansi(&output), "bold\nplain");
}

#[test]
fn colored_border_around_text() {
    let style = NodeStyle {
        border_style: BorderStyle::Double,
        border_color: Some(crossterm::style::Color::Green),
        ..NodeStyle::default()
    };
    let root = PositionedNode::root(6, 3).with_child(
        PositionedNode::container(Geometry::new(0, 0, 6, 3).with_border(Edges::all(1)))
            .with_style(style)
            .with_child(text("hi", 1, 1, 2, 1)),
    );
    let output = render_to_string(&root).unwrap();
    assert_eq!(strip_ansi(&output), "╔════╗\n║hi  ║\n╚════╝");
}

#[test]
fn adjacent_colored_borders_stay_compact() {
    let style = NodeStyle {
        border_style: BorderStyle::Single,
        border_color: Some(crossterm::style::Color::Red),
        ..NodeStyle::default()
    };
    let boxes = (0..8).map(|i| {
        PositionedNode::container(Geometry::new(i * 5, 0, 5, 3).with_border(Edges::all(1)))
            .with_style(style.clone())
    });
    let root = PositionedNode::root(40, 3).with_children(boxes);

    let output = render_to_string(&root).unwrap();
    assert_eq!(
        strip_ansi(&output),
        ["┌───┐".repeat(8), "│   │".repeat(8), "└───┘".repeat(8)].join("\n")
    );
    // Each of the 32 edge writes carries one colour pair and may cut one
    // styled run into two.
    assert!(output.matches('\x1b').count() <= 32 * 4);
}

#[test]
fn nested_offsets_and_clips() {
    let inner = PositionedNode::container(Geometry::new(1, 1, 3, 2))
        .with_style(hidden(Overflow::Hidden, Overflow::Hidden))
        .with_child(text("abcdef\nghijkl\nmnopqr", 0, 0, 6, 3));
    let outer = PositionedNode::container(Geometry::new(2, 0, 6, 4)).with_child(inner);
    let root = PositionedNode::root(10, 4).with_child(outer);
    assert_eq!(render_to_string(&root).unwrap(), "\n   abc\n   ghi\n");
}
