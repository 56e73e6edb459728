//! Overflow clipping, end to end: element tree → taffy layout → render.

use pretty_assertions::assert_eq;
use spark_compositor::layout::{Element, compute_layout};
use spark_compositor::pipeline::render_to_string;
use spark_compositor::types::{BorderStyle, Overflow};

const COLUMNS: u16 = 100;

fn render(tree: Element) -> String {
    let positioned = compute_layout(&Element::root().child(tree), COLUMNS).unwrap();
    render_to_string(&positioned).unwrap()
}

fn wide_text() -> Element {
    Element::boxed()
        .width(12)
        .flex_shrink(0.0)
        .child(Element::text("Hello World"))
}

fn two_lines() -> Element {
    Element::text("Hello\nWorld")
}

#[test]
fn hide_horizontal_overflow() {
    let output = render(
        Element::boxed()
            .width(6)
            .overflow_x(Overflow::Hidden)
            .child(wide_text()),
    );
    assert_eq!(output, "Hello");
}

#[test]
fn hide_horizontal_overflow_with_border() {
    let output = render(
        Element::boxed()
            .width(6)
            .overflow_x(Overflow::Hidden)
            .border(BorderStyle::Rounded)
            .child(wide_text()),
    );
    assert_eq!(output, "╭────╮\n│Hell│\n╰────╯");
}

#[test]
fn show_horizontal_overflow_with_border() {
    let output = render(
        Element::boxed()
            .width(6)
            .overflow_x(Overflow::Visible)
            .border(BorderStyle::Rounded)
            .child(wide_text()),
    );
    assert_eq!(output, "╭────╮\n│Hello World\n╰────╯");
}

#[test]
fn hide_vertical_overflow() {
    let output = render(
        Element::boxed()
            .height(1)
            .overflow_y(Overflow::Hidden)
            .child(two_lines()),
    );
    assert_eq!(output, "Hello");
}

#[test]
fn show_vertical_overflow() {
    let output = render(
        Element::boxed().height(2).child(
            Element::boxed()
                .height(1)
                .overflow_y(Overflow::Visible)
                .child(Element::boxed().height(2).child(two_lines())),
        ),
    );
    assert_eq!(output, "Hello\nWorld");
}

#[test]
fn hide_vertical_overflow_with_border() {
    let output = render(
        Element::boxed()
            .width(20)
            .height(3)
            .overflow_y(Overflow::Hidden)
            .border(BorderStyle::Rounded)
            .child(two_lines()),
    );
    assert_eq!(
        output,
        "╭──────────────────╮\n│Hello             │\n╰──────────────────╯"
    );
}

#[test]
fn show_vertical_overflow_with_border() {
    let output = render(
        Element::boxed().height(3).child(
            Element::boxed()
                .width(20)
                .height(3)
                .overflow_y(Overflow::Visible)
                .border(BorderStyle::Rounded)
                .child(Element::boxed().height(2).child(two_lines())),
        ),
    );
    assert_eq!(
        output,
        "╭──────────────────╮\n│Hello             │\n╰World─────────────╯"
    );
}

#[test]
fn hide_overflow_on_both_axes() {
    let output = render(
        Element::boxed()
            .width(4)
            .height(1)
            .overflow(Overflow::Hidden)
            .child(
                Element::boxed()
                    .width(10)
                    .height(2)
                    .flex_shrink(0.0)
                    .child(Element::text("abcdefgh\nijklmnop")),
            ),
    );
    assert_eq!(output, "abcd");
}

#[test]
fn sibling_after_hidden_box_is_not_clipped() {
    let output = render(
        Element::boxed()
            .flex_direction(spark_compositor::types::FlexDirection::Column)
            .child(
                Element::boxed()
                    .width(3)
                    .overflow_x(Overflow::Hidden)
                    .child(wide_text()),
            )
            .child(Element::text("after the clip")),
    );
    assert_eq!(output, "Hel\nafter the clip");
}
