//! SGR styling of output lines.
//!
//! Styles are applied as output transformers: a composed line is wrapped in
//! opening codes and the matching closing codes. Closing codes only undo
//! what was opened (`39` for the foreground, `22` for bold, ...), so a styled
//! line nested in another styled line leaves the outer style intact after it.

use crossterm::Command;
use crossterm::style::{
    Attribute, Attributes, Color, ContentStyle, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};

use crate::types::{Attr, OutputTransformer, transformer};

/// Which colour slot of a cell a colour goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorLayer {
    Foreground,
    Background,
}

/// Attribute flag, crossterm attribute that turns it on, and the one that
/// turns it off again.
const ATTRIBUTES: [(Attr, Attribute, Attribute); 8] = [
    (Attr::BOLD, Attribute::Bold, Attribute::NormalIntensity),
    (Attr::DIM, Attribute::Dim, Attribute::NormalIntensity),
    (Attr::ITALIC, Attribute::Italic, Attribute::NoItalic),
    (Attr::UNDERLINE, Attribute::Underlined, Attribute::NoUnderline),
    (Attr::BLINK, Attribute::SlowBlink, Attribute::NoBlink),
    (Attr::INVERSE, Attribute::Reverse, Attribute::NoReverse),
    (Attr::HIDDEN, Attribute::Hidden, Attribute::NoHidden),
    (Attr::STRIKETHROUGH, Attribute::CrossedOut, Attribute::NotCrossedOut),
];

/// Colour every line of `text` on one layer.
///
/// Each line is opened and closed on its own, so the lines can be written
/// to different rows independently.
pub fn colorize(text: &str, color: Color, layer: ColorLayer) -> String {
    text.split('\n')
        .map(|line| {
            let mut out = String::with_capacity(line.len() + 24);
            // Writing into a String cannot fail.
            let _ = match layer {
                ColorLayer::Foreground => SetForegroundColor(color).write_ansi(&mut out),
                ColorLayer::Background => SetBackgroundColor(color).write_ansi(&mut out),
            };
            out.push_str(line);
            let _ = match layer {
                ColorLayer::Foreground => SetForegroundColor(Color::Reset).write_ansi(&mut out),
                ColorLayer::Background => SetBackgroundColor(Color::Reset).write_ansi(&mut out),
            };
            out
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Foreground, background and attributes for a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub attrs: Attr,
}

impl TextStyle {
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: Attr::NONE,
        }
    }

    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub const fn attrs(mut self, attrs: Attr) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_empty()
    }

    /// Wrap a single line in this style's codes.
    pub fn apply(&self, line: &str) -> String {
        if self.is_plain() {
            return line.to_string();
        }

        let content = ContentStyle::from(*self);
        let mut open = String::new();
        let mut close = String::new();

        if let Some(color) = content.foreground_color {
            let _ = SetForegroundColor(color).write_ansi(&mut open);
            let _ = SetForegroundColor(Color::Reset).write_ansi(&mut close);
        }
        if let Some(color) = content.background_color {
            let _ = SetBackgroundColor(color).write_ansi(&mut open);
            let _ = SetBackgroundColor(Color::Reset).write_ansi(&mut close);
        }
        for (_, on, off) in ATTRIBUTES {
            if content.attributes.has(on) {
                let _ = SetAttribute(on).write_ansi(&mut open);
                let _ = SetAttribute(off).write_ansi(&mut close);
            }
        }

        format!("{open}{line}{close}")
    }

    /// This style as a transformer for [`NodeStyle::transform`](crate::engine::NodeStyle).
    pub fn into_transformer(self) -> OutputTransformer {
        transformer(move |line| self.apply(line))
    }
}

impl From<TextStyle> for ContentStyle {
    fn from(style: TextStyle) -> Self {
        let mut attributes = Attributes::default();
        for (flag, on, _) in ATTRIBUTES {
            if style.attrs.contains(flag) {
                attributes.set(on);
            }
        }
        ContentStyle {
            foreground_color: style.fg,
            background_color: style.bg,
            underline_color: None,
            attributes,
        }
    }
}
