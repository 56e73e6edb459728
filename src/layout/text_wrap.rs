//! Text fitting - wrap or truncate text to a column budget.
//!
//! The tree walker and the layout bridge never call the wrapping routines
//! directly. They go through a [`TextWrapper`] so that callers can swap in
//! their own line breaking (hyphenation, locale-aware breaks) without
//! touching the compositor.

use crate::error::Result;
use crate::types::TextWrap;

use super::text_measure::{TruncatePosition, truncate_text, wrap_text};

/// Fits text into `max_width` columns according to a [`TextWrap`] mode.
///
/// Implementations must return text whose lines are at most `max_width`
/// columns wide (escape sequences excluded), except when `max_width` is 0.
pub trait TextWrapper {
    fn wrap(&self, text: &str, max_width: usize, mode: TextWrap) -> Result<String>;
}

/// The built-in wrapper: word wrap or ellipsis truncation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTextWrapper;

impl TextWrapper for DefaultTextWrapper {
    fn wrap(&self, text: &str, max_width: usize, mode: TextWrap) -> Result<String> {
        Ok(wrap_text_mode(text, max_width, mode))
    }
}

impl<F> TextWrapper for F
where
    F: Fn(&str, usize, TextWrap) -> Result<String>,
{
    fn wrap(&self, text: &str, max_width: usize, mode: TextWrap) -> Result<String> {
        self(text, max_width, mode)
    }
}

/// Apply a wrap mode to `text`.
///
/// Truncation works line by line; each line keeps its own ellipsis.
pub fn wrap_text_mode(text: &str, max_width: usize, mode: TextWrap) -> String {
    match mode {
        TextWrap::Wrap => wrap_text(text, max_width),
        TextWrap::Truncate => truncate_text(text, max_width, TruncatePosition::End),
        TextWrap::TruncateMiddle => truncate_text(text, max_width, TruncatePosition::Middle),
        TextWrap::TruncateStart => truncate_text(text, max_width, TruncatePosition::Start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    #[test]
    fn default_wraps_words() {
        let wrapped = DefaultTextWrapper
            .wrap("Hello World", 5, TextWrap::Wrap)
            .unwrap();
        assert_eq!(wrapped, "Hello\nWorld");
    }

    #[test]
    fn modes_truncate() {
        assert_eq!(wrap_text_mode("Hello World", 6, TextWrap::Truncate), "Hello…");
        assert_eq!(wrap_text_mode("Hello World", 6, TextWrap::TruncateStart), "…World");
        assert_eq!(wrap_text_mode("Hello World", 6, TextWrap::TruncateMiddle), "Hel…ld");
    }

    #[test]
    fn closure_is_a_wrapper() {
        let failing = |_: &str, _: usize, _: TextWrap| -> Result<String> {
            Err(RenderError::wrap("no dictionary"))
        };
        assert!(failing.wrap("text", 2, TextWrap::Wrap).is_err());

        let upper = |text: &str, _: usize, _: TextWrap| -> Result<String> { Ok(text.to_uppercase()) };
        assert_eq!(upper.wrap("abc", 1, TextWrap::Wrap).unwrap(), "ABC");
    }
}
