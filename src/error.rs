//! Error type for render passes and layout.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

/// Failures surfaced by a render pass.
///
/// Malformed geometry and empty text are not errors; they render as clamped
/// or empty output. What remains are failures of collaborators, which the
/// compositor hands back unchanged.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("layout error: {0}")]
    Layout(#[from] taffy::TaffyError),

    #[error("text wrapping failed: {0}")]
    Wrap(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RenderError {
    /// Wrap any error raised by a [`TextWrapper`](crate::layout::TextWrapper).
    #[must_use]
    pub fn wrap<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Wrap(error.into())
    }
}
