//! Output layer - the virtual grid every render pass draws into.
//!
//! The renderer knows nothing about nodes. It records positioned strings
//! and clip bounds, and flattens them into terminal text:
//!
//! - [`Output`]: operation log plus grid, flattened on demand
//! - [`render_border`]: box edges as four writes
//! - [`TextStyle`] / [`colorize`]: SGR wrapping used by transformers and borders

pub mod border;
pub mod output;
pub mod style;

pub use border::render_border;
pub use output::{FlattenedOutput, Operation, Output};
pub use style::{ColorLayer, TextStyle, colorize};
