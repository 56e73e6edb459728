//! # spark-compositor
//!
//! Terminal output compositor: renders a laid-out node tree into terminal
//! text.
//!
//! ## Architecture
//!
//! Rendering is two-phase. Walking the tree only records operations
//! (positioned writes and clip changes) in a virtual [`Output`]; flattening
//! replays them onto a grid of rows:
//!
//! ```text
//! Element tree → compute_layout → PositionedNode tree → render_node_to_output → Output → flatten
//! ```
//!
//! Everything that touches text measures it in terminal columns: wide
//! characters take two cells, grapheme clusters are never split and ANSI
//! escape sequences take none and are never cut.
//!
//! ## Modules
//!
//! - [`types`] - Clip regions, border styles, text attributes, transformers
//! - [`engine`] - The positioned node tree
//! - [`layout`] - Text measurement, wrapping, Taffy layout bridge
//! - [`renderer`] - Virtual output buffer, borders, SGR styling
//! - [`pipeline`] - Tree walker and frame renderer
//!
//! ## Features
//!
//! - `tracing`: debug spans around layout, render passes and flattening

pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod renderer;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{RenderError, Result};

pub use engine::{Edges, Geometry, NodeKind, NodeStyle, PositionedNode};

pub use layout::{
    DefaultTextWrapper, Element, TextWrapper, compute_layout, slice_ansi, string_width,
    widest_line, wrap_text_mode,
};

pub use renderer::{FlattenedOutput, Operation, Output, TextStyle, colorize, render_border};

pub use pipeline::{
    RenderOptions, RenderResult, Renderer, WalkContext, render_node_to_output, render_to_string,
};
