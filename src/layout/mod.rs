//! Layout Module - text fitting and flexbox layout for the compositor.
//!
//! # Architecture
//!
//! - [`text_measure`]: width, slicing, wrapping and truncation of styled text
//! - [`TextWrapper`]: the seam the compositor fits text through
//! - [`Element`] + [`compute_layout`]: build a positioned tree with
//!   [Taffy](https://github.com/DioxusLabs/taffy) flexbox
//!
//! The compositor itself never lays anything out; the bridge is one way of
//! producing the [`PositionedNode`](crate::engine::PositionedNode) tree it
//! consumes.
//!
//! # Example
//!
//! ```
//! use spark_compositor::layout::{Element, compute_layout};
//! use spark_compositor::pipeline::render_to_string;
//!
//! let tree = Element::root().child(Element::boxed().width(5).child(Element::text("Hello World")));
//! let positioned = compute_layout(&tree, 80).unwrap();
//! assert_eq!(render_to_string(&positioned).unwrap(), "Hello\nWorld");
//! ```

mod element;
mod taffy_bridge;
pub mod text_measure;
mod text_wrap;

pub use element::{Element, ElementKind, ElementStyle};
pub use taffy_bridge::{compute_layout, compute_layout_with_wrapper};
pub use text_measure::{measure_text, slice_ansi, string_width, truncate_text, widest_line, wrap_text};
pub use text_wrap::{DefaultTextWrapper, TextWrapper, wrap_text_mode};
