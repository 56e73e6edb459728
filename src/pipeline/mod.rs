//! Render Pipeline
//!
//! Connects a positioned node tree to terminal text.
//!
//! # Pipeline Architecture
//!
//! ```text
//! PositionedNode tree → render_node_to_output → Output log → flatten → text
//! ```
//!
//! ## Data Flow
//!
//! 1. **render_tree** - Walks the tree, queues writes and clip changes
//! 2. **Output::flatten** - Replays the queue onto a grid of rows
//! 3. **renderer** - Runs both for the main tree and for static content
//!
//! Both steps are pure: the same tree always renders to the same text.

pub mod render_tree;
pub mod renderer;

pub use render_tree::{WalkContext, render_node_to_output, squash_text_nodes};
pub use renderer::{RenderOptions, RenderResult, Renderer, render_to_string};
