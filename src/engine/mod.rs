//! Compositor Engine - The positioned node tree.
//!
//! The engine owns the data the compositor consumes:
//! - PositionedNode: a node with resolved geometry, style and children
//! - Geometry/Edges: position, size, border and padding in cells
//! - NodeStyle: overflow, text wrap mode, border and output transform
//!
//! # Coordinates
//!
//! Every node's `left`/`top` is relative to its parent. The tree walker
//! accumulates offsets as it descends, so moving a subtree only ever
//! touches its root.

mod positioned_node;

pub use positioned_node::{Edges, Geometry, NodeKind, NodeStyle, PositionedNode};
