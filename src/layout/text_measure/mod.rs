//! Text measurement for terminal rendering.
//!
//! Everything the compositor needs to reason about text by terminal column
//! rather than by byte or `char`:
//!
//! - **Width**: cell width of characters, grapheme clusters, strings and
//!   multi-line blocks
//! - **Escape scanning**: CSI, OSC, DCS/PM/APC and two-byte sequences are
//!   zero-width and never split
//! - **Slicing**: cut a styled string by column range, carrying the SGR
//!   state across the cut
//! - **Wrapping**: word wrap with hard breaks for over-long words
//! - **Truncation**: cut at the start, middle or end with an ellipsis
//!
//! Built on `unicode-width` (East Asian Width tables) and
//! `unicode-segmentation` (UAX #29 grapheme clusters).

mod ansi;
mod sgr;
mod slice;
mod truncate;
mod width;
mod wrap;

pub use ansi::{AnsiSegment, AnsiSegments, ansi_segments, has_ansi, strip_ansi};
pub use slice::{slice_ansi, slice_ansi_inner};
pub use truncate::{ELLIPSIS, TruncatePosition, truncate_line, truncate_text};
pub use width::{char_width, grapheme_width, measure_text, string_width, widest_line};
pub use wrap::{wrap_lines, wrap_text};
