//! ## rtree2d
//!
//! A dynamic 2D R-tree spatial index. Application objects are stored keyed by their
//! axis-aligned integer bounding rectangles, and insertions, deletions, and overlap
//! searches can be interleaved freely without periodic reorganisation.
//!
//! See the [`rtree`] module for the index itself and the [`geometry`] module for the
//! rectangle algebra it is built on.

pub mod exceptions;
pub mod geometry;
pub mod rtree;
#[cfg(feature = "setup_tracing")]
mod settings;
