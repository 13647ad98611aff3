//! ## Custom Errors
//!
//! This module defines the errors returned or raised by the R-tree and its geometry
//! primitives.

use std::error::Error;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents errors specific to invalid operations or parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Eq)]
pub enum RTreeError {
    /// Occurs when a delete targets an object that is not in the tree.
    NotFound,
    /// Occurs when a rectangle is constructed with inverted corners.
    InvalidRectangle {
        /// The left edge that was provided.
        left: u32,
        /// The top edge that was provided.
        top: u32,
        /// The right edge that was provided.
        right: u32,
        /// The bottom edge that was provided.
        bottom: u32,
    },
}

impl fmt::Display for RTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RTreeError::NotFound => {
                write!(f, "Object not found in the tree")
            }
            RTreeError::InvalidRectangle {
                left,
                top,
                right,
                bottom,
            } => {
                write!(
                    f,
                    "Invalid rectangle: corners ({left},{top}),({right},{bottom}) are inverted. \
                     The north-west corner must not exceed the south-east corner on either axis."
                )
            }
        }
    }
}

impl Error for RTreeError {}
