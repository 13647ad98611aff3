//! ## Geometry Primitives
//!
//! This module provides the `Point` and `Rectangle` value types used throughout the crate.
//! Rectangles are axis-aligned with non-negative integer coordinates and are described by
//! their north-west and south-east corners. All operations on rectangles are pure and
//! side-effect-free; they form the building blocks of the R-tree algorithms.

use crate::exceptions::RTreeError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point with non-negative integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Point { x, y }
    }
}

/// An axis-aligned rectangle described by its north-west and south-east corners.
///
/// Invariant: `nw.x <= se.x` and `nw.y <= se.y`. The constructor enforces this, so every
/// `Rectangle` in circulation is valid and all operations on it are total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rectangle {
    nw: Point,
    se: Point,
}

impl Rectangle {
    /// Creates a new rectangle from its north-west and south-east corners.
    ///
    /// # Panics
    ///
    /// Panics with `RTreeError::InvalidRectangle` if the corners are inverted on either
    /// axis.
    pub fn new(nw: Point, se: Point) -> Self {
        if nw.x > se.x || nw.y > se.y {
            panic!(
                "{}",
                RTreeError::InvalidRectangle {
                    left: nw.x,
                    top: nw.y,
                    right: se.x,
                    bottom: se.y,
                }
            );
        }
        Rectangle { nw, se }
    }

    /// Creates a new rectangle from its four edges.
    ///
    /// # Panics
    ///
    /// Panics with `RTreeError::InvalidRectangle` if `left > right` or `top > bottom`.
    pub fn from_edges(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Rectangle::new(Point::new(left, top), Point::new(right, bottom))
    }

    /// The north-west corner.
    pub fn nw(&self) -> Point {
        self.nw
    }

    /// The south-east corner.
    pub fn se(&self) -> Point {
        self.se
    }

    pub fn left(&self) -> u32 {
        self.nw.x
    }

    pub fn right(&self) -> u32 {
        self.se.x
    }

    pub fn top(&self) -> u32 {
        self.nw.y
    }

    pub fn bottom(&self) -> u32 {
        self.se.y
    }

    /// Horizontal extent of the rectangle.
    pub fn width(&self) -> u32 {
        self.se.x - self.nw.x
    }

    /// Vertical extent of the rectangle.
    pub fn height(&self) -> u32 {
        self.se.y - self.nw.y
    }

    /// Area covered by the rectangle. Widened to `u64` so that full-range coordinates
    /// cannot overflow.
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Length of the perimeter.
    pub fn perimeter(&self) -> u64 {
        2 * (self.width() as u64 + self.height() as u64)
    }

    /// Returns the minimum bounding rectangle of `self` and `other`: the smallest
    /// rectangle containing both.
    pub fn mbr(&self, other: &Rectangle) -> Rectangle {
        Rectangle {
            nw: Point {
                x: self.nw.x.min(other.nw.x),
                y: self.nw.y.min(other.nw.y),
            },
            se: Point {
                x: self.se.x.max(other.se.x),
                y: self.se.y.max(other.se.y),
            },
        }
    }

    /// Grows `self` in place, if required, so that `other` is included within its bounds.
    pub fn grow(&mut self, other: &Rectangle) {
        *self = self.mbr(other);
    }

    /// The area by which `self` must be enlarged to contain `a`, measured as the area of
    /// the combined minimum bounding rectangle in excess of the area of `a`.
    pub fn enlargement(&self, a: &Rectangle) -> u64 {
        self.mbr(a).area() - a.area()
    }

    /// The wasted area in a minimum bounding rectangle containing `self` and `b`: the mbr
    /// area in excess of the two individual areas. Negative when the rectangles overlap,
    /// so a higher value means the two rectangles are worse partners.
    pub fn waste(&self, b: &Rectangle) -> i64 {
        self.mbr(b).area() as i64 - self.area() as i64 - b.area() as i64
    }

    /// True only when the rectangles share no common area. Rectangles that merely touch
    /// at an edge or corner count as separate.
    pub fn is_separate(&self, b: &Rectangle) -> bool {
        self.right() <= b.left()
            || b.right() <= self.left()
            || self.bottom() <= b.top()
            || b.bottom() <= self.top()
    }

    /// True when `self` and `b` overlap.
    pub fn overlaps(&self, b: &Rectangle) -> bool {
        !self.is_separate(b)
    }

    /// True when every edge of `self` lies within or on the corresponding edge of `mbr`.
    pub fn is_subset(&self, mbr: &Rectangle) -> bool {
        mbr.left() <= self.left()
            && self.right() <= mbr.right()
            && mbr.top() <= self.top()
            && self.bottom() <= mbr.bottom()
    }

    /// Area of the overlap between `self` and `b`, or zero when they are separate.
    pub fn overlap_area(&self, b: &Rectangle) -> u64 {
        if self.is_separate(b) {
            return 0;
        }
        let overlap = Rectangle {
            nw: Point {
                x: self.nw.x.max(b.nw.x),
                y: self.nw.y.max(b.nw.y),
            },
            se: Point {
                x: self.se.x.min(b.se.x),
                y: self.se.y.min(b.se.y),
            },
        };
        overlap.area()
    }
}
