//! Element geometry: points, bounding boxes, and the drag/resize transforms.
//!
//! Everything here is a pure function of the pointer delta and the element's
//! current bounds. The input state machine decides *which* transform to run;
//! this module decides *what* the new bounds are and enforces the geometric
//! floors:
//!
//! - after a drag, `x >= 0` and `y >= 0` (right/bottom overflow is allowed);
//! - after a resize, `width >= MIN_ELEMENT_WIDTH` and `height >= MIN_ELEMENT_HEIGHT`,
//!   with the edge opposite the dragged handle pinned in place.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_ELEMENT_HEIGHT, MIN_ELEMENT_WIDTH};
use crate::hit::Handle;

/// A point in canvas space (CSS pixels, origin at the canvas top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - other`.
    #[must_use]
    pub fn delta_from(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }

    /// Squared Euclidean distance to `other`.
    #[must_use]
    pub fn distance_sq(self, other: Point) -> f64 {
        let d = self.delta_from(other);
        d.x * d.x + d.y * d.y
    }
}

/// Axis-aligned bounding box of an element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Top-left corner.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether `pt` lies inside the box, edges included.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.right() && pt.y >= self.y && pt.y <= self.bottom()
    }
}

/// Move `bounds` by `delta`, clamping the origin to the non-negative quadrant.
#[must_use]
pub fn apply_drag(bounds: Bounds, delta: Point) -> Bounds {
    Bounds {
        x: (bounds.x + delta.x).max(0.0),
        y: (bounds.y + delta.y).max(0.0),
        ..bounds
    }
}

/// Resize `bounds` by dragging `handle` by `delta`.
///
/// The corner diagonally opposite `handle` is the anchor and never moves.
/// Sizes are floored at [`MIN_ELEMENT_WIDTH`] x [`MIN_ELEMENT_HEIGHT`]; when the
/// floor kicks in on a handle that moves the origin, the origin is placed so
/// the anchored edge stays where it was instead of flipping past it.
#[must_use]
pub fn apply_resize(bounds: Bounds, handle: Handle, delta: Point) -> Bounds {
    let (x, width) = if handle.moves_left_edge() {
        resize_leading(bounds.x, bounds.width, delta.x, MIN_ELEMENT_WIDTH)
    } else {
        (bounds.x, (bounds.width + delta.x).max(MIN_ELEMENT_WIDTH))
    };
    let (y, height) = if handle.moves_top_edge() {
        resize_leading(bounds.y, bounds.height, delta.y, MIN_ELEMENT_HEIGHT)
    } else {
        (bounds.y, (bounds.height + delta.y).max(MIN_ELEMENT_HEIGHT))
    };
    Bounds { x, y, width, height }
}

/// Move the leading edge of a span by `d`, keeping the trailing edge fixed.
fn resize_leading(start: f64, len: f64, d: f64, min_len: f64) -> (f64, f64) {
    let new_len = (len - d).max(min_len);
    (start + (len - new_len), new_len)
}
