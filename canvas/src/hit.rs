#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point};

/// Corner handle used to start a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Handle {
    /// All handles in hit-test priority order.
    pub const ALL: [Handle; 4] = [Handle::Nw, Handle::Ne, Handle::Sw, Handle::Se];

    /// Whether dragging this handle moves the element's left edge.
    #[must_use]
    pub fn moves_left_edge(self) -> bool {
        matches!(self, Self::Nw | Self::Sw)
    }

    /// Whether dragging this handle moves the element's top edge.
    #[must_use]
    pub fn moves_top_edge(self) -> bool {
        matches!(self, Self::Nw | Self::Ne)
    }

    /// CSS cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
        }
    }
}

/// Canvas positions of the four corner handles of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandlePoints {
    pub nw: Point,
    pub ne: Point,
    pub sw: Point,
    pub se: Point,
}

impl HandlePoints {
    #[must_use]
    pub fn get(&self, handle: Handle) -> Point {
        match handle {
            Handle::Nw => self.nw,
            Handle::Ne => self.ne,
            Handle::Sw => self.sw,
            Handle::Se => self.se,
        }
    }

    /// Handles paired with their positions, in hit-test priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, Point)> + '_ {
        Handle::ALL.into_iter().map(|h| (h, self.get(h)))
    }
}

/// Corner handle positions for an element occupying `bounds`.
#[must_use]
pub fn resize_handles(bounds: &Bounds) -> HandlePoints {
    HandlePoints {
        nw: Point::new(bounds.x, bounds.y),
        ne: Point::new(bounds.right(), bounds.y),
        sw: Point::new(bounds.x, bounds.bottom()),
        se: Point::new(bounds.right(), bounds.bottom()),
    }
}

/// Return the nearest handle whose `±tolerance` box contains `pt`.
///
/// Boxes overlap on elements smaller than twice the tolerance. The closest
/// handle centre wins there, and equal distances fall back to `nw, ne, sw, se`
/// order.
#[must_use]
pub fn hit_test_handle(pt: Point, handles: &HandlePoints, tolerance: f64) -> Option<Handle> {
    handles
        .iter()
        .filter(|(_, hp)| (pt.x - hp.x).abs() <= tolerance && (pt.y - hp.y).abs() <= tolerance)
        // `min_by` keeps the first of equal minima, which is the order tie-break.
        .min_by(|(_, a), (_, b)| pt.distance_sq(*a).total_cmp(&pt.distance_sq(*b)))
        .map(|(h, _)| h)
}
