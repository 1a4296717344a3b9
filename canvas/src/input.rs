//! Input model: keys, persistent UI state, and the gesture state machine.
//!
//! `UiState` is what the renderer needs to know between events (selection,
//! whether the add-slide dialog is open). `InputState` is the active gesture
//! being tracked between pointer-down and pointer-up, carrying the context
//! needed to turn each pointer-move into new element bounds.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::ElementId;
use crate::geometry::Point;
use crate::hit::Handle;

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"ArrowLeft"`, `" "`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The element outlined with resize handles, if any.
    pub selected_id: Option<ElementId>,
    /// The "choose a slide type" dialog is showing.
    pub slide_dialog_open: bool,
}

/// Gesture state machine driven by pointer events on the canvas.
///
/// ```text
/// Idle -> Dragging   (pointer down on an element body)
/// Idle -> Resizing   (pointer down within tolerance of a corner handle)
/// Any  -> Idle       (pointer up, pointer leaves the canvas)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Moving an element; its origin follows the pointer.
    Dragging {
        id: ElementId,
        /// Pointer position minus element origin at pointer-down.
        offset: Point,
    },
    /// Resizing an element from one corner.
    Resizing {
        id: ElementId,
        handle: Handle,
        /// Pointer position at the previous event, for incremental deltas.
        last: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The element this gesture is acting on.
    #[must_use]
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Resizing { id, .. } => Some(*id),
        }
    }
}
