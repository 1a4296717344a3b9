#![allow(clippy::clone_on_copy)]

use super::*;
use crate::doc::new_id;

// =============================================================
// Key
// =============================================================

#[test]
fn key_new_and_as_str() {
    assert_eq!(Key::new("Delete").as_str(), "Delete");
    assert_eq!(Key::new(" ").as_str(), " ");
    assert_eq!(Key::new(String::from("Escape")), Key("Escape".into()));
}

// =============================================================
// UiState
// =============================================================

#[test]
fn ui_state_default_is_empty() {
    let ui = UiState::default();
    assert!(ui.selected_id.is_none());
    assert!(!ui.slide_dialog_open);
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    let s = InputState::default();
    assert!(s.is_idle());
    assert_eq!(s.target(), None);
}

#[test]
fn dragging_targets_element() {
    let id = new_id();
    let s = InputState::Dragging { id, offset: Point::new(5.0, 5.0) };
    assert!(!s.is_idle());
    assert_eq!(s.target(), Some(id));
}

#[test]
fn resizing_targets_element() {
    let id = new_id();
    let s = InputState::Resizing { id, handle: Handle::Se, last: Point::default() };
    assert!(!s.is_idle());
    assert_eq!(s.target(), Some(id));
}

#[test]
fn input_state_is_copy() {
    let s = InputState::Dragging { id: new_id(), offset: Point::new(1.0, 2.0) };
    let t = s.clone();
    assert_eq!(s, t);
}
