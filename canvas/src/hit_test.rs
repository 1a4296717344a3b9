use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn handles_for(x: f64, y: f64, w: f64, h: f64) -> HandlePoints {
    resize_handles(&Bounds::new(x, y, w, h))
}

// =============================================================
// Handle
// =============================================================

#[test]
fn handle_edges() {
    assert!(Handle::Nw.moves_left_edge() && Handle::Nw.moves_top_edge());
    assert!(!Handle::Ne.moves_left_edge() && Handle::Ne.moves_top_edge());
    assert!(Handle::Sw.moves_left_edge() && !Handle::Sw.moves_top_edge());
    assert!(!Handle::Se.moves_left_edge() && !Handle::Se.moves_top_edge());
}

#[test]
fn handle_cursors_pair_diagonals() {
    assert_eq!(Handle::Nw.cursor(), Handle::Se.cursor());
    assert_eq!(Handle::Ne.cursor(), Handle::Sw.cursor());
    assert_ne!(Handle::Nw.cursor(), Handle::Ne.cursor());
}

#[test]
fn handle_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Handle::Se).unwrap(), "\"se\"");
}

// =============================================================
// resize_handles
// =============================================================

#[test]
fn handles_sit_on_corners() {
    let h = handles_for(10.0, 20.0, 100.0, 50.0);
    assert_eq!(h.nw, pt(10.0, 20.0));
    assert_eq!(h.ne, pt(110.0, 20.0));
    assert_eq!(h.sw, pt(10.0, 70.0));
    assert_eq!(h.se, pt(110.0, 70.0));
}

#[test]
fn iter_follows_priority_order() {
    let h = handles_for(0.0, 0.0, 10.0, 10.0);
    let order: Vec<Handle> = h.iter().map(|(h, _)| h).collect();
    assert_eq!(order, Handle::ALL.to_vec());
}

// =============================================================
// hit_test_handle
// =============================================================

#[test]
fn hit_exact_corner() {
    let h = handles_for(100.0, 100.0, 200.0, 100.0);
    assert_eq!(hit_test_handle(pt(300.0, 200.0), &h, 5.0), Some(Handle::Se));
    assert_eq!(hit_test_handle(pt(100.0, 100.0), &h, 5.0), Some(Handle::Nw));
}

#[test]
fn hit_within_tolerance_box() {
    let h = handles_for(100.0, 100.0, 200.0, 100.0);
    assert_eq!(hit_test_handle(pt(305.0, 95.0), &h, 5.0), Some(Handle::Ne));
    assert_eq!(hit_test_handle(pt(96.0, 204.0), &h, 5.0), Some(Handle::Sw));
}

#[test]
fn miss_outside_tolerance() {
    let h = handles_for(100.0, 100.0, 200.0, 100.0);
    assert_eq!(hit_test_handle(pt(306.0, 200.0), &h, 5.0), None);
    assert_eq!(hit_test_handle(pt(200.0, 150.0), &h, 5.0), None);
}

#[test]
fn overlapping_boxes_prefer_nw_then_ne() {
    // 4x4 element: every handle box covers the center.
    let h = handles_for(0.0, 0.0, 4.0, 4.0);
    assert_eq!(hit_test_handle(pt(2.0, 2.0), &h, 5.0), Some(Handle::Nw));
    // Right of center is outside nw's box, equidistant from ne and se.
    assert_eq!(hit_test_handle(pt(8.0, 2.0), &h, 5.0), Some(Handle::Ne));
}

#[test]
fn overlapping_boxes_pick_nearest_handle() {
    let h = handles_for(0.0, 0.0, 4.0, 4.0);
    assert_eq!(hit_test_handle(pt(3.5, 3.5), &h, 5.0), Some(Handle::Se));
    assert_eq!(hit_test_handle(pt(0.5, 3.0), &h, 5.0), Some(Handle::Sw));
    assert_eq!(hit_test_handle(pt(3.0, 1.0), &h, 5.0), Some(Handle::Ne));
}

#[test]
fn zero_tolerance_needs_exact_hit() {
    let h = handles_for(0.0, 0.0, 100.0, 100.0);
    assert_eq!(hit_test_handle(pt(100.0, 100.0), &h, 0.0), Some(Handle::Se));
    assert_eq!(hit_test_handle(pt(100.5, 100.0), &h, 0.0), None);
}
