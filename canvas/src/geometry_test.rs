#![allow(clippy::float_cmp)]

use proptest::prelude::*;

use super::*;

// =============================================================
// Helpers
// =============================================================

fn b(x: f64, y: f64, w: f64, h: f64) -> Bounds {
    Bounds::new(x, y, w, h)
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn handle() -> impl Strategy<Value = Handle> {
    prop::sample::select(Handle::ALL.to_vec())
}

/// Element bounds that already satisfy the drag and resize floors.
fn placed_bounds() -> impl Strategy<Value = Bounds> {
    (0.0..600.0_f64, 0.0..400.0_f64, MIN_ELEMENT_WIDTH..500.0, MIN_ELEMENT_HEIGHT..300.0)
        .prop_map(|(x, y, w, h)| b(x, y, w, h))
}

// =============================================================
// Point / Bounds
// =============================================================

#[test]
fn delta_from_is_componentwise_difference() {
    assert_eq!(pt(10.0, 5.0).delta_from(pt(3.0, 8.0)), pt(7.0, -3.0));
}

#[test]
fn bounds_edges() {
    let r = b(10.0, 20.0, 30.0, 40.0);
    assert_eq!(r.right(), 40.0);
    assert_eq!(r.bottom(), 60.0);
    assert_eq!(r.origin(), pt(10.0, 20.0));
}

#[test]
fn bounds_contains_includes_edges() {
    let r = b(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains(pt(0.0, 0.0)));
    assert!(r.contains(pt(10.0, 10.0)));
    assert!(r.contains(pt(5.0, 5.0)));
    assert!(!r.contains(pt(10.1, 5.0)));
    assert!(!r.contains(pt(5.0, -0.1)));
}

// =============================================================
// apply_drag
// =============================================================

#[test]
fn drag_moves_origin_keeps_size() {
    let out = apply_drag(b(100.0, 100.0, 200.0, 100.0), pt(15.0, -20.0));
    assert_eq!(out, b(115.0, 80.0, 200.0, 100.0));
}

#[test]
fn drag_clamps_to_zero() {
    let out = apply_drag(b(10.0, 10.0, 200.0, 100.0), pt(-50.0, -30.0));
    assert_eq!(out, b(0.0, 0.0, 200.0, 100.0));
}

#[test]
fn drag_allows_right_and_bottom_overflow() {
    let out = apply_drag(b(10.0, 10.0, 200.0, 100.0), pt(5000.0, 5000.0));
    assert_eq!(out.x, 5010.0);
    assert_eq!(out.y, 5010.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn drag_sequences_never_go_negative(
        start in placed_bounds(),
        deltas in prop::collection::vec((-400.0..400.0_f64, -400.0..400.0_f64), 1..50),
    ) {
        let mut r = start;
        for (dx, dy) in deltas {
            r = apply_drag(r, pt(dx, dy));
            prop_assert!(r.x >= 0.0 && r.y >= 0.0, "drag escaped the canvas: {:?}", r);
            prop_assert_eq!((r.width, r.height), (start.width, start.height));
        }
    }
}

// =============================================================
// apply_resize
// =============================================================

#[test]
fn resize_se_grows_size_only() {
    let out = apply_resize(b(100.0, 100.0, 200.0, 100.0), Handle::Se, pt(50.0, 20.0));
    assert_eq!(out, b(100.0, 100.0, 250.0, 120.0));
}

#[test]
fn resize_nw_past_floor_pins_right_edge() {
    let out = apply_resize(b(100.0, 100.0, 200.0, 100.0), Handle::Nw, pt(300.0, 0.0));
    assert_eq!(out.x, 250.0);
    assert_eq!(out.width, 50.0);
    assert_eq!(out.right(), 300.0);
    assert_eq!((out.y, out.height), (100.0, 100.0));
}

#[test]
fn resize_nw_moves_origin_within_floor() {
    let out = apply_resize(b(100.0, 100.0, 200.0, 100.0), Handle::Nw, pt(20.0, 10.0));
    assert_eq!(out, b(120.0, 110.0, 180.0, 90.0));
}

#[test]
fn resize_ne_moves_top_and_right() {
    let out = apply_resize(b(100.0, 100.0, 200.0, 100.0), Handle::Ne, pt(30.0, -40.0));
    assert_eq!(out, b(100.0, 60.0, 230.0, 140.0));
}

#[test]
fn resize_sw_moves_left_and_bottom() {
    let out = apply_resize(b(100.0, 100.0, 200.0, 100.0), Handle::Sw, pt(-30.0, 40.0));
    assert_eq!(out, b(70.0, 100.0, 230.0, 140.0));
}

#[test]
fn resize_ne_past_height_floor_pins_bottom_edge() {
    let out = apply_resize(b(0.0, 0.0, 100.0, 100.0), Handle::Ne, pt(0.0, 500.0));
    assert_eq!(out.height, 30.0);
    assert_eq!(out.bottom(), 100.0);
}

#[test]
fn resize_se_shrink_clamps_to_floor() {
    let out = apply_resize(b(10.0, 10.0, 100.0, 100.0), Handle::Se, pt(-1000.0, -1000.0));
    assert_eq!(out, b(10.0, 10.0, 50.0, 30.0));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn resize_sequences_respect_floor(
        start in placed_bounds(),
        moves in prop::collection::vec((handle(), -300.0..300.0_f64, -300.0..300.0_f64), 1..50),
    ) {
        let mut r = start;
        for (handle, dx, dy) in moves {
            let before = r;
            r = apply_resize(r, handle, pt(dx, dy));
            prop_assert!(r.width >= MIN_ELEMENT_WIDTH && r.height >= MIN_ELEMENT_HEIGHT, "floor broken: {:?}", r);
            // The anchored corner never moves.
            if handle.moves_left_edge() {
                prop_assert!((r.right() - before.right()).abs() < 1e-9);
            } else {
                prop_assert_eq!(r.x, before.x);
            }
            if handle.moves_top_edge() {
                prop_assert!((r.bottom() - before.bottom()).abs() < 1e-9);
            } else {
                prop_assert_eq!(r.y, before.y);
            }
        }
    }
}
