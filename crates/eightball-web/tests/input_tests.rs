// Host-side tests for the pure pointer and sizing helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}
mod dom {
    include!("../src/dom.rs");
}

use dom::backing_size;
use input::*;

const EPS: f32 = 1e-6;

#[test]
fn pointer_corners_map_to_unit_square_with_y_up() {
    let (left, top, w, h) = (100.0, 50.0, 200.0, 100.0);
    let tl = normalized_pointer(100.0, 50.0, left, top, w, h);
    assert!((tl[0] + 1.0).abs() < EPS && (tl[1] - 1.0).abs() < EPS);
    let br = normalized_pointer(300.0, 150.0, left, top, w, h);
    assert!((br[0] - 1.0).abs() < EPS && (br[1] + 1.0).abs() < EPS);
    let c = normalized_pointer(200.0, 100.0, left, top, w, h);
    assert!(c[0].abs() < EPS && c[1].abs() < EPS);
}

#[test]
fn pointer_outside_rect_is_clamped() {
    for (x, y) in [(-500.0, -500.0), (900.0, 20.0), (150.0, 9000.0)] {
        let p = normalized_pointer(x, y, 0.0, 0.0, 300.0, 300.0);
        assert!(p[0] >= -1.0 && p[0] <= 1.0, "x out of range: {:?}", p);
        assert!(p[1] >= -1.0 && p[1] <= 1.0, "y out of range: {:?}", p);
    }
}

#[test]
fn degenerate_rect_maps_to_center() {
    assert_eq!(normalized_pointer(10.0, 10.0, 0.0, 0.0, 0.0, 100.0), [0.0, 0.0]);
    assert_eq!(normalized_pointer(10.0, 10.0, 0.0, 0.0, 100.0, f32::NAN), [0.0, 0.0]);
}

#[test]
fn only_touch_pointers_skip_tilt() {
    assert!(tilts_with_pointer("mouse"));
    assert!(tilts_with_pointer("pen"));
    assert!(!tilts_with_pointer("touch"));
}

#[test]
fn backing_size_caps_device_pixel_ratio() {
    assert_eq!(backing_size(300.0, 200.0, 3.0, 1.8), (540, 360));
    assert_eq!(backing_size(300.0, 200.0, 1.0, 1.8), (300, 200));
    assert_eq!(backing_size(300.0, 200.0, 1.5, 1.8), (450, 300));
}

#[test]
fn backing_size_never_collapses_to_zero() {
    assert_eq!(backing_size(0.0, 0.0, 2.0, 1.8), (1, 1));
    assert_eq!(backing_size(-10.0, 40.0, 1.0, 1.8), (1, 40));
    assert_eq!(backing_size(100.0, 100.0, f64::NAN, 1.8), (100, 100));
}
