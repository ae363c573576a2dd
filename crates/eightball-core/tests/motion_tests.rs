use eightball_core::easing::{damp, ease_in_out_cubic, ease_out_cubic, wrap_angle};
use eightball_core::motion::{full_motion, idle_pose, reduced_motion};
use eightball_core::{Pose, ANTICIPATION_END, FLIGHT_END, SPIN_TURNS};
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

fn close(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn pose_close(a: &Pose, b: &Pose, eps: f32) -> bool {
    (a.offset - b.offset).abs().max_element() <= eps
        && (a.rotation - b.rotation).abs().max_element() <= eps
        && (a.scale - b.scale).abs().max_element() <= eps
}

#[test]
fn easing_endpoints() {
    assert!(close(ease_out_cubic(0.0), 0.0, 1e-6));
    assert!(close(ease_out_cubic(1.0), 1.0, 1e-6));
    assert!(close(ease_in_out_cubic(0.0), 0.0, 1e-6));
    assert!(close(ease_in_out_cubic(0.5), 0.5, 1e-6));
    assert!(close(ease_in_out_cubic(1.0), 1.0, 1e-6));
    // out of range input is clamped
    assert!(close(ease_out_cubic(2.0), 1.0, 1e-6));
    assert!(close(ease_in_out_cubic(-1.0), 0.0, 1e-6));
}

#[test]
fn damping_is_frame_rate_independent() {
    let one = damp(0.0, 1.0, 6.0, 0.032);
    let two = damp(damp(0.0, 1.0, 6.0, 0.016), 1.0, 6.0, 0.016);
    assert!(close(one, two, 1e-5), "{one} vs {two}");
    // zero dt does not move
    assert_eq!(damp(0.3, 1.0, 6.0, 0.0), 0.3);
}

#[test]
fn wrap_angle_stays_in_half_open_range() {
    for i in -200..=200 {
        let a = i as f32 * 0.37;
        let w = wrap_angle(a);
        assert!(w > -PI - 1e-5 && w <= PI + 1e-5, "{a} -> {w}");
        // same orientation
        assert!(close(w.sin(), a.sin(), 1e-3) && close(w.cos(), a.cos(), 1e-3));
    }
    assert!(close(wrap_angle(TAU * 3.0), 0.0, 1e-4));
}

#[test]
fn full_motion_starts_and_ends_at_rest() {
    let start = full_motion(0.0);
    assert!(pose_close(&start, &Pose::IDENTITY, 1e-5), "{:?}", start);

    let end = full_motion(1.0);
    assert!(end.offset.length() < 1e-3, "{:?}", end.offset);
    assert!((end.scale - Vec3::ONE).abs().max_element() < 1e-3);
    // spin lands on whole turns
    for (axis, turns) in SPIN_TURNS.iter().enumerate() {
        assert!(
            close(end.rotation[axis], TAU * turns, 1e-2),
            "axis {axis}: {}",
            end.rotation[axis]
        );
        assert!(close(wrap_angle(end.rotation[axis]), 0.0, 1e-2));
    }
}

#[test]
fn full_motion_is_continuous_at_phase_boundaries() {
    let h = 1e-4;
    for boundary in [ANTICIPATION_END, FLIGHT_END] {
        let before = full_motion(boundary - h);
        let at = full_motion(boundary);
        let after = full_motion(boundary + h);
        assert!(
            close(before.offset.y, after.offset.y, 5e-3),
            "offset jump at {boundary}: {} vs {}",
            before.offset.y,
            after.offset.y
        );
        assert!(close(at.offset.y, after.offset.y, 5e-3));
        assert!((before.scale - after.scale).abs().max_element() < 5e-3);
        assert!((before.rotation - after.rotation).abs().max_element() < 1e-2);
    }
}

#[test]
fn full_motion_has_no_large_steps_anywhere() {
    let steps = 2000;
    let mut prev = full_motion(0.0);
    for i in 1..=steps {
        let p = i as f32 / steps as f32;
        let cur = full_motion(p);
        assert!((cur.offset - prev.offset).abs().max_element() < 0.02, "offset step at {p}");
        assert!((cur.scale - prev.scale).abs().max_element() < 0.02, "scale step at {p}");
        prev = cur;
    }
}

#[test]
fn full_motion_crouches_then_jumps() {
    let crouch = full_motion(ANTICIPATION_END);
    assert!(crouch.offset.y < -0.1);
    assert!(crouch.scale.y < 1.0 && crouch.scale.x > 1.0);
    let apex = full_motion((ANTICIPATION_END + FLIGHT_END) * 0.5);
    assert!(apex.offset.y > 0.3);
}

#[test]
fn squash_and_stretch_preserve_volume() {
    for i in 0..=100 {
        let p = i as f32 / 100.0;
        for pose in [full_motion(p), reduced_motion(p)] {
            let v = pose.scale.x * pose.scale.y * pose.scale.z;
            assert!(close(v, 1.0, 1e-3), "volume {v} at {p}");
        }
    }
}

#[test]
fn reduced_motion_is_a_small_pulse_without_travel() {
    assert!(pose_close(&reduced_motion(0.0), &Pose::IDENTITY, 1e-5));
    assert!(pose_close(&reduced_motion(1.0), &Pose::IDENTITY, 1e-4));
    for i in 0..=50 {
        let pose = reduced_motion(i as f32 / 50.0);
        assert_eq!(pose.offset, Vec3::ZERO);
        assert!(pose.rotation.abs().max_element() <= 0.2);
    }
}

#[test]
fn idle_pose_tilts_toward_pointer() {
    let t = 0.0;
    let neutral = idle_pose(t, Vec2::ZERO);
    let right = idle_pose(t, Vec2::new(1.0, 0.0));
    let up = idle_pose(t, Vec2::new(0.0, 1.0));
    assert!(right.rotation.y > neutral.rotation.y);
    assert!(up.rotation.x < neutral.rotation.x);
    assert_eq!(neutral.scale, Vec3::ONE);
}

#[test]
fn idle_pose_stays_small() {
    for i in 0..600 {
        let pose = idle_pose(i as f32 * 0.1, Vec2::new(1.0, -1.0));
        assert!(pose.offset.y.abs() <= 0.05);
        assert!(pose.rotation.abs().max_element() < 0.6);
    }
}

#[test]
fn damp_toward_converges() {
    let mut pose = Pose::IDENTITY;
    let target = full_motion(0.5);
    for _ in 0..200 {
        pose.damp_toward(&target, 14.0, 0.016);
    }
    assert!(pose_close(&pose, &target, 1e-3));
}
