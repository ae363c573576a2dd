//! Closed-form motion curves.
//!
//! Every scripted pose is a pure function of normalized progress so a
//! transition can be sampled, scrubbed or resumed from progress alone.
//! Nothing here integrates velocity across frames.

use crate::constants::*;
use crate::easing::{clamp01, damp_factor, ease_in_out_cubic, ease_out_cubic, window};
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// Transform of the root node: translation, XYZ Euler rotation (radians)
/// and per-axis scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub offset: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        offset: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Scale is applied in world axes so squash/stretch stays vertical
    /// while the ball spins.
    pub fn to_matrix(&self) -> Mat4 {
        let q = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_translation(self.offset) * Mat4::from_scale(self.scale) * Mat4::from_quat(q)
    }

    pub fn damp_toward(&mut self, target: &Pose, rate: f32, dt_sec: f32) {
        let k = damp_factor(rate, dt_sec);
        self.offset += (target.offset - self.offset) * k;
        self.rotation += (target.rotation - self.rotation) * k;
        self.scale += (target.scale - self.scale) * k;
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[inline]
fn volume_preserving(sy: f32) -> Vec3 {
    let sxz = 1.0 / sy.max(1e-3).sqrt();
    Vec3::new(sxz, sy, sxz)
}

#[inline]
fn settle_envelope(s: f32) -> f32 {
    (-SETTLE_DECAY * s).exp()
}

/// Full scripted motion: anticipation, flight, settle.
pub fn full_motion(progress: f32) -> Pose {
    let p = clamp01(progress);
    let crouch = ease_out_cubic(window(p, 0.0, ANTICIPATION_END));
    let f = window(p, ANTICIPATION_END, FLIGHT_END);
    let s = window(p, FLIGHT_END, 1.0);
    let arc = (PI * f).sin();

    let (offset, sy, lean) = if p <= ANTICIPATION_END {
        (
            Vec3::new(0.0, -CROUCH_DEPTH * crouch, 0.0),
            1.0 - CROUCH_SQUASH * crouch,
            crouch,
        )
    } else if p <= FLIGHT_END {
        let release = 1.0 - f;
        let wobble = WOBBLE_AMPLITUDE * (TAU * WOBBLE_CYCLES * f).sin() * release;
        let y = -CROUCH_DEPTH * release + JUMP_HEIGHT * arc;
        let sy = 1.0 - CROUCH_SQUASH * release * release * release + FLIGHT_STRETCH * arc;
        (Vec3::new(wobble, y, 0.0), sy, release * release)
    } else {
        let env = settle_envelope(s);
        let y = SETTLE_BOUNCE * env * (SETTLE_HALF_CYCLES * PI * s).sin().abs();
        let sy = 1.0 - SETTLE_SQUASH * env * (SETTLE_HALF_CYCLES * PI * s).sin();
        (Vec3::new(0.0, y, 0.0), sy, 0.0)
    };

    // Spin runs on its own easing over the flight window and holds at whole
    // turns afterwards, so the settle wobble rides on top of it.
    let spin = ease_in_out_cubic(f);
    let settle_tilt = if p > FLIGHT_END {
        SETTLE_TILT * settle_envelope(s) * (SETTLE_HALF_CYCLES * PI * s).sin()
    } else {
        0.0
    };
    let rotation = Vec3::new(
        -CROUCH_TILT * lean + TAU * SPIN_TURNS[0] * spin,
        TAU * SPIN_TURNS[1] * spin,
        TAU * SPIN_TURNS[2] * spin + settle_tilt,
    );

    Pose {
        offset,
        rotation,
        scale: volume_preserving(sy),
    }
}

/// Reduced-motion variant: one eased pulse, no jump.
pub fn reduced_motion(progress: f32) -> Pose {
    let pulse = (PI * ease_out_cubic(progress)).sin();
    Pose {
        offset: Vec3::ZERO,
        rotation: Vec3::new(-0.5 * REDUCED_TILT * pulse, REDUCED_TILT * pulse, 0.0),
        scale: volume_preserving(1.0 - REDUCED_SQUASH * pulse),
    }
}

/// Idle float plus pointer tilt. `pointer` is the damped offset in [-1, 1]
/// with +y pointing up.
pub fn idle_pose(elapsed_sec: f32, pointer: Vec2) -> Pose {
    let t = elapsed_sec;
    Pose {
        offset: Vec3::new(0.0, IDLE_BOB * (t * IDLE_FREQ[3]).sin(), 0.0),
        rotation: Vec3::new(
            IDLE_SWAY[0] * (t * IDLE_FREQ[0]).sin() - pointer.y * POINTER_TILT[1],
            IDLE_SWAY[1] * (t * IDLE_FREQ[1]).sin() + pointer.x * POINTER_TILT[0],
            IDLE_SWAY[2] * (t * IDLE_FREQ[2]).sin(),
        ),
        scale: Vec3::ONE,
    }
}
