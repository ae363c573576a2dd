//! Per-frame animation driver.
//!
//! Three concerns are composited every frame: idle motion (with pointer
//! tilt), the reveal cross-fade, and the scripted transition. Each produces
//! targets; the visible pose and opacities are damped toward them with
//! frame-rate independent exponential smoothing.

use crate::config::BallConfig;
use crate::easing::{damp, wrap_angle};
use crate::host::HostProps;
use crate::motion::{idle_pose, Pose};
use crate::transition::{
    Completion, FiredCallbacks, MotionKind, PlayOutcome, Transition, TransitionRequest,
};
use glam::{Mat4, Vec2};

/// Opacity of one face decal and whether it should be drawn at all.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceVisibility {
    pub opacity: f32,
    pub visible: bool,
}

impl FaceVisibility {
    fn from_opacity(opacity: f32, epsilon: f32) -> Self {
        Self {
            opacity,
            visible: opacity > epsilon,
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameOutput {
    pub pose: Pose,
    pub root: Mat4,
    pub glyph: FaceVisibility,
    pub prompt: FaceVisibility,
    pub reveal_blend: f32,
    pub transition_progress: Option<f32>,
    pub dt_sec: f32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AnimationState {
    pub pointer: Vec2,
    pub pointer_target: Vec2,
    pub elapsed_sec: f32,
    pub reveal_blend: f32,
    pub pose: Pose,
}

pub struct AnimationDriver {
    config: BallConfig,
    state: AnimationState,
    transition: Option<Transition>,
    last_ms: Option<f64>,
}

impl AnimationDriver {
    /// `revealed` seeds the blend so a surface mounted already revealed
    /// does not fade in.
    pub fn new(config: BallConfig, revealed: bool) -> Self {
        let state = AnimationState {
            reveal_blend: if revealed { 1.0 } else { 0.0 },
            ..Default::default()
        };
        Self {
            config,
            state,
            transition: None,
            last_ms: None,
        }
    }

    pub fn config(&self) -> &BallConfig {
        &self.config
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn is_transition_active(&self) -> bool {
        self.transition.is_some()
    }

    /// Pointer target in [-1, 1] (+y up). Only steers the ball while idle.
    pub fn set_pointer_target(&mut self, x: f32, y: f32) {
        self.state.pointer_target = Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0));
    }

    pub fn clear_pointer_target(&mut self) {
        self.state.pointer_target = Vec2::ZERO;
    }

    /// Starts a scripted transition. While one is running the request is
    /// dropped and `on_complete` fires immediately.
    pub fn play(
        &mut self,
        request: TransitionRequest,
        now_ms: f64,
        on_complete: Completion,
        cue: Option<Completion>,
    ) -> PlayOutcome {
        if self.transition.is_some() {
            log::debug!("transition already active; request ignored");
            on_complete();
            return PlayOutcome::AlreadyActive;
        }
        let reduced = request.reduced_motion.unwrap_or(false);
        let kind = if reduced {
            MotionKind::Reduced
        } else {
            MotionKind::Full
        };
        let duration_ms = self.config.resolve_duration_ms(reduced, request.duration_ms);
        let cue = cue.map(|cb| (self.config.cue_progress, cb));
        self.transition = Some(Transition::new(kind, duration_ms, now_ms, on_complete, cue));
        self.clear_pointer_target();
        log::info!("transition started: {:?} for {:.0}ms", kind, duration_ms);
        PlayOutcome::Started
    }

    /// Advances one frame. Callbacks that became due are returned, not run.
    pub fn advance(&mut self, now_ms: f64, props: &HostProps) -> (FrameOutput, FiredCallbacks) {
        let dt_sec = match self.last_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, self.config.max_frame_delta_sec),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        let rates = self.config.damping;
        let st = &mut self.state;

        st.elapsed_sec += dt_sec;
        st.pointer.x = damp(st.pointer.x, st.pointer_target.x, rates.pointer, dt_sec);
        st.pointer.y = damp(st.pointer.y, st.pointer_target.y, rates.pointer, dt_sec);

        let reveal_target = if props.revealed() { 1.0 } else { 0.0 };
        st.reveal_blend = damp(st.reveal_blend, reveal_target, rates.reveal, dt_sec).clamp(0.0, 1.0);

        let mut fired = FiredCallbacks::default();
        let mut progress = None;
        let (target, rate) = match self.transition.as_mut() {
            Some(tr) => {
                let p = tr.progress(now_ms);
                progress = Some(p);
                tr.take_due_cue(p, &mut fired);
                (tr.pose_at(p), rates.pose_transition)
            }
            None if props.revealed() => (Pose::IDENTITY, rates.pose_idle),
            None => (idle_pose(st.elapsed_sec, st.pointer), rates.pose_idle),
        };
        st.pose.damp_toward(&target, rate, dt_sec);

        if progress.is_some_and(|p| p >= 1.0) {
            if let Some(mut tr) = self.transition.take() {
                if let Some(done) = tr.take_completion() {
                    fired.push(done);
                }
            }
            let r = &mut st.pose.rotation;
            r.x = wrap_angle(r.x);
            r.y = wrap_angle(r.y);
            r.z = wrap_angle(r.z);
            log::info!("transition finished");
        }

        let eps = self.config.visibility_epsilon;
        let out = FrameOutput {
            pose: st.pose,
            root: st.pose.to_matrix(),
            glyph: FaceVisibility::from_opacity(1.0 - st.reveal_blend, eps),
            prompt: FaceVisibility::from_opacity(st.reveal_blend, eps),
            reveal_blend: st.reveal_blend,
            transition_progress: progress,
            dt_sec,
        };
        (out, fired)
    }

    /// Ends the mount. A pending transition's completion is returned so the
    /// caller can settle it; its cue is dropped.
    pub fn teardown(&mut self) -> FiredCallbacks {
        let mut fired = FiredCallbacks::default();
        if let Some(mut tr) = self.transition.take() {
            if let Some(done) = tr.take_completion() {
                fired.push(done);
            }
            log::info!("pending transition settled on teardown");
        }
        fired
    }
}
