use crate::easing::clamp01;
use crate::motion::{full_motion, reduced_motion, Pose};
use smallvec::SmallVec;

/// One-shot callback handed to a transition.
pub type Completion = Box<dyn FnOnce()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionKind {
    Full,
    Reduced,
}

/// What the host asked for. `None` fields fall back to configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransitionRequest {
    pub reduced_motion: Option<bool>,
    pub duration_ms: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    Started,
    /// A transition was already running; it keeps its timing and the new
    /// completion has already fired.
    AlreadyActive,
}

/// The single in-flight scripted transition.
pub struct Transition {
    pub kind: MotionKind,
    pub duration_ms: f64,
    pub start_ms: f64,
    completion: Option<Completion>,
    cue: Option<(f32, Completion)>,
}

impl Transition {
    pub fn new(
        kind: MotionKind,
        duration_ms: f64,
        start_ms: f64,
        completion: Completion,
        cue: Option<(f32, Completion)>,
    ) -> Self {
        Self {
            kind,
            duration_ms,
            start_ms,
            completion: Some(completion),
            cue,
        }
    }

    pub fn progress(&self, now_ms: f64) -> f32 {
        clamp01(((now_ms - self.start_ms) / self.duration_ms) as f32)
    }

    pub fn pose_at(&self, progress: f32) -> Pose {
        match self.kind {
            MotionKind::Full => full_motion(progress),
            MotionKind::Reduced => reduced_motion(progress),
        }
    }

    /// Moves the cue callback into `fired` once progress has crossed it.
    pub(crate) fn take_due_cue(&mut self, progress: f32, fired: &mut FiredCallbacks) {
        if matches!(self.cue, Some((at, _)) if progress >= at) {
            if let Some((_, cb)) = self.cue.take() {
                fired.push(cb);
            }
        }
    }

    pub(crate) fn take_completion(&mut self) -> Option<Completion> {
        self.completion.take()
    }
}

/// Callbacks that became due during a frame. They run only when the caller
/// invokes [`FiredCallbacks::fire`], after it has rendered the frame and
/// released any borrows the callbacks might re-enter.
#[derive(Default)]
pub struct FiredCallbacks {
    callbacks: SmallVec<[Completion; 2]>,
}

impl FiredCallbacks {
    pub(crate) fn push(&mut self, cb: Completion) {
        self.callbacks.push(cb);
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn fire(self) {
        for cb in self.callbacks {
            cb();
        }
    }
}
