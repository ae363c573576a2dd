//! Gate around the platform's frame-pacing primitive.
//!
//! The loop is started once per mount and stopped once at unmount. After
//! [`FrameLoop::stop`] no request is pending and none will be made, so no
//! further frame callbacks run.

/// Handle returned by the platform when a frame is requested.
pub type FrameRequestId = i32;

pub trait FrameScheduler {
    fn request_frame(&mut self) -> Option<FrameRequestId>;
    fn cancel_frame(&mut self, id: FrameRequestId);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<FrameRequestId>,
    state: LoopState,
    frames: u64,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            state: LoopState::Idle,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Requests the first frame. Only the first call on an idle loop does
    /// anything.
    pub fn start(&mut self) -> bool {
        if self.state != LoopState::Idle {
            return false;
        }
        self.state = LoopState::Running;
        self.pending = self.scheduler.request_frame();
        true
    }

    /// Called at the top of every frame callback. Returns false when the
    /// callback must return without touching any state.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        if self.state != LoopState::Running {
            return false;
        }
        self.frames += 1;
        true
    }

    /// Re-arms the loop after a frame while it is still running.
    pub fn schedule_next(&mut self) {
        if self.state == LoopState::Running && self.pending.is_none() {
            self.pending = self.scheduler.request_frame();
        }
    }

    pub fn stop(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel_frame(id);
        }
        self.state = LoopState::Stopped;
    }
}
