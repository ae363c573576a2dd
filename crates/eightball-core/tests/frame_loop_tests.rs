use eightball_core::{FrameLoop, FrameRequestId, FrameScheduler, LoopState};

#[derive(Default)]
struct SpyScheduler {
    next: FrameRequestId,
    requested: Vec<FrameRequestId>,
    cancelled: Vec<FrameRequestId>,
}

impl FrameScheduler for SpyScheduler {
    fn request_frame(&mut self) -> Option<FrameRequestId> {
        self.next += 1;
        self.requested.push(self.next);
        Some(self.next)
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        self.cancelled.push(id);
    }
}

/// One tick the way the web callback runs it.
fn tick(fl: &mut FrameLoop<SpyScheduler>) -> bool {
    if !fl.begin_frame() {
        return false;
    }
    fl.schedule_next();
    true
}

#[test]
fn start_requests_a_single_frame() {
    let mut fl = FrameLoop::new(SpyScheduler::default());
    assert_eq!(fl.state(), LoopState::Idle);
    assert!(fl.start());
    assert!(!fl.start());
    assert_eq!(fl.state(), LoopState::Running);
    assert_eq!(fl.scheduler().requested, vec![1]);
}

#[test]
fn each_frame_rearms_once() {
    let mut fl = FrameLoop::new(SpyScheduler::default());
    fl.start();
    for _ in 0..3 {
        assert!(tick(&mut fl));
    }
    assert_eq!(fl.frames(), 3);
    assert_eq!(fl.scheduler().requested.len(), 4);
    // a second schedule in the same frame is ignored
    fl.schedule_next();
    assert_eq!(fl.scheduler().requested.len(), 4);
}

#[test]
fn frame_before_start_is_ignored() {
    let mut fl = FrameLoop::new(SpyScheduler::default());
    assert!(!tick(&mut fl));
    assert_eq!(fl.frames(), 0);
    assert!(fl.scheduler().requested.is_empty());
}

#[test]
fn stop_cancels_pending_request() {
    let mut fl = FrameLoop::new(SpyScheduler::default());
    fl.start();
    tick(&mut fl);
    fl.stop();
    assert_eq!(fl.state(), LoopState::Stopped);
    assert_eq!(fl.scheduler().cancelled, vec![2]);
}

#[test]
fn no_frames_after_stop() {
    let mut fl = FrameLoop::new(SpyScheduler::default());
    fl.start();
    fl.stop();
    let requested = fl.scheduler().requested.len();

    // a callback that was already queued by the platform
    assert!(!tick(&mut fl));
    fl.schedule_next();
    assert!(!fl.start());
    assert_eq!(fl.scheduler().requested.len(), requested);
    assert_eq!(fl.frames(), 0);

    fl.stop();
    assert_eq!(fl.scheduler().cancelled.len(), 1);
}
