use crate::canvas2d::CanvasPainter;
use crate::render;
use eightball_core::{
    draw_prompt_texture, AnimationDriver, FiredCallbacks, FrameLoop, FrameRequestId,
    FrameScheduler, HostProps, PromptSync, TextureSlot,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type FrameCallback = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame` behind the loop gate.
pub struct RafScheduler {
    window: web::Window,
    callback: Option<FrameCallback>,
}

impl RafScheduler {
    pub fn new(window: web::Window) -> Self {
        Self {
            window,
            callback: None,
        }
    }

    pub fn set_callback(&mut self, callback: FrameCallback) {
        self.callback = Some(callback);
    }

    /// Takes the frame closure out, breaking the loop's reference cycle.
    pub fn release(&mut self) -> Option<FrameCallback> {
        self.callback.take()
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameRequestId> {
        let cb = self.callback.as_ref()?;
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        let _ = self.window.cancel_animation_frame(id);
    }
}

pub type SharedLoop = Rc<RefCell<FrameLoop<RafScheduler>>>;

pub struct FrameContext {
    pub canvas: web::HtmlCanvasElement,
    pub props: Rc<RefCell<HostProps>>,
    pub driver: Rc<RefCell<AnimationDriver>>,
    pub gpu: Option<render::GpuState>,
    pub prompt_painter: Option<CanvasPainter>,
    pub prompt_sync: PromptSync,
    pub max_prompt_lines: usize,
}

impl FrameContext {
    /// Advances and renders one frame. Callbacks that became due are
    /// returned so they run once every borrow is released.
    pub fn frame(&mut self, now_ms: f64) -> FiredCallbacks {
        self.sync_prompt_texture();

        let (out, fired) = {
            let props = self.props.borrow();
            self.driver.borrow_mut().advance(now_ms, &props)
        };

        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
            match gpu.render(&out) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::debug!("surface lost; reconfiguring");
                    gpu.reconfigure();
                }
                Err(e) => log::warn!("frame skipped: {:?}", e),
            }
        }
        fired
    }

    fn sync_prompt_texture(&mut self) {
        let (revision, text) = {
            let props = self.props.borrow();
            if !self.prompt_sync.needs_redraw(&props) {
                return;
            }
            (props.prompt_revision(), props.prompt_text().to_owned())
        };
        // Marked drawn even on failure so a broken canvas is not retried
        // every frame; the previous texture stays up.
        self.prompt_sync.mark_drawn(revision);
        let Some(painter) = self.prompt_painter.as_mut() else {
            log::warn!("prompt canvas unavailable; keeping previous texture");
            return;
        };
        let lines = draw_prompt_texture(painter, &text, self.max_prompt_lines);
        match painter.pixels() {
            Ok(px) => {
                if let Some(gpu) = self.gpu.as_ref() {
                    gpu.upload_face(TextureSlot::Prompt, &px);
                }
                log::debug!("prompt texture redrawn ({} lines)", lines.len());
            }
            Err(e) => log::warn!("prompt redraw skipped: {}", e),
        }
    }
}

/// Builds the frame closure and starts the loop. The closure is owned by
/// the loop's scheduler until it is released at unmount.
pub fn start_loop(window: web::Window, frame_ctx: Rc<RefCell<FrameContext>>) -> SharedLoop {
    let frame_loop: SharedLoop = Rc::new(RefCell::new(FrameLoop::new(RafScheduler::new(window))));
    let loop_tick = frame_loop.clone();
    let tick = Closure::wrap(Box::new(move |timestamp: f64| {
        if !loop_tick.borrow_mut().begin_frame() {
            return;
        }
        let fired = frame_ctx.borrow_mut().frame(timestamp);
        loop_tick.borrow_mut().schedule_next();
        fired.fire();
    }) as Box<dyn FnMut(f64)>);
    {
        let mut fl = frame_loop.borrow_mut();
        fl.scheduler_mut().set_callback(tick);
        fl.start();
    }
    frame_loop
}
