#![cfg(target_arch = "wasm32")]
mod canvas2d;
mod dom;
mod events;
mod fallback;
mod frame;
mod input;
mod options;
mod render;

use eightball_core::{
    build_scene, draw_glyph_texture, AnimationDriver, BallConfig, Completion, HostProps,
    PressTracker, PromptSync, TextureSlot, TransitionRequest,
};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("eightball-web loaded");
    Ok(())
}

/// Mounts the ball on `canvas`. Resolves to a handle even when no GPU is
/// available; check `isDegraded`.
#[wasm_bindgen(js_name = mountEightBall)]
pub async fn mount_eight_ball(
    canvas: web::HtmlCanvasElement,
    options: JsValue,
) -> Result<EightBall, JsValue> {
    mount(canvas, options)
        .await
        .map_err(|e| JsValue::from_str(&format!("{e:#}")))
}

/// State kept alive between mount and unmount.
struct Mounted {
    document: web::Document,
    props: Rc<RefCell<HostProps>>,
    driver: Rc<RefCell<AnimationDriver>>,
    press: Rc<RefCell<PressTracker>>,
    on_press: Rc<RefCell<Option<js_sys::Function>>>,
    frame_ctx: Option<Rc<RefCell<frame::FrameContext>>>,
    frame_loop: Option<frame::SharedLoop>,
    listeners: events::EventListeners,
    resize: Option<events::ResizeWatch>,
    fallback_id: String,
}

#[wasm_bindgen]
pub struct EightBall {
    mounted: Option<Mounted>,
    degraded: bool,
}

async fn mount(canvas: web::HtmlCanvasElement, options: JsValue) -> anyhow::Result<EightBall> {
    let started = Instant::now();
    let opts = options::MountOptions::from_js(&options);
    let config = opts.apply(BallConfig::default());
    config.validate()?;

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    dom::sync_canvas_backing_size(&canvas, config.max_device_pixel_ratio);

    let mut host = HostProps::new(opts.revealed, opts.prompt_text.as_str());
    host.set_disabled(opts.disabled);
    let props = Rc::new(RefCell::new(host));
    let driver = Rc::new(RefCell::new(AnimationDriver::new(config.clone(), opts.revealed)));
    let press = Rc::new(RefCell::new(PressTracker::default()));
    let on_press = Rc::new(RefCell::new(opts.on_press.clone()));
    let fallback_id = opts
        .fallback_id
        .clone()
        .unwrap_or_else(|| fallback::DEFAULT_FALLBACK_ID.to_string());

    let scene = build_scene();
    let gpu = match render::GpuState::new(&canvas, &scene, &config).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("{}; showing fallback", e);
            fallback::show(&document, &fallback_id, &canvas);
            None
        }
    };
    let degraded = gpu.is_none();

    if let Some(gpu) = gpu.as_ref() {
        match canvas2d::CanvasPainter::new(&document, config.glyph_texture_px) {
            Ok(mut painter) => {
                draw_glyph_texture(&mut painter);
                match painter.pixels() {
                    Ok(px) => gpu.upload_face(TextureSlot::Glyph, &px),
                    Err(e) => log::warn!("glyph texture skipped: {}", e),
                }
            }
            Err(e) => log::warn!("glyph texture skipped: {}", e),
        }
    }
    let prompt_painter = if degraded {
        None
    } else {
        canvas2d::CanvasPainter::new(&document, config.prompt_texture_px)
            .map_err(|e| log::warn!("prompt texture disabled: {}", e))
            .ok()
    };

    let mut listeners = events::EventListeners::default();
    events::wire_input_handlers(
        &mut listeners,
        &events::InputBindings {
            canvas: canvas.clone(),
            props: props.clone(),
            driver: driver.clone(),
            press: press.clone(),
            on_press: on_press.clone(),
            max_dpr: config.max_device_pixel_ratio,
        },
    )?;
    let resize = events::ResizeWatch::observe(&canvas, config.max_device_pixel_ratio);

    let (frame_ctx, frame_loop) = if degraded {
        (None, None)
    } else {
        let ctx = Rc::new(RefCell::new(frame::FrameContext {
            canvas: canvas.clone(),
            props: props.clone(),
            driver: driver.clone(),
            gpu,
            prompt_painter,
            prompt_sync: PromptSync::default(),
            max_prompt_lines: config.max_prompt_lines,
        }));
        let fl = frame::start_loop(window, ctx.clone());
        (Some(ctx), Some(fl))
    };

    log::info!(
        "eightball mounted in {:?}{}",
        started.elapsed(),
        if degraded { " (degraded)" } else { "" }
    );
    Ok(EightBall {
        mounted: Some(Mounted {
            document,
            props,
            driver,
            press,
            on_press,
            frame_ctx,
            frame_loop,
            listeners,
            resize,
            fallback_id,
        }),
        degraded,
    })
}

fn resolver() -> (js_sys::Promise, Option<Completion>) {
    let mut resolve_fn: Option<js_sys::Function> = None;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| resolve_fn = Some(resolve));
    let done = resolve_fn.map(|resolve| {
        Box::new(move || {
            let _ = resolve.call0(&JsValue::UNDEFINED);
        }) as Completion
    });
    (promise, done)
}

fn js_callback(f: js_sys::Function, name: &'static str) -> Completion {
    Box::new(move || {
        if let Err(e) = f.call0(&JsValue::NULL) {
            log::warn!("{} threw: {:?}", name, e);
        }
    })
}

#[wasm_bindgen]
impl EightBall {
    #[wasm_bindgen(js_name = setRevealed)]
    pub fn set_revealed(&self, revealed: bool) {
        if let Some(m) = &self.mounted {
            m.props.borrow_mut().set_revealed(revealed);
        }
    }

    #[wasm_bindgen(js_name = setPromptText)]
    pub fn set_prompt_text(&self, text: &str) {
        if let Some(m) = &self.mounted {
            m.props.borrow_mut().set_prompt_text(text);
        }
    }

    #[wasm_bindgen(js_name = setDisabled)]
    pub fn set_disabled(&self, disabled: bool) {
        if let Some(m) = &self.mounted {
            m.props.borrow_mut().set_disabled(disabled);
            if disabled {
                m.press.borrow_mut().cancel();
                m.driver.borrow_mut().clear_pointer_target();
            }
        }
    }

    #[wasm_bindgen(js_name = setOnPress)]
    pub fn set_on_press(&self, callback: Option<js_sys::Function>) {
        if let Some(m) = &self.mounted {
            *m.on_press.borrow_mut() = callback;
        }
    }

    /// Plays the reveal motion. The promise resolves once the motion has
    /// finished, immediately when one is already running, and on unmount.
    #[wasm_bindgen(js_name = playTransition)]
    pub fn play_transition(&self, options: JsValue) -> js_sys::Promise {
        let (promise, done) = resolver();
        let Some(done) = done else {
            return promise;
        };
        let requested = options::transition_request(&options);
        let request = TransitionRequest {
            reduced_motion: Some(
                requested
                    .reduced_motion
                    .unwrap_or_else(dom::prefers_reduced_motion),
            ),
            duration_ms: requested.duration_ms,
        };
        let cue = options::read_function(&options, "onCue").map(|f| js_callback(f, "onCue"));

        match &self.mounted {
            Some(m) if m.frame_loop.is_some() => {
                m.driver
                    .borrow_mut()
                    .play(request, dom::now_ms(), done, cue);
            }
            _ => {
                log::debug!("no running loop; transition resolves immediately");
                spawn_local(async move {
                    if let Some(cue) = cue {
                        cue();
                    }
                    done();
                });
            }
        }
        promise
    }

    #[wasm_bindgen(js_name = isDegraded)]
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Stops the loop, removes listeners, settles any pending transition and
    /// releases every GPU resource. Safe to call more than once.
    pub fn unmount(&mut self) {
        let Some(mut m) = self.mounted.take() else {
            return;
        };
        let frame_closure = m.frame_loop.take().and_then(|shared| {
            let mut fl = shared.borrow_mut();
            fl.stop();
            let released = fl.scheduler_mut().release();
            released
        });
        let listeners = m.listeners.detach();
        let resize_closure = m.resize.take().map(events::ResizeWatch::disconnect);
        m.press.borrow_mut().cancel();

        let settled = m.driver.borrow_mut().teardown();

        let released = m
            .frame_ctx
            .take()
            .and_then(|ctx| {
                let gpu = ctx.borrow_mut().gpu.take();
                gpu
            })
            .map(render::GpuState::dispose)
            .unwrap_or(0);
        if self.degraded {
            fallback::hide(&m.document, &m.fallback_id);
        }
        *m.on_press.borrow_mut() = None;
        log::info!("eightball unmounted; {} gpu resources released", released);

        settled.fire();
        // Unmount may run inside one of these closures; drop them after the
        // current task returns.
        spawn_local(async move {
            drop(frame_closure);
            drop(listeners);
            drop(resize_closure);
        });
    }
}

impl Drop for EightBall {
    fn drop(&mut self) {
        self.unmount();
    }
}
