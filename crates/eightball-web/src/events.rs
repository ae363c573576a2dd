use crate::dom;
use crate::input;
use eightball_core::{is_activation_key, AnimationDriver, HostProps, PressTracker};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

type Listener = Closure<dyn FnMut(web::Event)>;

/// Event listeners registered for one mount, removable as a group.
#[derive(Default)]
pub struct EventListeners {
    entries: Vec<(web::EventTarget, &'static str, Listener)>,
}

impl EventListeners {
    pub fn listen<E, F>(&mut self, target: &web::EventTarget, kind: &'static str, mut handler: F)
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        }) as Box<dyn FnMut(web::Event)>);
        match target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
            Ok(()) => self.entries.push((target.clone(), kind, closure)),
            Err(e) => log::warn!("could not listen for {}: {:?}", kind, e),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unregisters every listener. The closures are handed back because one
    /// of them may be running right now; the caller drops them later.
    pub fn detach(&mut self) -> Vec<Listener> {
        self.entries
            .drain(..)
            .map(|(target, kind, closure)| {
                let _ = target
                    .remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
                closure
            })
            .collect()
    }
}

/// Keeps the canvas backing store in step with its CSS box.
pub struct ResizeWatch {
    observer: web::ResizeObserver,
    callback: Closure<dyn FnMut(js_sys::Array, web::ResizeObserver)>,
}

impl ResizeWatch {
    pub fn observe(canvas: &web::HtmlCanvasElement, max_dpr: f64) -> Option<Self> {
        let target = canvas.clone();
        let callback = Closure::wrap(Box::new(move |_: js_sys::Array, _: web::ResizeObserver| {
            dom::sync_canvas_backing_size(&target, max_dpr);
        })
            as Box<dyn FnMut(js_sys::Array, web::ResizeObserver)>);
        let observer = match web::ResizeObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(o) => o,
            Err(e) => {
                log::warn!("ResizeObserver unavailable: {:?}", e);
                return None;
            }
        };
        observer.observe(canvas);
        Some(Self { observer, callback })
    }

    pub fn disconnect(self) -> Closure<dyn FnMut(js_sys::Array, web::ResizeObserver)> {
        self.observer.disconnect();
        self.callback
    }
}

/// State shared between the DOM handlers and the handle.
#[derive(Clone)]
pub struct InputBindings {
    pub canvas: web::HtmlCanvasElement,
    pub props: Rc<RefCell<HostProps>>,
    pub driver: Rc<RefCell<AnimationDriver>>,
    pub press: Rc<RefCell<PressTracker>>,
    pub on_press: Rc<RefCell<Option<js_sys::Function>>>,
    pub max_dpr: f64,
}

impl InputBindings {
    fn disabled(&self) -> bool {
        self.props.borrow().disabled()
    }

    fn reset_pointer(&self) {
        self.driver.borrow_mut().clear_pointer_target();
        self.press.borrow_mut().cancel();
    }

    /// Calls the host's press callback with no borrows held.
    fn emit_press(&self) {
        let cb = self.on_press.borrow().clone();
        if let Some(cb) = cb {
            if let Err(e) = cb.call0(&JsValue::NULL) {
                log::warn!("onPress threw: {:?}", e);
            }
        }
    }
}

pub fn wire_input_handlers(listeners: &mut EventListeners, b: &InputBindings) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let canvas_target: &web::EventTarget = b.canvas.as_ref();
    let window_target: &web::EventTarget = window.as_ref();

    {
        let b = b.clone();
        listeners.listen(canvas_target, "pointermove", move |ev: web::PointerEvent| {
            if b.disabled() || !input::tilts_with_pointer(&ev.pointer_type()) {
                return;
            }
            let [x, y] = input::pointer_offset(&ev, &b.canvas);
            b.driver.borrow_mut().set_pointer_target(x, y);
        });
    }
    {
        let b = b.clone();
        listeners.listen(canvas_target, "pointerleave", move |_: web::PointerEvent| {
            b.reset_pointer();
        });
    }
    {
        let b = b.clone();
        listeners.listen(canvas_target, "pointerdown", move |ev: web::PointerEvent| {
            let disabled = b.disabled();
            b.press.borrow_mut().pointer_down(ev.pointer_id(), disabled);
        });
    }
    {
        let b = b.clone();
        listeners.listen(canvas_target, "pointerup", move |ev: web::PointerEvent| {
            let disabled = b.disabled();
            let pressed = b.press.borrow_mut().pointer_up(ev.pointer_id(), disabled);
            if pressed {
                b.emit_press();
            }
        });
    }
    {
        let b = b.clone();
        listeners.listen(canvas_target, "pointercancel", move |_: web::PointerEvent| {
            b.press.borrow_mut().cancel();
        });
    }
    {
        let b = b.clone();
        listeners.listen(canvas_target, "keydown", move |ev: web::KeyboardEvent| {
            if ev.repeat() || b.disabled() || !is_activation_key(&ev.key()) {
                return;
            }
            ev.prevent_default();
            b.emit_press();
        });
    }
    {
        let b = b.clone();
        listeners.listen(window_target, "blur", move |_: web::Event| {
            b.reset_pointer();
        });
    }
    {
        let b = b.clone();
        listeners.listen(window_target, "resize", move |_: web::Event| {
            dom::sync_canvas_backing_size(&b.canvas, b.max_dpr);
        });
    }
    log::debug!("wired {} input listeners", listeners.len());
    Ok(())
}
