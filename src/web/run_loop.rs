use crate::backend::RenderBackend;
use crate::demos::Container;
use crate::harness::Harness;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent, Window};

type Shared<B> = Rc<RefCell<Harness<B>>>;
type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// CSS size of `element` and the window's device pixel ratio.
pub fn container_size(window: &Window, element: &Element) -> Container {
    let rect = element.get_bounding_client_rect();
    Container::new(rect.width().max(0.0) as u32, rect.height().max(0.0) as u32)
        .with_pixel_ratio(window.device_pixel_ratio())
}

/// `requestAnimationFrame` loop plus the window listeners feeding a harness.
///
/// Everything registered by [`start`](Self::start) is removed again by
/// [`stop`](Self::stop) or on drop.
pub struct WebLoop<B: RenderBackend + 'static> {
    window: Window,
    harness: Shared<B>,
    running: Rc<Cell<bool>>,
    handle: Rc<Cell<Option<i32>>>,
    tick: TickSlot,
    listeners: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

impl<B: RenderBackend + 'static> WebLoop<B> {
    /// Start the harness and schedule the first frame. `container` is
    /// measured again on every window resize.
    pub fn start(harness: Shared<B>, container: Element) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
        harness.borrow_mut().start();

        let mut this = Self {
            window,
            harness,
            running: Rc::new(Cell::new(true)),
            handle: Rc::new(Cell::new(None)),
            tick: Rc::new(RefCell::new(None)),
            listeners: Vec::new(),
        };
        this.install_tick();
        this.listen_resize(container)?;
        this.listen_keys()?;
        this.schedule()?;
        log::info!("Frame loop started");
        Ok(this)
    }

    fn install_tick(&mut self) {
        let window = self.window.clone();
        let harness = Rc::clone(&self.harness);
        let running = Rc::clone(&self.running);
        let handle = Rc::clone(&self.handle);
        let slot = Rc::clone(&self.tick);

        let tick = Closure::<dyn FnMut()>::new(move || {
            handle.set(None);
            if !running.get() {
                return;
            }
            if let Err(err) = harness.borrow_mut().frame() {
                log::error!("Frame failed: {}", err);
            }
            if let Some(callback) = slot.borrow().as_ref() {
                match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    Ok(id) => handle.set(Some(id)),
                    Err(err) => log::error!("requestAnimationFrame failed: {:?}", err),
                }
            }
        });
        *self.tick.borrow_mut() = Some(tick);
    }

    fn schedule(&self) -> Result<(), JsValue> {
        if let Some(callback) = self.tick.borrow().as_ref() {
            let id = self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())?;
            self.handle.set(Some(id));
        }
        Ok(())
    }

    fn listen(&mut self, event: &'static str, callback: Closure<dyn FnMut(Event)>) -> Result<(), JsValue> {
        self.window
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        self.listeners.push((event, callback));
        Ok(())
    }

    fn listen_resize(&mut self, container: Element) -> Result<(), JsValue> {
        let window = self.window.clone();
        let harness = Rc::clone(&self.harness);
        let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let size = container_size(&window, &container);
            let mut harness = harness.borrow_mut();
            harness.set_device_pixel_ratio(size.device_pixel_ratio);
            harness.on_resize(size.width, size.height);
        });
        self.listen("resize", callback)
    }

    fn listen_keys(&mut self) -> Result<(), JsValue> {
        let harness = Rc::clone(&self.harness);
        let down = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                let mut harness = harness.borrow_mut();
                harness.stage_mut().input.press(key.code());
                harness.request_render();
            }
        });
        self.listen("keydown", down)?;

        let harness = Rc::clone(&self.harness);
        let up = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                let mut harness = harness.borrow_mut();
                harness.stage_mut().input.release(&key.code());
                harness.request_render();
            }
        });
        self.listen("keyup", up)
    }

    /// Shared handle to the harness.
    pub fn harness(&self) -> &Shared<B> {
        &self.harness
    }

    /// Whether frames are still being scheduled.
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Cancel the pending frame, remove every listener and stop the harness.
    pub fn stop(&mut self) {
        if !self.running.replace(false) {
            return;
        }
        if let Some(id) = self.handle.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {:?}", err);
            }
        }
        for (event, callback) in self.listeners.drain(..) {
            if let Err(err) = self
                .window
                .remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            {
                log::warn!("Failed to remove {} listener: {:?}", event, err);
            }
        }
        // The tick closure holds a handle to its own slot.
        self.tick.borrow_mut().take();
        self.harness.borrow_mut().stop();
        log::info!("Frame loop stopped");
    }
}

impl<B: RenderBackend + 'static> Drop for WebLoop<B> {
    fn drop(&mut self) {
        self.stop();
    }
}
