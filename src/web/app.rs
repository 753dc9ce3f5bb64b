use super::{container_size, WebLoop};
use crate::backend::WgpuBackend;
use crate::demos::{on_demand_cube, responsive_cube};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

/// Orbitable cube on a canvas, exported to JavaScript.
#[wasm_bindgen]
pub struct CubeApp {
    run_loop: WebLoop<WgpuBackend>,
}

#[wasm_bindgen]
impl CubeApp {
    /// Attach to the canvas with id `canvas_id` and start rendering.
    ///
    /// With `on_demand` set, frames are drawn only after the camera moves
    /// or the window is resized.
    #[wasm_bindgen]
    pub async fn start(canvas_id: &str, on_demand: bool) -> Result<CubeApp, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("Canvas '{}' not found", canvas_id)))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("Element is not a canvas"))?;

        let container = container_size(&window, &canvas);
        let backend = WgpuBackend::new(
            wgpu::SurfaceTarget::Canvas(canvas.clone()),
            wgpu::PowerPreference::HighPerformance,
        )
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let demo = if on_demand {
            on_demand_cube(backend, container)
        } else {
            responsive_cube(backend, container)
        }
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let harness = Rc::new(RefCell::new(demo.harness));
        let run_loop = WebLoop::start(harness, canvas.into())?;
        Ok(CubeApp { run_loop })
    }

    /// Orbit by a mouse drag of the given pixel deltas.
    #[wasm_bindgen]
    pub fn on_mouse_drag(&self, delta_x: f32, delta_y: f32) {
        let mut harness = self.run_loop.harness().borrow_mut();
        let height = harness.stage().viewport().height() as f32;
        if let Some(controls) = harness.controls_mut() {
            controls.rotate_by_pixels(delta_x, delta_y, height);
        }
    }

    /// Dolly by a wheel delta.
    #[wasm_bindgen]
    pub fn on_mouse_wheel(&self, delta: f32) {
        if let Some(controls) = self.run_loop.harness().borrow_mut().controls_mut() {
            controls.zoom_by_wheel(delta);
        }
    }

    /// Frames drawn so far.
    #[wasm_bindgen]
    pub fn frame_number(&self) -> u64 {
        self.run_loop.harness().borrow().frames()
    }

    /// Stop rendering and detach every listener.
    #[wasm_bindgen]
    pub fn stop(&mut self) {
        self.run_loop.stop();
    }
}
