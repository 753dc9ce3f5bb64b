//! # ren-harness
//!
//! Scene harness for small interactive 3D demos on top of wgpu.
//!
//! A [`Harness`](harness::Harness) owns the viewport, a rig of named cameras,
//! a set of switchable scenes and the frame loop. Around it sit the pieces a
//! demo needs: orbit controls, asset loaders, a numeric parameter panel,
//! frustum helpers for debug cameras and a keyboard-driven character
//! animation policy.
//!
//! ## Features
//!
//! - **Viewport**: container-driven resize with a clamped pixel ratio
//! - **Cameras**: perspective and orthographic, aspect kept in sync, helpers
//! - **Scenes**: several independent scenes, one active at a time
//! - **Frame loop**: continuous or on-demand redraw
//! - **Loaders**: glTF/GLB, HDR environments, cube maps, batched all-or-nothing
//! - **Animation**: mixer with cross-fades and a character controller
//!
//! ## Example
//!
//! ```ignore
//! use ren_harness::prelude::*;
//!
//! let mut demo = responsive_cube(HeadlessBackend::new(), Container::new(800, 600))?;
//! demo.harness.start();
//! demo.harness.frame()?;
//! demo.harness.on_resize(1024, 768);
//! ```

#![warn(missing_docs)]

#[cfg(all(feature = "web", target_arch = "wasm32"))]
use wasm_bindgen::prelude::*;

pub mod animation;
pub mod backend;
pub mod camera;
pub mod controls;
pub mod core;
pub mod debug;
pub mod demos;
pub mod harness;
pub mod loaders;
pub mod scene;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

#[cfg(test)]
mod testing;

pub mod prelude {
    //! Convenient re-exports of commonly used types.

    pub use crate::animation::*;
    pub use crate::backend::*;
    pub use crate::camera::*;
    pub use crate::controls::*;
    pub use crate::core::*;
    pub use crate::debug::*;
    pub use crate::demos::*;
    pub use crate::harness::*;
    pub use crate::loaders::*;
    pub use crate::scene::*;
}

/// Install the panic hook and route `log` to the browser console.
#[cfg(all(feature = "web", target_arch = "wasm32"))]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
    }
}

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = "ren-harness";
