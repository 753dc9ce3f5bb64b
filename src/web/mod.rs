//! Browser bindings.
//!
//! [`WebLoop`] drives a [`Harness`](crate::harness::Harness) from
//! `requestAnimationFrame` and forwards window resize and keyboard events
//! into it. [`FetchSource`] serves assets over HTTP. [`CubeApp`] is the
//! JavaScript-facing entry point.

mod app;
mod fetch;
mod run_loop;

pub use app::CubeApp;
pub use fetch::FetchSource;
pub use run_loop::{container_size, WebLoop};
