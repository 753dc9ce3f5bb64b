//! # Core Module
//!
//! Shared building blocks for the harness: typed ids, the frame clock,
//! viewport sizing, frame-timing instrumentation and configuration.

mod clock;
mod color;
mod config;
mod frame_stats;
mod id;
mod viewport;

pub use clock::Clock;
pub use color::Color;
pub use config::{HarnessBuilder, HarnessConfig, ScheduleMode, ToneMapping};
pub use frame_stats::{FrameStats, StatsPanel, FRAME_HISTORY};
pub use id::Id;
pub use viewport::{Viewport, DEFAULT_MAX_PIXEL_RATIO};
