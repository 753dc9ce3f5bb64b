//! Frame scheduling state.

use crate::core::ScheduleMode;
use std::cell::Cell;
use std::rc::Rc;

/// Shared "draw again" flag.
///
/// Clones share the flag, so a change listener can hold one while the
/// harness polls another.
#[derive(Debug, Clone, Default)]
pub struct RedrawRequest(Rc<Cell<bool>>);

impl RedrawRequest {
    /// New, not requested.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for one more frame.
    #[inline]
    pub fn request(&self) {
        self.0.set(true);
    }

    /// Check without clearing.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.0.get()
    }

    /// Clear and report whether a frame was requested.
    #[inline]
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }

    /// Number of live handles, this one included.
    pub fn handles(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

/// Decides whether a display refresh produces a frame.
#[derive(Debug, Clone)]
pub struct Scheduler {
    mode: ScheduleMode,
    running: bool,
    redraw: RedrawRequest,
}

impl Scheduler {
    /// Stopped scheduler in `mode`. On-demand starts with one frame pending
    /// so the first refresh shows something.
    pub fn new(mode: ScheduleMode) -> Self {
        let redraw = RedrawRequest::new();
        if mode == ScheduleMode::OnDemand {
            redraw.request();
        }
        Self {
            mode,
            running: false,
            redraw,
        }
    }

    /// Scheduling mode.
    #[inline]
    pub fn mode(&self) -> ScheduleMode {
        self.mode
    }

    /// Change mode.
    pub fn set_mode(&mut self, mode: ScheduleMode) {
        self.mode = mode;
    }

    /// Start producing frames.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop producing frames.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Check if running.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Handle to the redraw flag.
    #[inline]
    pub fn redraw(&self) -> &RedrawRequest {
        &self.redraw
    }

    /// Consume the current refresh: `true` if it should render.
    pub fn should_render(&mut self) -> bool {
        if !self.running {
            return false;
        }
        match self.mode {
            ScheduleMode::Continuous => {
                self.redraw.take();
                true
            }
            ScheduleMode::OnDemand => self.redraw.take(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continuous_renders_while_running() {
        let mut scheduler = Scheduler::new(ScheduleMode::Continuous);
        assert!(!scheduler.should_render());
        scheduler.start();
        assert!(scheduler.should_render());
        assert!(scheduler.should_render());
        scheduler.stop();
        assert!(!scheduler.should_render());
    }

    #[test]
    fn test_on_demand_renders_once_per_request() {
        let mut scheduler = Scheduler::new(ScheduleMode::OnDemand);
        scheduler.start();
        assert!(scheduler.should_render());
        assert!(!scheduler.should_render());

        let handle = scheduler.redraw().clone();
        handle.request();
        handle.request();
        assert!(scheduler.should_render());
        assert!(!scheduler.should_render());
    }
}
