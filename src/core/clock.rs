//! Frame clock producing per-tick elapsed time.

#[cfg(all(feature = "web", target_arch = "wasm32"))]
use web_sys::window;

#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
use std::time::Instant;

/// Where the clock reads the current time from.
#[derive(Debug, Clone, Copy)]
enum TimeSource {
    /// Wall clock (`performance.now()` in the browser, `Instant` elsewhere).
    System,
    /// Time only moves when [`Clock::advance`] is called.
    Manual(f64),
}

/// A monotonic clock measuring elapsed and delta time in seconds.
///
/// The delta between two frames depends on display refresh rate and device
/// load, so consumers must never assume a fixed step.
#[derive(Debug, Clone)]
pub struct Clock {
    source: TimeSource,
    running: bool,
    start_time: f64,
    old_time: f64,
    elapsed_time: f64,

    #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
    instant: Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Create a stopped clock reading system time.
    pub fn new() -> Self {
        Self::with_source(TimeSource::System)
    }

    /// Create a stopped clock whose time only moves through [`Clock::advance`].
    pub fn manual() -> Self {
        Self::with_source(TimeSource::Manual(0.0))
    }

    fn with_source(source: TimeSource) -> Self {
        Self {
            source,
            running: false,
            start_time: 0.0,
            old_time: 0.0,
            elapsed_time: 0.0,
            #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
            instant: Instant::now(),
        }
    }

    /// Current time in seconds.
    pub fn now(&self) -> f64 {
        match self.source {
            TimeSource::Manual(t) => t,
            TimeSource::System => {
                #[cfg(all(feature = "web", target_arch = "wasm32"))]
                {
                    window()
                        .and_then(|w| w.performance())
                        .map(|p| p.now() / 1000.0)
                        .unwrap_or(0.0)
                }

                #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
                {
                    self.instant.elapsed().as_secs_f64()
                }
            }
        }
    }

    /// Move a manual clock forward. Has no effect on a system clock.
    pub fn advance(&mut self, seconds: f64) {
        if let TimeSource::Manual(t) = &mut self.source {
            *t += seconds.max(0.0);
        }
    }

    /// Start the clock.
    pub fn start(&mut self) {
        self.start_time = self.now();
        self.old_time = self.start_time;
        self.elapsed_time = 0.0;
        self.running = true;
    }

    /// Stop the clock.
    pub fn stop(&mut self) {
        self.get_elapsed_time();
        self.running = false;
    }

    /// Elapsed running time in seconds.
    pub fn get_elapsed_time(&mut self) -> f64 {
        self.get_delta();
        self.elapsed_time
    }

    /// Seconds since the previous call. The first call starts the clock and
    /// returns zero.
    pub fn get_delta(&mut self) -> f64 {
        if !self.running {
            self.start();
            return 0.0;
        }

        let new_time = self.now();
        let diff = (new_time - self.old_time).max(0.0);
        self.old_time = new_time;
        self.elapsed_time += diff;

        diff
    }

    /// Check if the clock is running.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }
}
