//! Frame timing readout.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of recent frames kept for the readout.
pub const FRAME_HISTORY: usize = 120;

/// Which figure the overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatsPanel {
    /// Frames per second.
    #[default]
    Fps,
    /// Milliseconds spent between `begin` and `end`.
    Ms,
}

/// Frame-timing instrumentation.
///
/// `begin`/`end` bracket the measured work of a frame and `update` is
/// called once per presented frame. All times are in seconds.
#[derive(Debug, Clone)]
pub struct FrameStats {
    panel: StatsPanel,
    begin_time: Option<f64>,
    work_ms: VecDeque<f32>,
    frame_ms: VecDeque<f32>,
    last_frame: Option<f64>,
    window_start: Option<f64>,
    window_frames: u32,
    fps: f32,
    frames: u64,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(StatsPanel::Fps)
    }
}

impl FrameStats {
    /// Create an empty readout.
    pub fn new(panel: StatsPanel) -> Self {
        Self {
            panel,
            begin_time: None,
            work_ms: VecDeque::with_capacity(FRAME_HISTORY),
            frame_ms: VecDeque::with_capacity(FRAME_HISTORY),
            last_frame: None,
            window_start: None,
            window_frames: 0,
            fps: 0.0,
            frames: 0,
        }
    }

    /// Selected panel.
    #[inline]
    pub fn panel(&self) -> StatsPanel {
        self.panel
    }

    /// Show another panel.
    #[inline]
    pub fn show_panel(&mut self, panel: StatsPanel) {
        self.panel = panel;
    }

    /// Mark the start of measured work.
    pub fn begin(&mut self, now: f64) {
        self.begin_time = Some(now);
    }

    /// Mark the end of measured work. Ignored without a matching `begin`.
    pub fn end(&mut self, now: f64) {
        if let Some(start) = self.begin_time.take() {
            push_sample(&mut self.work_ms, ((now - start).max(0.0) * 1000.0) as f32);
        }
    }

    /// Record a presented frame.
    pub fn update(&mut self, now: f64) {
        self.frames += 1;

        if let Some(last) = self.last_frame {
            push_sample(&mut self.frame_ms, ((now - last).max(0.0) * 1000.0) as f32);
        }
        self.last_frame = Some(now);

        let start = *self.window_start.get_or_insert(now);
        self.window_frames += 1;
        let span = now - start;
        if span >= 1.0 {
            self.fps = (self.window_frames as f64 / span) as f32;
            self.window_start = Some(now);
            self.window_frames = 0;
        }
    }

    /// Frames per second over the last completed one-second window.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Total frames recorded.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Recent `begin`..`end` durations in milliseconds, oldest first.
    pub fn recent_work_ms(&self) -> impl Iterator<Item = f32> + '_ {
        self.work_ms.iter().copied()
    }

    /// Recent frame-to-frame intervals in milliseconds, oldest first.
    pub fn recent_frame_ms(&self) -> impl Iterator<Item = f32> + '_ {
        self.frame_ms.iter().copied()
    }

    /// Mean of the recent work durations.
    pub fn average_work_ms(&self) -> Option<f32> {
        mean(&self.work_ms)
    }

    /// Mean of the recent frame intervals.
    pub fn average_frame_ms(&self) -> Option<f32> {
        mean(&self.frame_ms)
    }

    /// The figure for the selected panel.
    pub fn readout(&self) -> f32 {
        match self.panel {
            StatsPanel::Fps => self.fps,
            StatsPanel::Ms => self.work_ms.back().copied().unwrap_or(0.0),
        }
    }
}

fn push_sample(samples: &mut VecDeque<f32>, value: f32) {
    if samples.len() == FRAME_HISTORY {
        samples.pop_front();
    }
    samples.push_back(value);
}

fn mean(samples: &VecDeque<f32>) -> Option<f32> {
    if samples.is_empty() {
        None
    } else {
        Some(samples.iter().sum::<f32>() / samples.len() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_end_records_work() {
        let mut stats = FrameStats::new(StatsPanel::Ms);
        stats.begin(1.0);
        stats.end(1.004);
        let work: Vec<f32> = stats.recent_work_ms().collect();
        assert_eq!(work.len(), 1);
        assert!((work[0] - 4.0).abs() < 1e-3);
        assert!((stats.readout() - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_end_without_begin_is_ignored() {
        let mut stats = FrameStats::default();
        stats.end(2.0);
        assert_eq!(stats.recent_work_ms().count(), 0);
    }

    #[test]
    fn test_fps_over_one_second_window() {
        let mut stats = FrameStats::default();
        for i in 0..=60 {
            stats.update(i as f64 / 60.0);
        }
        assert!((stats.fps() - 61.0).abs() < 0.5);
        assert_eq!(stats.frames(), 61);
        let avg = stats.average_frame_ms().unwrap_or(0.0);
        assert!((avg - 1000.0 / 60.0).abs() < 0.01);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut stats = FrameStats::default();
        for i in 0..(FRAME_HISTORY * 2) {
            stats.update(i as f64 * 0.016);
        }
        assert_eq!(stats.recent_frame_ms().count(), FRAME_HISTORY);
    }
}
