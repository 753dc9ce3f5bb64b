//! Animation action - a single animation instance.

use super::AnimationClip;
use std::sync::Arc;

/// Loop mode for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Play once and stop.
    Once,
    /// Loop continuously.
    #[default]
    Loop,
    /// Ping-pong (forward then backward).
    PingPong,
}

/// State of an animation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
    /// Not playing.
    #[default]
    Stopped,
    /// Currently playing.
    Playing,
    /// Paused.
    Paused,
}

/// Linear weight ramp measured in mixer time.
#[derive(Debug, Clone, Copy)]
struct WeightFade {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

impl WeightFade {
    fn value(&self) -> f32 {
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * t
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// An animation action controls playback of an animation clip.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    /// The animation clip being played.
    clip: Arc<AnimationClip>,
    /// Current playback time in seconds.
    time: f32,
    /// Playback speed multiplier (1.0 = normal, 2.0 = double speed).
    pub time_scale: f32,
    /// Blend weight outside of fades.
    weight: f32,
    /// Loop mode.
    pub loop_mode: LoopMode,
    /// Number of repetitions (for Loop mode, 0 = infinite).
    pub repetitions: u32,
    /// Current repetition count.
    current_repetition: u32,
    /// Current playback state.
    state: ActionState,
    /// Whether playing in reverse (for PingPong).
    is_reversed: bool,
    /// Active weight ramp.
    fade: Option<WeightFade>,
}

impl AnimationAction {
    /// Create a new animation action for a clip.
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            weight: 1.0,
            loop_mode: LoopMode::Loop,
            repetitions: 0,
            current_repetition: 0,
            state: ActionState::Stopped,
            is_reversed: false,
            fade: None,
        }
    }

    /// Get the animation clip.
    #[inline]
    pub fn clip(&self) -> &AnimationClip {
        &self.clip
    }

    /// Get the current time.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Get the current state.
    #[inline]
    pub fn state(&self) -> ActionState {
        self.state
    }

    /// Check if playing.
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == ActionState::Playing
    }

    /// Check if a weight fade is in progress.
    #[inline]
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Start playing.
    pub fn play(&mut self) -> &mut Self {
        self.state = ActionState::Playing;
        self
    }

    /// Stop and rewind. The weight drops to zero until the next `reset`.
    pub fn stop(&mut self) -> &mut Self {
        self.state = ActionState::Stopped;
        self.time = 0.0;
        self.current_repetition = 0;
        self.is_reversed = false;
        self.fade = None;
        self
    }

    /// Pause the animation.
    pub fn pause(&mut self) -> &mut Self {
        if self.state == ActionState::Playing {
            self.state = ActionState::Paused;
        }
        self
    }

    /// Resume from pause.
    pub fn resume(&mut self) -> &mut Self {
        if self.state == ActionState::Paused {
            self.state = ActionState::Playing;
        }
        self
    }

    /// Rewind, cancel any fade and restore full weight.
    pub fn reset(&mut self) -> &mut Self {
        self.time = 0.0;
        self.current_repetition = 0;
        self.is_reversed = false;
        self.fade = None;
        self.weight = 1.0;
        self
    }

    /// Ramp the weight from 0 to 1 over `duration` seconds.
    pub fn fade_in(&mut self, duration: f32) -> &mut Self {
        self.start_fade(0.0, 1.0, duration);
        self
    }

    /// Ramp the weight from its current value to 0 over `duration` seconds,
    /// then stop.
    pub fn fade_out(&mut self, duration: f32) -> &mut Self {
        let from = self.effective_weight();
        self.start_fade(from, 0.0, duration);
        if self.fade.is_none() {
            self.stop();
        }
        self
    }

    fn start_fade(&mut self, from: f32, to: f32, duration: f32) {
        if duration > 0.0 {
            self.weight = from;
            self.fade = Some(WeightFade {
                from,
                to,
                elapsed: 0.0,
                duration,
            });
        } else {
            self.weight = to;
            self.fade = None;
        }
    }

    /// Weight this action contributes to the blend right now.
    pub fn effective_weight(&self) -> f32 {
        match self.state {
            ActionState::Stopped => 0.0,
            _ => self.weight,
        }
    }

    /// Advance by `delta_time` seconds of mixer time.
    /// Returns true if the animation is still active.
    pub fn update(&mut self, delta_time: f32) -> bool {
        if self.state != ActionState::Playing {
            return self.state != ActionState::Stopped;
        }

        if let Some(fade) = self.fade.as_mut() {
            fade.elapsed += delta_time;
            self.weight = fade.value();
            if fade.is_done() {
                self.weight = fade.to;
                self.fade = None;
                if self.weight <= 0.0 {
                    self.stop();
                    return false;
                }
            }
        }

        let duration = self.clip.duration();
        if duration <= 0.0 {
            return true;
        }

        let time_delta = delta_time * self.time_scale * if self.is_reversed { -1.0 } else { 1.0 };
        self.time += time_delta;

        match self.loop_mode {
            LoopMode::Once => {
                if self.time >= duration {
                    self.time = duration;
                    self.state = ActionState::Stopped;
                    return false;
                }
            }
            LoopMode::Loop => {
                if self.time >= duration {
                    self.time %= duration;
                    self.current_repetition += 1;
                    if self.repetitions > 0 && self.current_repetition >= self.repetitions {
                        self.stop();
                        return false;
                    }
                }
            }
            LoopMode::PingPong => {
                if !self.is_reversed && self.time >= duration {
                    self.time = duration;
                    self.is_reversed = true;
                } else if self.is_reversed && self.time <= 0.0 {
                    self.time = 0.0;
                    self.is_reversed = false;
                    self.current_repetition += 1;
                    if self.repetitions > 0 && self.current_repetition >= self.repetitions {
                        self.stop();
                        return false;
                    }
                }
            }
        }

        true
    }
}
