//! Animation mixer for managing multiple animations.

use super::{AnimationAction, AnimationClip};
use crate::core::Id;
use std::sync::Arc;

/// Handle to an action owned by a mixer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(usize);

/// Animation mixer manages multiple animation actions and blends them.
///
/// All actions advance on the same mixer clock, so fades started in the
/// same tick stay in lockstep.
#[derive(Debug)]
pub struct AnimationMixer {
    id: Id<AnimationMixer>,
    actions: Vec<AnimationAction>,
    /// Global time scale.
    pub time_scale: f32,
    time: f32,
}

impl AnimationMixer {
    /// Create a new animation mixer.
    pub fn new() -> Self {
        Self {
            id: Id::next(),
            actions: Vec::new(),
            time_scale: 1.0,
            time: 0.0,
        }
    }

    /// Get the unique ID.
    #[inline]
    pub fn id(&self) -> Id<AnimationMixer> {
        self.id
    }

    /// Mixer time in seconds.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Action for a clip. Asking twice for the same clip name returns the
    /// same action.
    pub fn clip_action(&mut self, clip: Arc<AnimationClip>) -> ActionId {
        if let Some(index) = self
            .actions
            .iter()
            .position(|a| a.clip().name() == clip.name())
        {
            return ActionId(index);
        }
        self.actions.push(AnimationAction::new(clip));
        ActionId(self.actions.len() - 1)
    }

    /// Get all actions.
    #[inline]
    pub fn actions(&self) -> &[AnimationAction] {
        &self.actions
    }

    /// Look up an action.
    pub fn action(&self, id: ActionId) -> Option<&AnimationAction> {
        self.actions.get(id.0)
    }

    /// Look up an action mutably.
    pub fn action_mut(&mut self, id: ActionId) -> Option<&mut AnimationAction> {
        self.actions.get_mut(id.0)
    }

    /// Stop all actions.
    pub fn stop_all(&mut self) {
        for action in &mut self.actions {
            action.stop();
        }
    }

    /// Update all animations by delta time.
    pub fn update(&mut self, delta_time: f32) {
        let scaled_delta = delta_time * self.time_scale;
        self.time += scaled_delta;

        for action in &mut self.actions {
            action.update(scaled_delta);
        }
    }

    /// Check if any animations are playing.
    pub fn is_playing(&self) -> bool {
        self.actions.iter().any(|a| a.is_playing())
    }

    /// Get the number of active actions.
    pub fn active_action_count(&self) -> usize {
        self.actions.iter().filter(|a| a.is_playing()).count()
    }
}

impl Default for AnimationMixer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_action_is_cached_by_name() {
        let mut mixer = AnimationMixer::new();
        let idle = Arc::new(AnimationClip::new("idle", 2.0));
        let first = mixer.clip_action(idle.clone());
        let second = mixer.clip_action(idle);
        let run = mixer.clip_action(Arc::new(AnimationClip::new("run", 1.0)));
        assert_eq!(first, second);
        assert_ne!(first, run);
        assert_eq!(mixer.actions().len(), 2);
    }

    #[test]
    fn test_update_applies_time_scale() {
        let mut mixer = AnimationMixer::new();
        let id = mixer.clip_action(Arc::new(AnimationClip::new("idle", 10.0)));
        if let Some(action) = mixer.action_mut(id) {
            action.play();
        }
        mixer.time_scale = 0.5;
        mixer.update(1.0);
        assert!((mixer.time() - 0.5).abs() < 1e-6);
        assert!((mixer.action(id).map(AnimationAction::time).unwrap_or(0.0) - 0.5).abs() < 1e-6);
        assert_eq!(mixer.active_action_count(), 1);
    }
}
