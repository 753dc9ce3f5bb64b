//! Keyboard-driven character locomotion.
//!
//! Held keys pick one of three motions with a fixed priority (run, then the
//! secondary action, then idle). Switching motions cross-fades the clips and
//! retargets a locomotion speed that is smoothed exponentially each tick.

use super::{ActionId, AnimationClip, AnimationMixer};
use crate::controls::KeyboardState;
use crate::harness::{Stage, System};
use crate::loaders::LoadError;
use crate::scene::NodeId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Remaining speed gap below which the speed snaps to its target.
pub const SPEED_SNAP: f32 = 0.001;

/// What the character is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    /// Standing still.
    Idle,
    /// Moving forward.
    Run,
    /// Secondary action, e.g. a jump.
    Action,
}

/// Clip names, key bindings and timing for a [`CharacterController`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Clip played when no key is held.
    pub idle_clip: String,
    /// Clip played while running.
    pub run_clip: String,
    /// Clip played for the secondary action.
    pub action_clip: String,
    /// Key code that triggers running.
    pub run_key: String,
    /// Key code that triggers the secondary action.
    pub action_key: String,
    /// Seconds for the outgoing clip to fade out.
    pub fade_out: f32,
    /// Seconds for the incoming clip to fade in.
    pub fade_in: f32,
    /// Target speed while running, in units per second.
    pub run_speed: f32,
    /// Smoothing rate per second for the speed.
    pub speed_rate: f32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            idle_clip: "idle".into(),
            run_clip: "run".into(),
            action_clip: "jump".into(),
            run_key: "KeyW".into(),
            action_key: "Space".into(),
            fade_out: 0.5,
            fade_in: 0.2,
            run_speed: 4.0,
            speed_rate: 4.0,
        }
    }
}

/// Picks a motion from held keys and blends clips and speed toward it.
#[derive(Debug)]
pub struct CharacterController {
    config: CharacterConfig,
    mixer: AnimationMixer,
    idle: ActionId,
    run: ActionId,
    action: ActionId,
    active: Motion,
    speed: f32,
    target_speed: f32,
    node: Option<NodeId>,
}

impl CharacterController {
    /// Build a controller from a model's clips. Starts idle at full weight.
    pub fn new(clips: &[Arc<AnimationClip>], config: CharacterConfig) -> Result<Self, LoadError> {
        let find = |name: &str| {
            clips
                .iter()
                .find(|clip| clip.name() == name)
                .cloned()
                .ok_or_else(|| LoadError::MissingAsset(name.to_string()))
        };

        let mut mixer = AnimationMixer::new();
        let idle = mixer.clip_action(find(&config.idle_clip)?);
        let run = mixer.clip_action(find(&config.run_clip)?);
        let action = mixer.clip_action(find(&config.action_clip)?);

        if let Some(idle) = mixer.action_mut(idle) {
            idle.reset().play();
        }

        Ok(Self {
            config,
            mixer,
            idle,
            run,
            action,
            active: Motion::Idle,
            speed: 0.0,
            target_speed: 0.0,
            node: None,
        })
    }

    /// Move this node along its facing direction while running.
    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    /// Controlled node.
    #[inline]
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Current motion.
    #[inline]
    pub fn active_motion(&self) -> Motion {
        self.active
    }

    /// Smoothed speed.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Speed being approached.
    #[inline]
    pub fn target_speed(&self) -> f32 {
        self.target_speed
    }

    /// The mixer driving the clips.
    #[inline]
    pub fn mixer(&self) -> &AnimationMixer {
        &self.mixer
    }

    /// Current blend weight of a motion's clip.
    pub fn weight(&self, motion: Motion) -> f32 {
        self.mixer
            .action(self.action_id(motion))
            .map_or(0.0, |a| a.effective_weight())
    }

    fn action_id(&self, motion: Motion) -> ActionId {
        match motion {
            Motion::Idle => self.idle,
            Motion::Run => self.run,
            Motion::Action => self.action,
        }
    }

    fn speed_for(&self, motion: Motion) -> f32 {
        match motion {
            Motion::Run => self.config.run_speed,
            Motion::Idle | Motion::Action => 0.0,
        }
    }

    /// Motion the held keys ask for.
    pub fn select_motion(&self, keys: &KeyboardState) -> Motion {
        if keys.is_pressed(&self.config.run_key) {
            Motion::Run
        } else if keys.is_pressed(&self.config.action_key) {
            Motion::Action
        } else {
            Motion::Idle
        }
    }

    /// Force a transition, regardless of keys.
    pub fn transition(&mut self, motion: Motion) {
        if motion == self.active {
            return;
        }
        log::debug!("character {:?} -> {:?}", self.active, motion);

        let fade_out = self.config.fade_out;
        let fade_in = self.config.fade_in;
        let (previous, next) = (self.action_id(self.active), self.action_id(motion));
        if let Some(previous) = self.mixer.action_mut(previous) {
            previous.fade_out(fade_out);
        }
        if let Some(next) = self.mixer.action_mut(next) {
            next.reset().fade_in(fade_in).play();
        }

        self.active = motion;
        self.target_speed = self.speed_for(motion);
    }

    /// Set a speed target directly.
    pub fn set_target_speed(&mut self, target: f32) {
        self.target_speed = target;
    }

    /// Exponential approach of the speed toward its target.
    pub fn smooth_speed(&mut self, delta: f32) {
        let k = 1.0 - (-self.config.speed_rate * delta).exp();
        self.speed = (1.0 - k) * self.speed + k * self.target_speed;
        if (self.target_speed - self.speed).abs() < SPEED_SNAP {
            self.speed = self.target_speed;
        }
    }

    /// Apply the key policy, advance the mixer and smooth the speed.
    pub fn step(&mut self, keys: &KeyboardState, delta: f32) -> Motion {
        let motion = self.select_motion(keys);
        self.transition(motion);
        self.mixer.update(delta);
        self.smooth_speed(delta);
        self.active
    }
}

impl System for CharacterController {
    fn update(&mut self, stage: &mut Stage, delta: f32) {
        self.step(&stage.input, delta);

        let Some(id) = self.node else {
            return;
        };
        let distance = self.speed * delta;
        if distance == 0.0 {
            return;
        }
        if let Some(node) = stage.scenes.active_mut().and_then(|scene| scene.find_mut(id)) {
            let forward = node.transform.forward();
            node.transform.position += forward * distance;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clips() -> Vec<Arc<AnimationClip>> {
        ["idle", "run", "jump"]
            .into_iter()
            .map(|name| Arc::new(AnimationClip::new(name, 1.0)))
            .collect()
    }

    fn controller() -> CharacterController {
        CharacterController::new(&clips(), CharacterConfig::default()).unwrap()
    }

    #[test]
    fn test_missing_clip_is_error() {
        let clips = vec![Arc::new(AnimationClip::new("idle", 1.0))];
        let err = CharacterController::new(&clips, CharacterConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingAsset(name) if name == "run"));
    }

    #[test]
    fn test_priority_run_over_action() {
        let character = controller();
        let mut keys = KeyboardState::new();
        assert_eq!(character.select_motion(&keys), Motion::Idle);
        keys.press("Space");
        assert_eq!(character.select_motion(&keys), Motion::Action);
        keys.press("KeyW");
        assert_eq!(character.select_motion(&keys), Motion::Run);
    }

    #[test]
    fn test_cross_fade_is_monotonic() {
        let mut character = controller();
        let mut keys = KeyboardState::new();
        keys.press("KeyW");

        let mut idle = character.weight(Motion::Idle);
        let mut run = character.weight(Motion::Run);
        assert_eq!(idle, 1.0);
        assert_eq!(run, 0.0);

        for _ in 0..20 {
            character.step(&keys, 0.05);
            let next_idle = character.weight(Motion::Idle);
            let next_run = character.weight(Motion::Run);
            assert!(next_idle <= idle);
            assert!(next_run >= run);
            idle = next_idle;
            run = next_run;
        }

        assert_eq!(character.active_motion(), Motion::Run);
        assert_eq!(character.weight(Motion::Idle), 0.0);
        assert_eq!(character.weight(Motion::Run), 1.0);
    }

    #[test]
    fn test_speed_target_follows_motion() {
        let mut character = controller();
        let mut keys = KeyboardState::new();
        keys.press("Space");
        character.step(&keys, 0.016);
        assert_eq!(character.target_speed(), 0.0);
        keys.press("KeyW");
        character.step(&keys, 0.016);
        assert_eq!(character.target_speed(), 4.0);
    }

    #[test]
    fn test_speed_converges_with_snap() {
        let mut character = controller();
        character.set_target_speed(20.0);

        let mut previous = character.speed();
        let mut reached = None;
        for step in 0..1000 {
            character.smooth_speed(1.0 / 60.0);
            let speed = character.speed();
            if reached.is_none() {
                assert!(speed > previous);
                if speed == 20.0 {
                    reached = Some(step);
                }
            } else {
                assert_eq!(speed, 20.0);
            }
            previous = speed;
        }
        assert!(reached.is_some());
    }

    #[test]
    fn test_running_moves_node_forward() {
        use crate::scene::{Node, Scene};

        let mut stage = Stage::default();
        let mut scene = Scene::new();
        let hero = scene.add(Node::group("hero"));
        stage.scenes.add("main", scene);
        stage.input.press("KeyW");

        let mut character = controller().with_node(hero);
        for _ in 0..60 {
            character.update(&mut stage, 1.0 / 60.0);
        }

        let position = stage
            .scenes
            .active()
            .and_then(|s| s.find(hero))
            .map(|n| n.transform.position)
            .unwrap();
        assert!(position.z < -0.5);
        assert!(position.x.abs() < 1e-5);
    }
}
