//! Animation playback state.
//!
//! Clips are named durations; actions play them with loop modes and weight
//! fades; the mixer advances every action on one clock. The character
//! controller layers a key-driven motion policy on top.

mod animation_action;
mod animation_clip;
mod animation_mixer;
mod character;

pub use animation_action::{ActionState, AnimationAction, LoopMode};
pub use animation_clip::AnimationClip;
pub use animation_mixer::{ActionId, AnimationMixer};
pub use character::{CharacterConfig, CharacterController, Motion, SPEED_SNAP};
