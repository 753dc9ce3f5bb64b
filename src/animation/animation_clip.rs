//! Named animation clip.

/// A named, reusable animation.
///
/// Keyframe data stays with the rendering engine; the harness only needs
/// the name to select a clip and the duration to drive playback.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    name: String,
    duration: f32,
}

impl AnimationClip {
    /// Create a clip. Negative durations are treated as zero.
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration: duration.max(0.0),
        }
    }

    /// Clip name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Length in seconds.
    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }
}
