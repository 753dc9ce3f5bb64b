//! Harness configuration.

use super::{Color, StatsPanel, DEFAULT_MAX_PIXEL_RATIO};
use serde::{Deserialize, Serialize};

/// How frames are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScheduleMode {
    /// Tick and render on every display refresh.
    #[default]
    Continuous,
    /// Render only when something requested a redraw.
    OnDemand,
}

/// Tone mapping applied by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToneMapping {
    /// Output linear colour unchanged.
    #[default]
    None,
    /// ACES filmic curve.
    AcesFilmic,
}

/// Renderer and loop configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Smooth edges with multisampling.
    pub antialias: bool,
    /// Transparent surface background.
    pub alpha: bool,
    /// Colour used where the scene has no background.
    pub clear_color: Color,
    /// Tone mapping operator.
    pub tone_mapping: ToneMapping,
    /// Exposure fed to the tone mapper.
    pub tone_mapping_exposure: f32,
    /// Shadow maps enabled.
    pub shadows: bool,
    /// Ceiling for the device pixel ratio.
    pub max_pixel_ratio: f64,
    /// Frame scheduling.
    pub schedule: ScheduleMode,
    /// Initial frame-timing panel.
    pub stats_panel: StatsPanel,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            antialias: true,
            alpha: false,
            clear_color: Color::BLACK,
            tone_mapping: ToneMapping::None,
            tone_mapping_exposure: 1.0,
            shadows: false,
            max_pixel_ratio: DEFAULT_MAX_PIXEL_RATIO,
            schedule: ScheduleMode::Continuous,
            stats_panel: StatsPanel::Fps,
        }
    }
}

/// Fluent builder for [`HarnessConfig`].
#[derive(Debug, Clone, Default)]
pub struct HarnessBuilder {
    config: HarnessConfig,
}

impl HarnessBuilder {
    /// Start from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set anti-aliasing.
    pub fn antialias(mut self, enabled: bool) -> Self {
        self.config.antialias = enabled;
        self
    }

    /// Set a transparent background.
    pub fn alpha(mut self, enabled: bool) -> Self {
        self.config.alpha = enabled;
        self
    }

    /// Set the clear colour from `0xRRGGBB`.
    pub fn clear_color(mut self, hex: u32) -> Self {
        self.config.clear_color = Color::from_hex(hex);
        self
    }

    /// Set tone mapping and its exposure.
    pub fn tone_mapping(mut self, mapping: ToneMapping, exposure: f32) -> Self {
        self.config.tone_mapping = mapping;
        self.config.tone_mapping_exposure = exposure;
        self
    }

    /// Enable shadow maps.
    pub fn shadows(mut self, enabled: bool) -> Self {
        self.config.shadows = enabled;
        self
    }

    /// Set the pixel-ratio ceiling.
    pub fn max_pixel_ratio(mut self, ratio: f64) -> Self {
        self.config.max_pixel_ratio = ratio;
        self
    }

    /// Set the schedule mode.
    pub fn schedule(mut self, mode: ScheduleMode) -> Self {
        self.config.schedule = mode;
        self
    }

    /// Set the initial stats panel.
    pub fn stats_panel(mut self, panel: StatsPanel) -> Self {
        self.config.stats_panel = panel;
        self
    }

    /// Finish.
    pub fn build(self) -> HarnessConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = HarnessBuilder::new()
            .alpha(true)
            .clear_color(0x2a2d43)
            .tone_mapping(ToneMapping::AcesFilmic, 0.1)
            .schedule(ScheduleMode::OnDemand)
            .build();
        assert!(config.alpha);
        assert!(config.antialias);
        assert_eq!(config.clear_color.to_hex(), 0x2a2d43);
        assert_eq!(config.tone_mapping, ToneMapping::AcesFilmic);
        assert_eq!(config.schedule, ScheduleMode::OnDemand);
        assert_eq!(config.max_pixel_ratio, DEFAULT_MAX_PIXEL_RATIO);
    }
}
