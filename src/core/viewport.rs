//! Drawing-surface sizing.

/// Default ceiling for the device pixel ratio.
///
/// High-density displays report ratios of 3 or more; rendering at that
/// density multiplies fragment cost for little visible gain.
pub const DEFAULT_MAX_PIXEL_RATIO: f64 = 2.0;

/// Size of the drawing surface in CSS pixels plus the pixel density used to
/// back it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    device_pixel_ratio: f64,
    max_pixel_ratio: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1, 1, 1.0, DEFAULT_MAX_PIXEL_RATIO)
    }
}

impl Viewport {
    /// Create a viewport for a container of the given CSS size.
    pub fn new(width: u32, height: u32, device_pixel_ratio: f64, max_pixel_ratio: f64) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            device_pixel_ratio: sanitize_ratio(device_pixel_ratio),
            max_pixel_ratio: sanitize_ratio(max_pixel_ratio),
        }
    }

    /// Width in CSS pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in CSS pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reported device pixel ratio, before clamping.
    #[inline]
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Pixel ratio actually used for the surface.
    #[inline]
    pub fn pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio.min(self.max_pixel_ratio)
    }

    /// Aspect ratio (width / height).
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Surface size in physical pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        let ratio = self.pixel_ratio();
        (
            ((self.width as f64 * ratio).round() as u32).max(1),
            ((self.height as f64 * ratio).round() as u32).max(1),
        )
    }

    /// Apply new container dimensions.
    ///
    /// Returns `true` if anything changed. Zero-sized dimensions (a collapsed
    /// or hidden container) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            log::debug!("Ignoring zero-sized resize to {}x{}", width, height);
            return false;
        }
        if width == self.width && height == self.height {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    /// Update the reported device pixel ratio (e.g. after moving the window
    /// to another display). Returns `true` if the clamped ratio changed.
    pub fn set_device_pixel_ratio(&mut self, ratio: f64) -> bool {
        let before = self.pixel_ratio();
        self.device_pixel_ratio = sanitize_ratio(ratio);
        before != self.pixel_ratio()
    }
}

fn sanitize_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_ratio_is_clamped() {
        let viewport = Viewport::new(800, 600, 3.0, DEFAULT_MAX_PIXEL_RATIO);
        assert_eq!(viewport.pixel_ratio(), 2.0);
        assert_eq!(viewport.physical_size(), (1600, 1200));
    }

    #[test]
    fn test_low_density_ratio_passes_through() {
        let viewport = Viewport::new(800, 600, 1.5, DEFAULT_MAX_PIXEL_RATIO);
        assert_eq!(viewport.physical_size(), (1200, 900));
    }

    #[test]
    fn test_resize_reports_changes_only() {
        let mut viewport = Viewport::new(800, 600, 1.0, 2.0);
        assert!(viewport.resize(1024, 768));
        assert!(!viewport.resize(1024, 768));
        assert!((viewport.aspect() - 1024.0 / 768.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_resize_is_ignored() {
        let mut viewport = Viewport::new(800, 600, 1.0, 2.0);
        assert!(!viewport.resize(0, 600));
        assert_eq!(viewport.width(), 800);
    }

    #[test]
    fn test_invalid_ratio_falls_back_to_one() {
        let viewport = Viewport::new(10, 10, f64::NAN, 2.0);
        assert_eq!(viewport.pixel_ratio(), 1.0);
    }
}
