//! Equirectangular environment maps.
//!
//! Radiance HDR (and any other format the `image` crate decodes) is
//! converted to RGBA16F texels, ready for a float texture upload.

use super::{AssetSource, LoadError};
use half::f16;
use image::ImageReader;
use std::io::Cursor;

/// How a texture is projected when used for reflections or backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureMapping {
    /// Plain UV lookup.
    #[default]
    Uv,
    /// Latitude/longitude panorama used as a reflection probe.
    EquirectangularReflection,
    /// Six-faced cube used as a reflection probe.
    CubeReflection,
}

/// Decoded panorama in RGBA16F.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentTexture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA texels.
    pub data: Vec<f16>,
    /// Projection.
    pub mapping: TextureMapping,
}

impl EnvironmentTexture {
    /// Decode image bytes. `url` only labels errors.
    pub fn from_bytes(bytes: &[u8], url: &str) -> Result<Self, LoadError> {
        let image = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| LoadError::decode(url, e))?
            .decode()
            .map_err(|e| LoadError::decode(url, e))?;

        let rgb = image.into_rgb32f();
        let (width, height) = rgb.dimensions();
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for pixel in rgb.pixels() {
            let [r, g, b] = pixel.0;
            data.extend_from_slice(&[
                f16::from_f32(r),
                f16::from_f32(g),
                f16::from_f32(b),
                f16::ONE,
            ]);
        }

        Ok(Self {
            width,
            height,
            data,
            mapping: TextureMapping::EquirectangularReflection,
        })
    }

    /// Texel at `(x, y)` as `f32`, or `None` outside the image.
    pub fn texel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * 4;
        let t = self.data.get(start..start + 4)?;
        Some([t[0].to_f32(), t[1].to_f32(), t[2].to_f32(), t[3].to_f32()])
    }

    /// Texel bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

/// Loads [`EnvironmentTexture`]s through an [`AssetSource`].
pub struct EnvironmentLoader<'a> {
    source: &'a dyn AssetSource,
}

impl<'a> EnvironmentLoader<'a> {
    /// Load from `source`.
    pub fn new(source: &'a dyn AssetSource) -> Self {
        Self { source }
    }

    /// Fetch and decode one panorama.
    pub async fn load(&self, url: &str) -> Result<EnvironmentTexture, LoadError> {
        let bytes = self.source.fetch(url).await?;
        EnvironmentTexture::from_bytes(&bytes, url)
    }
}
