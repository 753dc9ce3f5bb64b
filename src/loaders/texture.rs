//! Plain 2D textures: sprites, decals, flare elements.

use super::{AssetSource, LoadError, TextureMapping};
use image::ImageReader;
use std::io::Cursor;

/// Decoded image in RGBA8.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    /// Url it was loaded from.
    pub url: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA bytes.
    pub data: Vec<u8>,
    /// Projection.
    pub mapping: TextureMapping,
}

impl Texture {
    /// Decode image bytes in any format the `image` crate reads.
    pub fn from_bytes(bytes: &[u8], url: &str) -> Result<Self, LoadError> {
        let image = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| LoadError::decode(url, e))?
            .decode()
            .map_err(|e| LoadError::decode(url, e))?
            .into_rgba8();
        let (width, height) = image.dimensions();

        Ok(Self {
            url: url.to_string(),
            width,
            height,
            data: image.into_raw(),
            mapping: TextureMapping::Uv,
        })
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * 4;
        let p = self.data.get(start..start + 4)?;
        Some([p[0], p[1], p[2], p[3]])
    }
}

/// Loads [`Texture`]s through an [`AssetSource`].
pub struct TextureLoader<'a> {
    source: &'a dyn AssetSource,
}

impl<'a> TextureLoader<'a> {
    /// Load from `source`.
    pub fn new(source: &'a dyn AssetSource) -> Self {
        Self { source }
    }

    /// Fetch and decode one image.
    pub async fn load(&self, url: &str) -> Result<Texture, LoadError> {
        let bytes = self.source.fetch(url).await?;
        Texture::from_bytes(&bytes, url)
    }
}
