//! Six-face cube textures for skyboxes.

use super::{AssetSource, LoadError};
use futures::future::try_join_all;

/// Face order: +x, -x, +y, -y, +z, -z.
pub const CUBE_FACES: usize = 6;

/// Decoded skybox. All faces are square RGBA8 images of the same size.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeTexture {
    /// Edge length of every face.
    pub size: u32,
    /// RGBA8 pixels per face.
    pub faces: [Vec<u8>; CUBE_FACES],
}

impl CubeTexture {
    /// Build from decoded faces, checking they are square and equal-sized.
    pub fn from_faces(faces: Vec<image::RgbaImage>) -> Result<Self, LoadError> {
        let expected = faces.first().map_or(0, |f| f.width());
        for (face, image) in faces.iter().enumerate() {
            let (width, height) = image.dimensions();
            if width != expected || height != expected {
                return Err(LoadError::FaceSize {
                    face,
                    width,
                    height,
                    expected,
                });
            }
        }

        let faces: [Vec<u8>; CUBE_FACES] = faces
            .into_iter()
            .map(image::RgbaImage::into_raw)
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|v: Vec<Vec<u8>>| LoadError::MissingAsset(format!("cube face {}", v.len())))?;

        Ok(Self {
            size: expected,
            faces,
        })
    }
}

/// Loads [`CubeTexture`]s, fetching all faces concurrently.
pub struct CubeTextureLoader<'a> {
    source: &'a dyn AssetSource,
    path: String,
}

impl<'a> CubeTextureLoader<'a> {
    /// Load from `source`.
    pub fn new(source: &'a dyn AssetSource) -> Self {
        Self {
            source,
            path: String::new(),
        }
    }

    /// Prefix prepended to every face url.
    pub fn set_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Fetch and decode six faces. Fails on the first face that fails.
    pub async fn load(&self, urls: [&str; CUBE_FACES]) -> Result<CubeTexture, LoadError> {
        let faces = try_join_all(urls.iter().map(|name| {
            let url = format!("{}{}", self.path, name);
            async move {
                let bytes = self.source.fetch(&url).await?;
                image::load_from_memory(&bytes)
                    .map(|image| image.to_rgba8())
                    .map_err(|e| LoadError::decode(&url, e))
            }
        }))
        .await?;

        CubeTexture::from_faces(faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::MemorySource;
    use crate::testing;

    const FACES: [&str; 6] = ["px.png", "nx.png", "py.png", "ny.png", "pz.png", "nz.png"];

    fn skybox(sizes: [u32; 6]) -> MemorySource {
        let mut source = MemorySource::new();
        for (name, size) in FACES.iter().zip(sizes) {
            source.insert(format!("sky/{name}"), testing::png_image(size, size, [10, 20, 30, 255]));
        }
        source
    }

    #[test]
    fn test_load_six_faces() {
        let source = skybox([4; 6]);
        let loader = CubeTextureLoader::new(&source).set_path("sky/");
        let cube = pollster::block_on(loader.load(FACES)).unwrap();
        assert_eq!(cube.size, 4);
        assert!(cube.faces.iter().all(|f| f.len() == 4 * 4 * 4));
        assert_eq!(&cube.faces[5][..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_mismatched_face_is_rejected() {
        let source = skybox([4, 4, 4, 8, 4, 4]);
        let loader = CubeTextureLoader::new(&source).set_path("sky/");
        let err = pollster::block_on(loader.load(FACES)).unwrap_err();
        assert_eq!(
            err,
            LoadError::FaceSize {
                face: 3,
                width: 8,
                height: 8,
                expected: 4
            }
        );
    }

    #[test]
    fn test_missing_face_fails_whole_load() {
        let source = MemorySource::new().with("sky/px.png", testing::png_image(4, 4, [0, 0, 0, 255]));
        let loader = CubeTextureLoader::new(&source).set_path("sky/");
        let err = pollster::block_on(loader.load(FACES)).unwrap_err();
        assert_eq!(err, LoadError::NotFound("sky/nx.png".into()));
    }
}
