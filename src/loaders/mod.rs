//! Asset loaders for models, environment maps, skyboxes and plain textures.
//!
//! Bytes come from an [`AssetSource`]; loaders decode them with the `gltf`
//! and `image` crates. [`AssetBatch`] starts several loads at once and
//! yields either every result or the first error.

mod batch;
mod cube;
mod environment;
mod error;
mod gltf_loader;
mod loading_manager;
mod source;
mod texture;

pub use batch::{Asset, AssetBatch, AssetRequest, LoadedAssets};
pub use cube::{CubeTexture, CubeTextureLoader, CUBE_FACES};
pub use environment::{EnvironmentLoader, EnvironmentTexture, TextureMapping};
pub use error::LoadError;
pub use gltf_loader::{parse_model, LoadedModel, ModelLoader};
pub use loading_manager::{LoadProgress, LoadState, LoadingManager};
pub use source::{AssetSource, FileSource, MemorySource};
pub use texture::{Texture, TextureLoader};
