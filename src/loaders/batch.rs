//! Concurrent, all-or-nothing asset batches.

use super::{
    AssetSource, CubeTexture, CubeTextureLoader, EnvironmentLoader, EnvironmentTexture, LoadError,
    LoadedModel, LoadingManager, ModelLoader, Texture, TextureLoader, CUBE_FACES,
};
use futures::future::{try_join_all, FutureExt, LocalBoxFuture};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// One thing to load.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetRequest {
    /// Equirectangular panorama.
    Environment(String),
    /// Six faces under a base path.
    Cube {
        /// Prefix for every face.
        path: String,
        /// Face urls, +x, -x, +y, -y, +z, -z.
        faces: [String; CUBE_FACES],
    },
    /// glTF or GLB model.
    Model(String),
    /// Plain image, decoded to RGBA8.
    Texture(String),
}

impl AssetRequest {
    fn label(&self) -> String {
        match self {
            AssetRequest::Environment(url)
            | AssetRequest::Model(url)
            | AssetRequest::Texture(url) => url.clone(),
            AssetRequest::Cube { path, .. } => path.clone(),
        }
    }
}

/// A loaded asset.
#[derive(Debug)]
pub enum Asset {
    /// Panorama.
    Environment(Arc<EnvironmentTexture>),
    /// Skybox.
    Cube(Arc<CubeTexture>),
    /// Model.
    Model(LoadedModel),
    /// Image.
    Texture(Arc<Texture>),
}

impl Asset {
    fn kind(&self) -> &'static str {
        match self {
            Asset::Environment(_) => "an environment",
            Asset::Cube(_) => "a cube texture",
            Asset::Model(_) => "a model",
            Asset::Texture(_) => "a texture",
        }
    }
}

/// Keyed requests started together and joined as a whole.
///
/// The first failure fails the batch; nothing partial is returned. Keys
/// must be unique within a batch.
#[derive(Debug, Clone, Default)]
pub struct AssetBatch {
    requests: Vec<(String, AssetRequest)>,
}

impl AssetBatch {
    /// Empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a request under `key`.
    pub fn request(mut self, key: impl Into<String>, request: AssetRequest) -> Self {
        self.requests.push((key.into(), request));
        self
    }

    /// Add a panorama.
    pub fn environment(self, key: impl Into<String>, url: impl Into<String>) -> Self {
        self.request(key, AssetRequest::Environment(url.into()))
    }

    /// Add a model.
    pub fn model(self, key: impl Into<String>, url: impl Into<String>) -> Self {
        self.request(key, AssetRequest::Model(url.into()))
    }

    /// Add an image.
    pub fn texture(self, key: impl Into<String>, url: impl Into<String>) -> Self {
        self.request(key, AssetRequest::Texture(url.into()))
    }

    /// Add a skybox.
    pub fn cube(self, key: impl Into<String>, path: impl Into<String>, faces: [&str; CUBE_FACES]) -> Self {
        self.request(
            key,
            AssetRequest::Cube {
                path: path.into(),
                faces: faces.map(str::to_string),
            },
        )
    }

    /// Number of requests.
    #[inline]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Check if the batch is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Load everything.
    pub async fn load(self, source: &dyn AssetSource) -> Result<LoadedAssets, LoadError> {
        let manager = RefCell::new(LoadingManager::new());
        self.load_with(source, &manager).await
    }

    /// Load everything, reporting per-item progress to `manager`.
    pub async fn load_with(
        self,
        source: &dyn AssetSource,
        manager: &RefCell<LoadingManager>,
    ) -> Result<LoadedAssets, LoadError> {
        let mut keys = HashSet::new();
        if let Some((key, _)) = self.requests.iter().find(|(key, _)| !keys.insert(key.as_str())) {
            return Err(LoadError::DuplicateKey(key.clone()));
        }

        for (_, request) in &self.requests {
            manager.borrow_mut().item_start(request.label());
        }

        let loads = self.requests.into_iter().map(|(key, request)| {
            let load: LocalBoxFuture<'_, Result<(String, Asset), LoadError>> = async move {
                let label = request.label();
                let result = load_one(source, request).await;
                match &result {
                    Ok(_) => manager.borrow_mut().item_end(&label),
                    Err(e) => manager.borrow_mut().item_error(&label, e),
                }
                result.map(|asset| (key, asset))
            }
            .boxed_local();
            load
        });

        let assets = match try_join_all(loads).await {
            Ok(assets) => assets,
            Err(err) => {
                // Loads still in flight were dropped with the join.
                manager.borrow_mut().abandon_pending();
                return Err(err);
            }
        };
        Ok(LoadedAssets {
            assets: assets.into_iter().collect(),
        })
    }
}

async fn load_one(source: &dyn AssetSource, request: AssetRequest) -> Result<Asset, LoadError> {
    match request {
        AssetRequest::Environment(url) => EnvironmentLoader::new(source)
            .load(&url)
            .await
            .map(|t| Asset::Environment(Arc::new(t))),
        AssetRequest::Cube { path, faces } => {
            let faces = [0, 1, 2, 3, 4, 5].map(|i| faces[i].as_str());
            CubeTextureLoader::new(source)
                .set_path(path)
                .load(faces)
                .await
                .map(|t| Asset::Cube(Arc::new(t)))
        }
        AssetRequest::Model(url) => ModelLoader::new(source).load(&url).await.map(Asset::Model),
        AssetRequest::Texture(url) => TextureLoader::new(source)
            .load(&url)
            .await
            .map(|t| Asset::Texture(Arc::new(t))),
    }
}

/// Results of a completed batch, by key.
#[derive(Debug, Default)]
pub struct LoadedAssets {
    assets: HashMap<String, Asset>,
}

impl LoadedAssets {
    /// Number of assets.
    #[inline]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Check if nothing was loaded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    fn get(&self, key: &str) -> Result<&Asset, LoadError> {
        self.assets
            .get(key)
            .ok_or_else(|| LoadError::MissingAsset(key.to_string()))
    }

    fn mismatch(key: &str, expected: &'static str, found: &Asset) -> LoadError {
        LoadError::KindMismatch {
            key: key.to_string(),
            expected,
            found: found.kind(),
        }
    }

    /// Panorama under `key`.
    pub fn environment(&self, key: &str) -> Result<Arc<EnvironmentTexture>, LoadError> {
        match self.get(key)? {
            Asset::Environment(t) => Ok(t.clone()),
            other => Err(Self::mismatch(key, "an environment", other)),
        }
    }

    /// Skybox under `key`.
    pub fn cube(&self, key: &str) -> Result<Arc<CubeTexture>, LoadError> {
        match self.get(key)? {
            Asset::Cube(t) => Ok(t.clone()),
            other => Err(Self::mismatch(key, "a cube texture", other)),
        }
    }

    /// Image under `key`.
    pub fn texture(&self, key: &str) -> Result<Arc<Texture>, LoadError> {
        match self.get(key)? {
            Asset::Texture(t) => Ok(t.clone()),
            other => Err(Self::mismatch(key, "a texture", other)),
        }
    }

    /// Model under `key`.
    pub fn model(&self, key: &str) -> Result<&LoadedModel, LoadError> {
        match self.get(key)? {
            Asset::Model(m) => Ok(m),
            other => Err(Self::mismatch(key, "a model", other)),
        }
    }

    /// Take ownership of the model under `key`.
    pub fn take_model(&mut self, key: &str) -> Result<LoadedModel, LoadError> {
        match self.assets.remove(key) {
            Some(Asset::Model(m)) => Ok(m),
            Some(other) => {
                let err = Self::mismatch(key, "a model", &other);
                self.assets.insert(key.to_string(), other);
                Err(err)
            }
            None => Err(LoadError::MissingAsset(key.to_string())),
        }
    }
}
