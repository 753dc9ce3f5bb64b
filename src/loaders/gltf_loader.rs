//! GLTF/GLB model loader.

use super::{AssetSource, LoadError};
use crate::animation::AnimationClip;
use crate::scene::{Geometry, Material, Node, NodeKind, Transform};
use glam::{Quat, Vec3};
use std::sync::Arc;

/// A model's node tree and its animation clips.
#[derive(Debug)]
pub struct LoadedModel {
    /// Detached root group; attach it (or a duplicate) to a scene.
    pub scene: Node,
    /// Clips in file order.
    pub animations: Vec<Arc<AnimationClip>>,
}

impl LoadedModel {
    /// Find a node by name.
    pub fn node(&self, name: &str) -> Result<&Node, LoadError> {
        self.scene
            .find_by_name(name)
            .ok_or_else(|| LoadError::MissingNode(name.to_string()))
    }

    /// Find a node by name, mutably.
    pub fn node_mut(&mut self, name: &str) -> Result<&mut Node, LoadError> {
        self.scene
            .find_by_name_mut(name)
            .ok_or_else(|| LoadError::MissingNode(name.to_string()))
    }

    /// Find a clip by name.
    pub fn clip(&self, name: &str) -> Result<Arc<AnimationClip>, LoadError> {
        self.animations
            .iter()
            .find(|c| c.name() == name)
            .cloned()
            .ok_or_else(|| LoadError::MissingAsset(name.to_string()))
    }

    /// Deep copy of the node tree with fresh ids. Clips are shared.
    pub fn duplicate(&self) -> Self {
        Self {
            scene: self.scene.duplicate(),
            animations: self.animations.clone(),
        }
    }
}

/// GLTF/GLB file loader.
pub struct ModelLoader<'a> {
    source: &'a dyn AssetSource,
}

impl<'a> ModelLoader<'a> {
    /// Load from `source`.
    pub fn new(source: &'a dyn AssetSource) -> Self {
        Self { source }
    }

    /// Fetch and parse one model.
    pub async fn load(&self, url: &str) -> Result<LoadedModel, LoadError> {
        let bytes = self.source.fetch(url).await?;
        parse_model(&bytes, url)
    }
}

/// Parse GLB or self-contained glTF JSON. `url` only labels errors.
pub fn parse_model(bytes: &[u8], url: &str) -> Result<LoadedModel, LoadError> {
    let (document, buffers, _images) =
        gltf::import_slice(bytes).map_err(|e| LoadError::decode(url, e))?;

    let gltf_scene = document
        .default_scene()
        .or_else(|| document.scenes().next());

    let mut root = Node::group(
        gltf_scene
            .as_ref()
            .and_then(|s| s.name())
            .unwrap_or("Scene"),
    );
    if let Some(gltf_scene) = &gltf_scene {
        for node in gltf_scene.nodes() {
            root.add(convert_node(&node));
        }
    }

    let animations = document
        .animations()
        .map(|animation| {
            let duration = animation
                .channels()
                .filter_map(|channel| {
                    let reader = channel.reader(|buffer| {
                        buffers.get(buffer.index()).map(|data| data.0.as_slice())
                    });
                    reader.read_inputs().map(|inputs| inputs.fold(0.0f32, f32::max))
                })
                .fold(0.0f32, f32::max);
            let name = animation
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("animation_{}", animation.index()));
            Arc::new(AnimationClip::new(name, duration))
        })
        .collect::<Vec<_>>();

    log::info!(
        "loaded {url}: {} nodes, {} clips",
        root.count() - 1,
        animations.len()
    );

    Ok(LoadedModel {
        scene: root,
        animations,
    })
}

fn convert_node(node: &gltf::Node<'_>) -> Node {
    let kind = match node.mesh() {
        Some(mesh) => NodeKind::Mesh {
            geometry: Geometry::Imported(
                mesh.name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("mesh_{}", mesh.index())),
            ),
            material: Material::default(),
        },
        None => NodeKind::Group,
    };

    let (translation, rotation, scale) = node.transform().decomposed();
    let name = node
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("node_{}", node.index()));

    let mut converted = Node::new(name, kind).with_transform(Transform::from_trs(
        Vec3::from_array(translation),
        Quat::from_array(rotation),
        Vec3::from_array(scale),
    ));
    for child in node.children() {
        converted.add(convert_node(&child));
    }
    converted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::MemorySource;
    use crate::testing;

    #[test]
    fn test_parse_nodes_and_clips() {
        let model = parse_model(
            &testing::gltf_model(&["Suzanne", "Plane"], &["idle", "run"]),
            "suzanne.gltf",
        )
        .unwrap();

        assert_eq!(model.scene.count(), 3);
        let suzanne = model.node("Suzanne").unwrap();
        assert!(matches!(
            &suzanne.kind,
            NodeKind::Mesh { geometry: Geometry::Imported(mesh), .. } if mesh == "Suzanne_mesh"
        ));
        assert!(matches!(model.node("Plane").unwrap().kind, NodeKind::Group));
        assert!((model.node("Plane").unwrap().transform.position.x - 1.0).abs() < 1e-6);

        assert_eq!(model.animations.len(), 2);
        let run = model.clip("run").unwrap();
        assert!((run.duration() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_missing_node_is_typed() {
        let model = parse_model(&testing::gltf_model(&["wheel"], &[]), "wheel.gltf").unwrap();
        assert_eq!(
            model.node("Suzanne").unwrap_err(),
            LoadError::MissingNode("Suzanne".into())
        );
        assert!(model.animations.is_empty());
    }

    #[test]
    fn test_duplicate_has_fresh_ids() {
        let model = parse_model(&testing::gltf_model(&["wheel"], &[]), "wheel.gltf").unwrap();
        let copy = model.duplicate();
        let original = model.node("wheel").unwrap().id();
        let duplicated = copy.node("wheel").unwrap().id();
        assert_ne!(original, duplicated);
    }

    #[test]
    fn test_load_through_source() {
        let source = MemorySource::new().with("models/a.gltf", testing::gltf_model(&["a"], &[]));
        let model = pollster::block_on(ModelLoader::new(&source).load("models/a.gltf")).unwrap();
        assert!(model.node("a").is_ok());

        let err = pollster::block_on(ModelLoader::new(&source).load("models/b.gltf")).unwrap_err();
        assert_eq!(err, LoadError::NotFound("models/b.gltf".into()));
    }
}
