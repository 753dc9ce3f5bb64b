//! Scene container - the root of a drawable tree.

use super::{Node, NodeId};
use crate::core::{Color, Id};
use crate::loaders::{CubeTexture, EnvironmentTexture};
use std::sync::Arc;

/// Identifier of a scene.
pub type SceneId = Id<Scene>;

/// What is drawn behind the scene's objects.
#[derive(Debug, Clone, Default)]
pub enum Background {
    /// Whatever the surface is cleared to.
    #[default]
    None,
    /// Solid colour.
    Color(Color),
    /// Equirectangular panorama.
    Equirect(Arc<EnvironmentTexture>),
    /// Six-faced skybox.
    Cube(Arc<CubeTexture>),
}

/// The scene - root container for all objects.
pub struct Scene {
    id: SceneId,
    root: Node,
    background: Background,
    environment: Option<Arc<EnvironmentTexture>>,
    background_blurriness: f32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            id: Id::next(),
            root: Node::group("Scene"),
            background: Background::None,
            environment: None,
            background_blurriness: 0.0,
        }
    }

    /// Get the scene ID.
    #[inline]
    pub fn id(&self) -> SceneId {
        self.id
    }

    /// Get the scene name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.root.name
    }

    /// Set the scene name.
    #[inline]
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.root.name = name.into();
    }

    /// Get the background.
    #[inline]
    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Set the background.
    #[inline]
    pub fn set_background(&mut self, background: Background) {
        self.background = background;
    }

    /// Set a solid background colour from `0xRRGGBB`.
    #[inline]
    pub fn set_background_color(&mut self, hex: u32) {
        self.background = Background::Color(Color::from_hex(hex));
    }

    /// Image-based lighting texture.
    #[inline]
    pub fn environment(&self) -> Option<&Arc<EnvironmentTexture>> {
        self.environment.as_ref()
    }

    /// Set the image-based lighting texture.
    #[inline]
    pub fn set_environment(&mut self, texture: Option<Arc<EnvironmentTexture>>) {
        self.environment = texture;
    }

    /// Background blur in `0.0..=1.0`.
    #[inline]
    pub fn background_blurriness(&self) -> f32 {
        self.background_blurriness
    }

    /// Set background blur, clamped to `0.0..=1.0`.
    #[inline]
    pub fn set_background_blurriness(&mut self, amount: f32) {
        self.background_blurriness = amount.clamp(0.0, 1.0);
    }

    /// Add an object to the scene.
    pub fn add(&mut self, node: Node) -> NodeId {
        self.root.add(node)
    }

    /// Remove an object from anywhere in the scene.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        self.root.remove(id)
    }

    /// Remove every object.
    pub fn clear(&mut self) {
        self.root.clear();
    }

    /// Top-level objects.
    #[inline]
    pub fn children(&self) -> &[Node] {
        self.root.children()
    }

    /// Root node.
    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Root node, mutably.
    #[inline]
    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    /// Find an object by id.
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        self.root.find(id)
    }

    /// Find an object by id, mutably.
    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.root.find_mut(id)
    }

    /// Find an object by name.
    pub fn find_by_name(&self, name: &str) -> Option<&Node> {
        self.root.find_by_name(name)
    }

    /// Find an object by name, mutably.
    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.root.find_by_name_mut(name)
    }

    /// Visit every node, root included.
    pub fn traverse<F>(&self, mut callback: F)
    where
        F: FnMut(&Node),
    {
        self.root.traverse(&mut callback);
    }

    /// Visit visible nodes.
    pub fn traverse_visible<F>(&self, mut callback: F)
    where
        F: FnMut(&Node),
    {
        self.root.traverse_visible(&mut callback);
    }

    /// Count nodes below the root.
    pub fn count_objects(&self) -> usize {
        self.root.count() - 1
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("children", &self.children().len())
            .field("background", &self.background)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Geometry, Material};

    #[test]
    fn test_add_find_remove() {
        let mut scene = Scene::new();
        let cube = scene.add(Node::mesh(
            "cube",
            Geometry::Box { width: 1.0, height: 1.0, depth: 1.0 },
            Material::normal().wireframe(),
        ));
        assert_eq!(scene.count_objects(), 1);
        assert_eq!(scene.find_by_name("cube").map(Node::id), Some(cube));
        assert!(scene.remove(cube).is_some());
        assert_eq!(scene.count_objects(), 0);
    }

    #[test]
    fn test_background_color_and_blur() {
        let mut scene = Scene::new();
        scene.set_background_color(0x135462);
        assert!(matches!(scene.background(), Background::Color(c) if c.to_hex() == 0x135462));
        scene.set_background_blurriness(3.0);
        assert_eq!(scene.background_blurriness(), 1.0);
    }
}
