//! Scene graph nodes.

use super::Transform;
use crate::camera::CameraHelper;
use crate::core::{Color, Id};
use crate::loaders::Texture;
use std::sync::Arc;

/// Identifier of a node.
pub type NodeId = Id<Node>;

/// Shape of a mesh, as far as the harness cares.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Axis-aligned box.
    Box {
        /// Size along X.
        width: f32,
        /// Size along Y.
        height: f32,
        /// Size along Z.
        depth: f32,
    },
    /// Geometry that came from a loaded model, named by its source mesh.
    Imported(String),
}

/// Surface shading model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shading {
    /// Unlit flat colour.
    Basic,
    /// Colour from surface normals.
    Normal,
    /// Physically based, lit.
    #[default]
    Standard,
}

/// Material parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Shading model.
    pub shading: Shading,
    /// Base colour.
    pub color: Color,
    /// Draw edges only.
    pub wireframe: bool,
    /// Blend with what is behind.
    pub transparent: bool,
    /// Opacity when transparent.
    pub opacity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            shading: Shading::Standard,
            color: Color::WHITE,
            wireframe: false,
            transparent: false,
            opacity: 1.0,
        }
    }
}

impl Material {
    /// Normal-shaded material.
    pub fn normal() -> Self {
        Self {
            shading: Shading::Normal,
            ..Self::default()
        }
    }

    /// Unlit material of the given colour.
    pub fn basic(hex: u32) -> Self {
        Self {
            shading: Shading::Basic,
            color: Color::from_hex(hex),
            ..Self::default()
        }
    }

    /// Same material drawn as wireframe.
    pub fn wireframe(mut self) -> Self {
        self.wireframe = true;
        self
    }
}

/// One sprite of a lens flare.
#[derive(Debug, Clone, PartialEq)]
pub struct LensflareElement {
    /// Sprite image.
    pub texture: Arc<Texture>,
    /// Size in pixels.
    pub size: f32,
    /// Position along the light-to-centre line (0 = at the light).
    pub distance: f32,
}

/// Cone light.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotLight {
    /// Light colour.
    pub color: Color,
    /// Luminous intensity in candela.
    pub intensity: f32,
    /// Cone half-angle in radians.
    pub angle: f32,
    /// Renders into a shadow map.
    pub cast_shadow: bool,
    /// Flare sprites drawn at the light.
    pub lensflare: Vec<LensflareElement>,
}

impl SpotLight {
    /// White spot light.
    pub fn new(intensity: f32, angle: f32) -> Self {
        Self {
            color: Color::WHITE,
            intensity,
            angle,
            cast_shadow: false,
            lensflare: Vec::new(),
        }
    }
}

/// What a node is.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Grouping node with no content of its own.
    Group,
    /// Drawable mesh.
    Mesh {
        /// Geometry.
        geometry: Geometry,
        /// Material.
        material: Material,
    },
    /// Cone light.
    SpotLight(SpotLight),
    /// Cone outline for a light elsewhere in the scene.
    SpotLightHelper {
        /// The light being visualised.
        light: NodeId,
    },
    /// Ground grid.
    Grid {
        /// Edge length.
        size: f32,
        /// Cells per edge.
        divisions: u32,
    },
    /// Frustum wireframe of a camera.
    CameraHelper(CameraHelper),
}

/// A node in the scene graph.
///
/// Children are owned; detaching a node hands it back to the caller.
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    /// Name, used for lookup within a loaded sub-scene.
    pub name: String,
    /// Content.
    pub kind: NodeKind,
    /// Local transform.
    pub transform: Transform,
    /// Drawn when `true`, together with its subtree.
    pub visible: bool,
    /// Casts shadows.
    pub cast_shadow: bool,
    /// Receives shadows.
    pub receive_shadow: bool,
    children: Vec<Node>,
}

impl Node {
    /// Create a node.
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: Id::next(),
            name: name.into(),
            kind,
            transform: Transform::IDENTITY,
            visible: true,
            cast_shadow: false,
            receive_shadow: false,
            children: Vec::new(),
        }
    }

    /// Create an empty group.
    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    /// Create a mesh.
    pub fn mesh(name: impl Into<String>, geometry: Geometry, material: Material) -> Self {
        Self::new(name, NodeKind::Mesh { geometry, material })
    }

    /// Same node with another transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Get the unique ID.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Direct children.
    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Attach a child and return its id.
    pub fn add(&mut self, child: Node) -> NodeId {
        let id = child.id;
        self.children.push(child);
        id
    }

    /// Detach a descendant anywhere in the subtree.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        if let Some(index) = self.children.iter().position(|c| c.id == id) {
            return Some(self.children.remove(index));
        }
        self.children.iter_mut().find_map(|c| c.remove(id))
    }

    /// Detach every child.
    pub fn clear(&mut self) -> Vec<Node> {
        std::mem::take(&mut self.children)
    }

    /// Find this node or a descendant by id.
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Find this node or a descendant by id, mutably.
    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// First node with the given name, depth first, this node included.
    pub fn find_by_name(&self, name: &str) -> Option<&Node> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_name(name))
    }

    /// First node with the given name, mutably.
    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Node> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_by_name_mut(name))
    }

    /// Visit this node and every descendant, depth first.
    pub fn traverse<F>(&self, callback: &mut F)
    where
        F: FnMut(&Node),
    {
        callback(self);
        for child in &self.children {
            child.traverse(callback);
        }
    }

    /// Visit visible nodes, skipping hidden subtrees.
    pub fn traverse_visible<F>(&self, callback: &mut F)
    where
        F: FnMut(&Node),
    {
        if !self.visible {
            return;
        }
        callback(self);
        for child in &self.children {
            child.traverse_visible(callback);
        }
    }

    /// Number of nodes in the subtree, this node included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    /// Deep copy with fresh ids for every node.
    pub fn duplicate(&self) -> Node {
        Node {
            id: Id::next(),
            name: self.name.clone(),
            kind: self.kind.clone(),
            transform: self.transform,
            visible: self.visible,
            cast_shadow: self.cast_shadow,
            receive_shadow: self.receive_shadow,
            children: self.children.iter().map(Node::duplicate).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> (Node, NodeId, NodeId) {
        let mut root = Node::group("root");
        let mut body = Node::group("body");
        let wheel = Node::mesh(
            "wheel",
            Geometry::Imported("wheel".into()),
            Material::default(),
        );
        let wheel_id = body.add(wheel);
        let body_id = root.add(body);
        (root, body_id, wheel_id)
    }

    #[test]
    fn test_find_by_name_descends() {
        let (root, _, wheel_id) = sample_tree();
        assert_eq!(root.find_by_name("wheel").map(Node::id), Some(wheel_id));
        assert!(root.find_by_name("missing").is_none());
    }

    #[test]
    fn test_remove_nested_returns_subtree() {
        let (mut root, _, wheel_id) = sample_tree();
        let wheel = root.remove(wheel_id);
        assert_eq!(wheel.map(|n| n.name), Some("wheel".to_string()));
        assert_eq!(root.count(), 2);
        assert!(root.remove(wheel_id).is_none());
    }

    #[test]
    fn test_duplicate_assigns_fresh_ids() {
        let (root, body_id, wheel_id) = sample_tree();
        let copy = root.duplicate();
        assert_eq!(copy.count(), root.count());
        assert!(copy.find(body_id).is_none());
        assert!(copy.find(wheel_id).is_none());
        assert!(copy.find_by_name("wheel").is_some());
    }

    #[test]
    fn test_traverse_visible_skips_hidden_subtree() {
        let (mut root, body_id, _) = sample_tree();
        if let Some(body) = root.find_mut(body_id) {
            body.visible = false;
        }
        let mut seen = Vec::new();
        root.traverse_visible(&mut |n| seen.push(n.name.clone()));
        assert_eq!(seen, vec!["root".to_string()]);

        let mut all = 0;
        root.traverse(&mut |_| all += 1);
        assert_eq!(all, 3);
    }
}
