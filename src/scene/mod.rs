//! # Scene Module
//!
//! Scene graph: owned node trees under independent scene roots, and the
//! set that selects which root is drawn.

mod node;
mod scene;
mod set;
mod transform;

pub use node::{Geometry, LensflareElement, Material, Node, NodeId, NodeKind, Shading, SpotLight};
pub use scene::{Background, Scene, SceneId};
pub use set::SceneSet;
pub use transform::Transform;
