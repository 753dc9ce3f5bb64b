//! Harness errors.

use crate::backend::{ContextError, RenderError};
use crate::camera::{CameraId, CameraKind};
use crate::debug::PanelError;
use crate::loaders::LoadError;
use crate::scene::{NodeId, SceneId};
use thiserror::Error;

/// Anything that can go wrong driving a harness.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Surface setup failed. Not retried.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// A frame could not be drawn.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// An asset failed to load.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A debug panel edit was rejected.
    #[error(transparent)]
    Panel(#[from] PanelError),

    /// No camera with this id, or no camera at all.
    #[error("unknown camera {0:?}")]
    UnknownCamera(Option<CameraId>),

    /// No scene with this id, or no scene at all.
    #[error("unknown scene {0:?}")]
    UnknownScene(Option<SceneId>),

    /// No node with this id in the scene searched.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// The camera is not of the requested projection.
    #[error("camera {camera} is {found:?}, expected {expected:?}")]
    CameraKindMismatch {
        /// Camera addressed.
        camera: CameraId,
        /// Kind the caller asked for.
        expected: CameraKind,
        /// Kind of the camera.
        found: CameraKind,
    },
}
