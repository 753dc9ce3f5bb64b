//! Everything a frame reads: viewport, cameras, scenes and input.

use super::HarnessError;
use crate::camera::{Camera, CameraHelper, CameraId, CameraRig, CameraVariant};
use crate::controls::KeyboardState;
use crate::core::Viewport;
use crate::debug::{ParamChange, ParamFolder};
use crate::scene::{Node, NodeId, NodeKind, Scene, SceneId, SceneSet, Transform};

/// A frustum helper attached to a scene on behalf of a camera.
#[derive(Debug, Clone, Copy)]
struct HelperBinding {
    camera: CameraId,
    scene: SceneId,
    node: NodeId,
}

/// Harness state shared by resize, tick and render.
///
/// One value per harness instance; nothing here is global, so several
/// harnesses can coexist in one process.
#[derive(Default)]
pub struct Stage {
    viewport: Viewport,
    /// Cameras, one active.
    pub cameras: CameraRig,
    /// Scene roots, one active.
    pub scenes: SceneSet,
    /// Keys currently held.
    pub input: KeyboardState,
    helpers: Vec<HelperBinding>,
}

impl Stage {
    /// Empty stage for a viewport.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    /// Current viewport.
    #[inline]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// React to new container dimensions.
    ///
    /// Every camera gets the new aspect and a recomputed projection; helpers
    /// of cameras whose projection moved are rebuilt. Returns the physical
    /// surface size when it changed, `None` otherwise. Zero sizes are ignored.
    pub fn on_resize(&mut self, width: u32, height: u32) -> Option<(u32, u32)> {
        if width == 0 || height == 0 {
            log::debug!("Ignoring zero-sized resize to {}x{}", width, height);
            return None;
        }
        let before = self.viewport.physical_size();
        self.viewport.resize(width, height);
        self.sync_cameras();

        let after = self.viewport.physical_size();
        (after != before).then_some(after)
    }

    /// Apply a new device pixel ratio. Returns the physical size if it changed.
    pub fn set_device_pixel_ratio(&mut self, ratio: f64) -> Option<(u32, u32)> {
        let before = self.viewport.physical_size();
        self.viewport.set_device_pixel_ratio(ratio);
        let after = self.viewport.physical_size();
        (after != before).then_some(after)
    }

    /// Push the viewport aspect into every camera.
    pub fn sync_cameras(&mut self) {
        let aspect = self.viewport.aspect();
        let mut moved = Vec::new();
        for camera in self.cameras.iter_mut() {
            let before = camera.projection_matrix();
            camera.apply_aspect(aspect);
            if camera.projection_matrix() != before {
                moved.push(camera.id());
            }
        }
        for camera in moved {
            if let Err(err) = self.refresh_camera_helper(camera) {
                log::debug!("No helper refresh for {}: {}", camera, err);
            }
        }
    }

    /// The camera frames are drawn through.
    pub fn active_camera(&self) -> Result<&Camera, HarnessError> {
        self.cameras.active().ok_or(HarnessError::UnknownCamera(None))
    }

    /// The scene frames draw.
    pub fn active_scene(&self) -> Result<&Scene, HarnessError> {
        self.scenes.active().ok_or(HarnessError::UnknownScene(None))
    }

    /// Select the camera to render through.
    pub fn set_active_camera(&mut self, id: CameraId) -> Result<(), HarnessError> {
        if !self.cameras.set_active(id) {
            return Err(HarnessError::UnknownCamera(Some(id)));
        }
        self.update_helper_visibility();
        Ok(())
    }

    /// Select the camera registered under `name`.
    pub fn set_active_camera_by_name(&mut self, name: &str) -> Result<CameraId, HarnessError> {
        let id = self
            .cameras
            .set_active_by_name(name)
            .ok_or(HarnessError::UnknownCamera(None))?;
        self.update_helper_visibility();
        Ok(id)
    }

    /// Select the scene to render. The previous scene is left as it is.
    pub fn switch_scene(&mut self, id: SceneId) -> Result<(), HarnessError> {
        if self.scenes.switch_to(id) {
            Ok(())
        } else {
            Err(HarnessError::UnknownScene(Some(id)))
        }
    }

    /// Select the scene registered under `name`.
    pub fn switch_scene_by_name(&mut self, name: &str) -> Result<SceneId, HarnessError> {
        self.scenes
            .switch_to_name(name)
            .ok_or(HarnessError::UnknownScene(None))
    }

    /// Show `camera`'s frustum inside `scene`.
    ///
    /// Replaces any helper the camera already had.
    pub fn attach_camera_helper(
        &mut self,
        camera: CameraId,
        scene: SceneId,
    ) -> Result<NodeId, HarnessError> {
        self.detach_camera_helper(camera);
        let node = self.build_helper_node(camera)?;
        let target = self
            .scenes
            .get_mut(scene)
            .ok_or(HarnessError::UnknownScene(Some(scene)))?;
        let node = target.add(node);
        self.helpers.push(HelperBinding {
            camera,
            scene,
            node,
        });
        Ok(node)
    }

    /// Replace `camera`'s helper with one built from its current projection.
    ///
    /// The stale node is removed and a new node with a new id takes its
    /// place. Returns the new node id.
    pub fn refresh_camera_helper(&mut self, camera: CameraId) -> Result<NodeId, HarnessError> {
        let index = self
            .helpers
            .iter()
            .position(|h| h.camera == camera)
            .ok_or(HarnessError::UnknownCamera(Some(camera)))?;
        let binding = self.helpers[index];

        let node = self.build_helper_node(camera)?;
        let scene = self
            .scenes
            .get_mut(binding.scene)
            .ok_or(HarnessError::UnknownScene(Some(binding.scene)))?;
        scene.remove(binding.node);
        let node = scene.add(node);
        self.helpers[index].node = node;
        Ok(node)
    }

    /// Remove `camera`'s helper. Returns the detached node, if there was one.
    pub fn detach_camera_helper(&mut self, camera: CameraId) -> Option<Node> {
        let index = self.helpers.iter().position(|h| h.camera == camera)?;
        let binding = self.helpers.remove(index);
        self.scenes
            .get_mut(binding.scene)
            .and_then(|scene| scene.remove(binding.node))
    }

    /// Node currently showing `camera`'s frustum.
    pub fn camera_helper(&self, camera: CameraId) -> Option<&CameraHelper> {
        let binding = self.helpers.iter().find(|h| h.camera == camera)?;
        match &self.scenes.get(binding.scene)?.find(binding.node)?.kind {
            NodeKind::CameraHelper(helper) => Some(helper),
            _ => None,
        }
    }

    /// Node id of `camera`'s helper.
    pub fn camera_helper_node(&self, camera: CameraId) -> Option<NodeId> {
        self.helpers
            .iter()
            .find(|h| h.camera == camera)
            .map(|h| h.node)
    }

    fn build_helper_node(&self, camera: CameraId) -> Result<Node, HarnessError> {
        let source = self
            .cameras
            .get(camera)
            .ok_or(HarnessError::UnknownCamera(Some(camera)))?;
        let name = match self.cameras.name_of(camera) {
            Some(name) => format!("{} helper", name),
            None => "camera helper".to_string(),
        };
        let mut node = Node::new(name, NodeKind::CameraHelper(CameraHelper::new(source)));
        // Looking through a camera, its own frustum is just noise.
        node.visible = self.cameras.active_id() != Some(camera);
        Ok(node)
    }

    fn update_helper_visibility(&mut self) {
        let active = self.cameras.active_id();
        for binding in &self.helpers {
            if let Some(node) = self
                .scenes
                .get_mut(binding.scene)
                .and_then(|scene| scene.find_mut(binding.node))
            {
                node.visible = active != Some(binding.camera);
            }
        }
    }

    /// Set one parameter of a camera through a panel folder.
    ///
    /// The projection is recomputed and, if the value moved, the camera's
    /// helper is rebuilt.
    pub fn tune_camera<T: CameraVariant>(
        &mut self,
        camera: CameraId,
        folder: &ParamFolder<T>,
        name: &str,
        value: f32,
    ) -> Result<ParamChange, HarnessError> {
        let entry = self
            .cameras
            .get_mut(camera)
            .ok_or(HarnessError::UnknownCamera(Some(camera)))?;
        let found = entry.kind();
        let variant = T::from_camera_mut(entry).ok_or(HarnessError::CameraKindMismatch {
            camera,
            expected: T::KIND,
            found,
        })?;
        let change = folder.set(variant, name, value)?;
        entry.update_projection_matrix();

        if change.changed() && self.camera_helper_node(camera).is_some() {
            self.refresh_camera_helper(camera)?;
        }
        Ok(change)
    }

    /// Set one transform parameter of a node in the active scene.
    pub fn tune_transform(
        &mut self,
        node: NodeId,
        folder: &ParamFolder<Transform>,
        name: &str,
        value: f32,
    ) -> Result<ParamChange, HarnessError> {
        let target = self
            .scenes
            .active_mut()
            .ok_or(HarnessError::UnknownScene(None))?
            .find_mut(node)
            .ok_or(HarnessError::UnknownNode(node))?;
        Ok(folder.set(&mut target.transform, name, value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{CameraKind, OrthographicCamera, PerspectiveCamera};
    use crate::debug::presets;
    use glam::Vec3;

    fn debug_stage() -> (Stage, CameraId, CameraId, SceneId) {
        let mut stage = Stage::new(Viewport::new(800, 400, 1.0, 2.0));
        let scene = stage.scenes.add("main", Scene::new());
        let mut main = PerspectiveCamera::new(75.0, 1.0, 0.1, 10.0);
        main.set_position(Vec3::new(0.0, 2.0, 5.0));
        let main = stage.cameras.add("main", main);
        let debug = stage.cameras.add("debug", PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0));
        (stage, main, debug, scene)
    }

    #[test]
    fn test_resize_updates_every_camera() {
        let mut stage = Stage::new(Viewport::new(800, 600, 3.0, 2.0));
        let persp = stage.cameras.add("persp", PerspectiveCamera::new(50.0, 2.0, 0.1, 1000.0));
        let ortho = stage
            .cameras
            .add("ortho", OrthographicCamera::new(-4.0, 4.0, 4.0, -4.0, -5.0, 10.0));

        assert_eq!(stage.on_resize(1000, 500), Some((2000, 1000)));

        let persp = stage.cameras.get(persp).and_then(Camera::as_perspective).unwrap();
        assert_eq!(persp.aspect, 2.0);
        let ortho = stage.cameras.get(ortho).and_then(Camera::as_orthographic).unwrap();
        assert_eq!((ortho.left, ortho.right), (-8.0, 8.0));
        assert_eq!((ortho.top, ortho.bottom), (4.0, -4.0));
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut stage = Stage::new(Viewport::new(800, 600, 1.0, 2.0));
        let id = stage
            .cameras
            .add("ortho", OrthographicCamera::new(-4.0, 4.0, 4.0, -4.0, -5.0, 10.0));

        assert!(stage.on_resize(1200, 600).is_some());
        let projection = stage.cameras.get(id).unwrap().projection_matrix();
        assert!(stage.on_resize(1200, 600).is_none());
        assert_eq!(stage.cameras.get(id).unwrap().projection_matrix(), projection);
        assert!(stage.on_resize(0, 600).is_none());
    }

    #[test]
    fn test_unknown_selection_is_an_error() {
        let mut stage = Stage::default();
        assert!(matches!(stage.active_camera(), Err(HarnessError::UnknownCamera(None))));
        assert!(matches!(stage.active_scene(), Err(HarnessError::UnknownScene(None))));
        let stray = Scene::new().id();
        assert!(matches!(
            stage.switch_scene(stray),
            Err(HarnessError::UnknownScene(Some(id))) if id == stray
        ));
    }

    #[test]
    fn test_helper_refresh_builds_new_helper() {
        let (mut stage, main, debug, scene) = debug_stage();
        stage.set_active_camera(debug).unwrap();
        let first = stage.attach_camera_helper(main, scene).unwrap();
        let old = stage.camera_helper(main).unwrap().clone();

        let folder = presets::perspective_camera("Main Camera", 10.0);
        stage.tune_camera(main, &folder, "far", 4.0).unwrap();

        let second = stage.camera_helper_node(main).unwrap();
        assert_ne!(first, second);
        assert!(stage.scenes.get(scene).unwrap().find(first).is_none());

        let new = stage.camera_helper(main).unwrap();
        assert_ne!(new.id(), old.id());
        assert_ne!(new.corners(), old.corners());
        assert_eq!(stage.scenes.get(scene).unwrap().count_objects(), 1);
    }

    #[test]
    fn test_unchanged_value_keeps_helper() {
        let (mut stage, main, _debug, scene) = debug_stage();
        let node = stage.attach_camera_helper(main, scene).unwrap();
        let folder = presets::perspective_camera("Main Camera", 10.0);
        let change = stage.tune_camera(main, &folder, "fov", 75.0).unwrap();
        assert!(!change.changed());
        assert_eq!(stage.camera_helper_node(main), Some(node));
    }

    #[test]
    fn test_helper_hidden_while_looking_through_its_camera() {
        let (mut stage, main, debug, scene) = debug_stage();
        let node = stage.attach_camera_helper(main, scene).unwrap();
        let visible = |stage: &Stage| stage.scenes.get(scene).unwrap().find(node).unwrap().visible;

        assert!(!visible(&stage));
        stage.set_active_camera(debug).unwrap();
        assert!(visible(&stage));
        stage.set_active_camera_by_name("main").unwrap();
        assert!(!visible(&stage));
    }

    #[test]
    fn test_detach_helper() {
        let (mut stage, main, _debug, scene) = debug_stage();
        stage.attach_camera_helper(main, scene).unwrap();
        assert!(stage.detach_camera_helper(main).is_some());
        assert!(stage.camera_helper(main).is_none());
        assert_eq!(stage.scenes.get(scene).unwrap().count_objects(), 0);
        assert!(stage.detach_camera_helper(main).is_none());
    }

    #[test]
    fn test_tune_wrong_camera_kind() {
        let (mut stage, main, _debug, _scene) = debug_stage();
        let folder = presets::orthographic_camera("Orthographic Camera");
        let err = stage.tune_camera(main, &folder, "left", -2.0).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::CameraKindMismatch {
                expected: CameraKind::Orthographic,
                found: CameraKind::Perspective,
                ..
            }
        ));
    }

    #[test]
    fn test_tune_transform_clamps() {
        let (mut stage, _main, _debug, _scene) = debug_stage();
        let cube = stage
            .scenes
            .active_mut()
            .unwrap()
            .add(Node::group("cube"));
        let folder = presets::rotation("Cube");
        let change = stage.tune_transform(cube, &folder, "x", -1.0).unwrap();
        assert_eq!(change.new, 0.0);
        assert!(matches!(
            stage.tune_transform(cube, &folder, "w", 1.0),
            Err(HarnessError::Panel(_))
        ));
    }
}
