//! Looking at a camera's frustum from a second, free camera.

use super::{launch, wireframe_cube, Container};
use crate::backend::RenderBackend;
use crate::camera::{Camera, CameraId, OrthographicCamera, PerspectiveCamera};
use crate::core::HarnessConfig;
use crate::debug::{presets, ChoiceParam, ParamChange, ParamFolder};
use crate::harness::{Harness, HarnessError, LookAt, Stage};
use crate::scene::{Node, NodeId, NodeKind, Scene, SceneId};
use glam::Vec3;

const MAIN: &str = "main";
const DEBUG: &str = "debug";

fn debug_camera() -> PerspectiveCamera {
    let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
    camera.set_position(Vec3::new(10.0, 10.0, 10.0));
    camera.look_at(Vec3::ZERO);
    camera
}

fn grid_scene() -> (Scene, NodeId) {
    let mut scene = Scene::new();
    scene.add(Node::new(
        "grid",
        NodeKind::Grid {
            size: 10.0,
            divisions: 10,
        },
    ));
    let mut cube = wireframe_cube("cube");
    cube.transform.position.y = 0.5;
    let cube = scene.add(cube);
    (scene, cube)
}

/// Common setup: grid, cube, a main camera with a helper and a free debug
/// camera that starts active.
fn assemble<B: RenderBackend>(
    backend: B,
    container: Container,
    main: impl Into<Camera>,
) -> Result<(Harness<B>, CameraId, CameraId, SceneId, NodeId), HarnessError> {
    let mut harness = launch(backend, HarnessConfig::default(), container)?;
    let (scene, cube) = grid_scene();

    let stage: &mut Stage = harness.stage_mut();
    let scene = stage.scenes.add("scene", scene);
    let main = stage.cameras.add(MAIN, main);
    let debug = stage.cameras.add(DEBUG, debug_camera());
    stage.sync_cameras();
    stage.attach_camera_helper(main, scene)?;
    stage.set_active_camera(debug)?;

    Ok((harness, main, debug, scene, cube))
}

fn camera_choice() -> ChoiceParam {
    ChoiceParam::new("activeCamera", [MAIN, DEBUG], DEBUG)
}

fn select<B: RenderBackend>(
    harness: &mut Harness<B>,
    choice: &mut ChoiceParam,
    name: &str,
) -> Result<CameraId, HarnessError> {
    let selected = choice.select(name)?.to_string();
    harness.stage_mut().set_active_camera_by_name(&selected)
}

/// Perspective main camera inspected from a debug camera.
///
/// The main camera re-aims at the cube every tick; every edit to its
/// parameters rebuilds its frustum helper.
pub struct PerspectiveDebug<B: RenderBackend> {
    /// The harness.
    pub harness: Harness<B>,
    /// Camera being inspected.
    pub main: CameraId,
    /// Free camera.
    pub debug: CameraId,
    /// The only scene.
    pub scene: SceneId,
    /// The cube.
    pub cube: NodeId,
    main_folder: ParamFolder<PerspectiveCamera>,
    debug_folder: ParamFolder<PerspectiveCamera>,
    active: ChoiceParam,
}

impl<B: RenderBackend> PerspectiveDebug<B> {
    /// Build the scene.
    pub fn new(backend: B, container: Container) -> Result<Self, HarnessError> {
        let mut main = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        main.set_position(Vec3::new(0.0, 2.0, 5.0));
        main.look_at(Vec3::new(0.0, 1.0, 0.0));

        let (mut harness, main, debug, scene, cube) = assemble(backend, container, main)?;
        harness.add_system(LookAt::new(main, Vec3::new(0.0, 0.5, 0.0)));

        Ok(Self {
            harness,
            main,
            debug,
            scene,
            cube,
            main_folder: presets::perspective_camera("Main Camera", 10.0),
            debug_folder: presets::perspective_camera("Debug Camera", 20.0),
            active: camera_choice(),
        })
    }

    /// Name of the camera being rendered through.
    pub fn active_camera(&self) -> &str {
        self.active.selected()
    }

    /// Render through `"main"` or `"debug"`.
    pub fn select_camera(&mut self, name: &str) -> Result<CameraId, HarnessError> {
        select(&mut self.harness, &mut self.active, name)
    }

    /// Set a main camera slider; the helper follows.
    pub fn tune_main(&mut self, name: &str, value: f32) -> Result<ParamChange, HarnessError> {
        self.harness
            .stage_mut()
            .tune_camera(self.main, &self.main_folder, name, value)
    }

    /// Set a debug camera slider.
    pub fn tune_debug(&mut self, name: &str, value: f32) -> Result<ParamChange, HarnessError> {
        self.harness
            .stage_mut()
            .tune_camera(self.debug, &self.debug_folder, name, value)
    }
}

/// Orthographic main camera inspected from a debug camera.
pub struct OrthographicDebug<B: RenderBackend> {
    /// The harness.
    pub harness: Harness<B>,
    /// Camera being inspected.
    pub main: CameraId,
    /// Free camera.
    pub debug: CameraId,
    /// The only scene.
    pub scene: SceneId,
    /// The cube.
    pub cube: NodeId,
    main_folder: ParamFolder<OrthographicCamera>,
    debug_folder: ParamFolder<PerspectiveCamera>,
    active: ChoiceParam,
}

impl<B: RenderBackend> OrthographicDebug<B> {
    /// Build the scene.
    pub fn new(backend: B, container: Container) -> Result<Self, HarnessError> {
        let mut main = OrthographicCamera::new(-4.0, 4.0, 4.0, -4.0, -5.0, 10.0);
        main.set_position(Vec3::new(1.0, 1.0, 1.0));
        main.look_at(Vec3::new(0.0, 0.5, 0.0));

        let (harness, main, debug, scene, cube) = assemble(backend, container, main)?;

        Ok(Self {
            harness,
            main,
            debug,
            scene,
            cube,
            main_folder: presets::orthographic_camera("Orthographic Camera"),
            debug_folder: presets::camera_position("Debug Camera", 20.0),
            active: camera_choice(),
        })
    }

    /// Name of the camera being rendered through.
    pub fn active_camera(&self) -> &str {
        self.active.selected()
    }

    /// Render through `"main"` or `"debug"`.
    pub fn select_camera(&mut self, name: &str) -> Result<CameraId, HarnessError> {
        select(&mut self.harness, &mut self.active, name)
    }

    /// Set a frustum slider; the helper follows.
    pub fn tune_main(&mut self, name: &str, value: f32) -> Result<ParamChange, HarnessError> {
        self.harness
            .stage_mut()
            .tune_camera(self.main, &self.main_folder, name, value)
    }

    /// Move the debug camera.
    pub fn tune_debug(&mut self, name: &str, value: f32) -> Result<ParamChange, HarnessError> {
        self.harness
            .stage_mut()
            .tune_camera(self.debug, &self.debug_folder, name, value)
    }
}
