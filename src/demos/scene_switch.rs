//! Two independent scenes behind one camera, switched from the panel.

use super::{launch, Container};
use crate::backend::RenderBackend;
use crate::camera::{CameraId, PerspectiveCamera};
use crate::controls::OrbitControls;
use crate::core::{HarnessBuilder, StatsPanel};
use crate::debug::{presets, ParamChange, ParamFolder};
use crate::harness::{Harness, HarnessError, Spin};
use crate::loaders::{AssetSource, CubeTextureLoader, CUBE_FACES};
use crate::scene::{Background, Geometry, Material, Node, NodeId, Scene, SceneId, Transform};
use glam::Vec3;
use std::sync::Arc;

/// Directory holding the skybox faces.
pub const SKYBOX_PATH: &str = "/penguins-skybox-pack/penguins/";

/// Skybox faces in `+x, -x, +y, -y, +z, -z` order.
pub const SKYBOX_FACES: [&str; CUBE_FACES] = [
    "arid_ft.jpg",
    "arid_bk.jpg",
    "arid_up.jpg",
    "arid_dn.jpg",
    "arid_rt.jpg",
    "arid_lf.jpg",
];

/// Cube spin in radians per second on both x and y.
pub const SPIN_RATE: f32 = 0.3;

/// Scene A: a purple cube on a teal background. Scene B: an empty skybox.
pub struct SceneSwitch<B: RenderBackend> {
    /// The harness.
    pub harness: Harness<B>,
    /// The shared camera.
    pub camera: CameraId,
    /// The cube, living in scene A.
    pub cube: NodeId,
    /// Solid-colour scene.
    pub scene_a: SceneId,
    /// Skybox scene.
    pub scene_b: SceneId,
    cube_folder: ParamFolder<Transform>,
    camera_folder: ParamFolder<PerspectiveCamera>,
}

impl<B: RenderBackend> SceneSwitch<B> {
    /// Build both scenes. Scene B's skybox is loaded before anything is
    /// shown; a missing face fails the whole demo.
    pub async fn new(
        backend: B,
        container: Container,
        source: &dyn AssetSource,
    ) -> Result<Self, HarnessError> {
        let skybox = CubeTextureLoader::new(source)
            .set_path(SKYBOX_PATH)
            .load(SKYBOX_FACES)
            .await?;

        let config = HarnessBuilder::new()
            .clear_color(0x2a2d43)
            .stats_panel(StatsPanel::Ms)
            .build();
        let mut harness = launch(backend, config, container)?;

        let mut scene_a = Scene::new();
        scene_a.set_background_color(0x135462);
        let mut material = Material::basic(0x7f2ccb).wireframe();
        material.transparent = true;
        material.opacity = 1.0;
        let cube = scene_a.add(Node::mesh(
            "cube",
            Geometry::Box {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            material,
        ));

        let mut scene_b = Scene::new();
        scene_b.set_background(Background::Cube(Arc::new(skybox)));

        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        camera.set_position(Vec3::new(0.0, 0.0, 5.0));
        camera.look_at(Vec3::ZERO);

        let stage = harness.stage_mut();
        let scene_a = stage.scenes.add("Scene A", scene_a);
        let scene_b = stage.scenes.add("Scene B", scene_b);
        let camera = stage.cameras.add("camera", camera);
        stage.sync_cameras();

        harness.attach_controls(OrbitControls::new(), camera)?;
        harness.add_system(Spin::new(cube, Vec3::new(SPIN_RATE, SPIN_RATE, 0.0)));

        Ok(Self {
            harness,
            camera,
            cube,
            scene_a,
            scene_b,
            cube_folder: presets::rotation("Cube"),
            camera_folder: presets::camera_distance("Camera"),
        })
    }

    /// Render scene A from now on.
    pub fn show_scene_a(&mut self) -> Result<(), HarnessError> {
        self.harness.stage_mut().switch_scene(self.scene_a)
    }

    /// Render scene B from now on.
    pub fn show_scene_b(&mut self) -> Result<(), HarnessError> {
        self.harness.stage_mut().switch_scene(self.scene_b)
    }

    /// Cube rotation sliders.
    pub fn cube_folder(&self) -> &ParamFolder<Transform> {
        &self.cube_folder
    }

    /// Camera distance slider.
    pub fn camera_folder(&self) -> &ParamFolder<PerspectiveCamera> {
        &self.camera_folder
    }

    /// Set a cube rotation slider. Only works while scene A is shown.
    pub fn tune_cube(&mut self, name: &str, value: f32) -> Result<ParamChange, HarnessError> {
        self.harness
            .stage_mut()
            .tune_transform(self.cube, &self.cube_folder, name, value)
    }

    /// Set the camera distance slider.
    pub fn tune_camera(&mut self, name: &str, value: f32) -> Result<ParamChange, HarnessError> {
        self.harness
            .stage_mut()
            .tune_camera(self.camera, &self.camera_folder, name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::core::{Clock, Color};
    use crate::loaders::{LoadError, MemorySource};
    use crate::testing;

    fn skybox_source(skip: Option<usize>) -> MemorySource {
        let mut source = MemorySource::new();
        for (i, face) in SKYBOX_FACES.iter().enumerate() {
            if Some(i) != skip {
                source.insert(
                    format!("{SKYBOX_PATH}{face}"),
                    testing::png_image(4, 4, [200, 180, 150, 255]),
                );
            }
        }
        source
    }

    fn demo() -> SceneSwitch<HeadlessBackend> {
        let source = skybox_source(None);
        let mut demo = pollster::block_on(SceneSwitch::new(
            HeadlessBackend::new(),
            Container::new(800, 600),
            &source,
        ))
        .unwrap();
        demo.harness.set_clock(Clock::manual());
        demo
    }

    #[test]
    fn test_missing_face_fails_setup() {
        let source = skybox_source(Some(2));
        let result = pollster::block_on(SceneSwitch::new(
            HeadlessBackend::new(),
            Container::new(800, 600),
            &source,
        ));
        assert!(matches!(
            result,
            Err(HarnessError::Load(LoadError::NotFound(url))) if url.ends_with("arid_up.jpg")
        ));
    }

    #[test]
    fn test_cube_spins_in_scene_a() {
        let mut demo = demo();
        demo.harness.start();
        demo.harness.frame().unwrap();
        demo.harness.clock_mut().advance(1.0);
        demo.harness.frame().unwrap();

        let draw = demo.harness.backend().last_draw().unwrap();
        assert_eq!(draw.scene, demo.scene_a);
        assert_eq!(draw.clear, Color::from_hex(0x135462));

        let scene = demo.harness.stage().scenes.get(demo.scene_a).unwrap();
        let rotation = scene.find(demo.cube).unwrap().transform.rotation;
        assert!((rotation.x - SPIN_RATE).abs() < 1e-5);
        assert!((rotation.y - SPIN_RATE).abs() < 1e-5);
    }

    #[test]
    fn test_switch_to_skybox_scene() {
        let mut demo = demo();
        demo.show_scene_b().unwrap();
        demo.harness.start();
        for _ in 0..5 {
            demo.harness.clock_mut().advance(0.2);
            demo.harness.frame().unwrap();
        }

        let draws = demo.harness.backend().draws();
        assert_eq!(draws.len(), 5);
        assert!(draws.iter().all(|d| d.scene == demo.scene_b && d.visible.is_empty()));
        assert!(matches!(
            demo.harness.stage().active_scene().unwrap().background(),
            Background::Cube(sky) if sky.size == 4
        ));

        let scene_a = demo.harness.stage().scenes.get(demo.scene_a).unwrap();
        assert_eq!(scene_a.find(demo.cube).unwrap().transform.rotation, Vec3::ZERO);

        demo.show_scene_a().unwrap();
        demo.harness.frame().unwrap();
        assert_eq!(demo.harness.backend().last_draw().unwrap().scene, demo.scene_a);
    }

    #[test]
    fn test_panel_sliders() {
        let mut demo = demo();
        let change = demo.tune_cube("z", 10.0).unwrap();
        assert_eq!(change.new, std::f32::consts::TAU);

        demo.tune_camera("z", 12.0).unwrap();
        let camera = demo.harness.stage().cameras.get(demo.camera).unwrap();
        assert_eq!(camera.position().z, 12.0);
        assert_eq!(demo.camera_folder().params().len(), 1);
        assert_eq!(demo.cube_folder().title(), "Cube");
    }
}
