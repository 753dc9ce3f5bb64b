//! An animated character walked around with the keyboard.

use super::{launch, Container};
use crate::animation::{CharacterConfig, CharacterController, Motion};
use crate::backend::RenderBackend;
use crate::camera::{CameraId, PerspectiveCamera};
use crate::controls::OrbitControls;
use crate::core::HarnessBuilder;
use crate::harness::{Harness, HarnessError, Stage, System};
use crate::loaders::{AssetSource, ModelLoader};
use crate::scene::{Node, NodeId, NodeKind, Scene};
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;

/// Model with `idle`, `run` and `jump` clips.
pub const CHARACTER_MODEL: &str = "models/character.glb";

/// Lets the demo read the controller while the harness ticks it.
struct SharedController(Rc<RefCell<CharacterController>>);

impl System for SharedController {
    fn update(&mut self, stage: &mut Stage, delta: f32) {
        self.0.borrow_mut().update(stage, delta);
    }
}

/// Character on a grid, run with one key and jumping with another.
pub struct CharacterDemo<B: RenderBackend> {
    /// The harness.
    pub harness: Harness<B>,
    /// Orbiting camera.
    pub camera: CameraId,
    config: CharacterConfig,
    character: Option<(NodeId, Rc<RefCell<CharacterController>>)>,
}

impl<B: RenderBackend> CharacterDemo<B> {
    /// Set up the ground and camera. The character arrives with
    /// [`load_character`](Self::load_character).
    pub fn new(backend: B, container: Container, config: CharacterConfig) -> Result<Self, HarnessError> {
        let harness_config = HarnessBuilder::new().antialias(true).shadows(true).build();
        let mut harness = launch(backend, harness_config, container)?;

        let mut scene = Scene::new();
        scene.add(Node::new(
            "ground",
            NodeKind::Grid {
                size: 50.0,
                divisions: 50,
            },
        ));

        let target = Vec3::new(0.0, 1.0, 0.0);
        let mut camera = PerspectiveCamera::new(45.0, 1.0, 0.1, 1000.0);
        camera.set_position(Vec3::new(0.0, 2.0, 5.0));
        camera.look_at(target);

        let stage = harness.stage_mut();
        stage.scenes.add("character", scene);
        let camera = stage.cameras.add("camera", camera);
        stage.sync_cameras();

        let mut controls = OrbitControls::with_target(target);
        controls.enable_damping = true;
        harness.attach_controls(controls, camera)?;

        Ok(Self {
            harness,
            camera,
            config,
            character: None,
        })
    }

    /// Load the model, bind its clips and start ticking the controller.
    pub async fn load_character(&mut self, source: &dyn AssetSource) -> Result<NodeId, HarnessError> {
        let model = ModelLoader::new(source).load(CHARACTER_MODEL).await?;
        let controller = CharacterController::new(&model.animations, self.config.clone())?;

        let scene = self
            .harness
            .stage_mut()
            .scenes
            .active_mut()
            .ok_or(HarnessError::UnknownScene(None))?;
        let node = scene.add(model.scene);

        let controller = Rc::new(RefCell::new(controller.with_node(node)));
        self.harness.add_system(SharedController(Rc::clone(&controller)));
        self.character = Some((node, controller));
        Ok(node)
    }

    /// Character root, once loaded.
    pub fn character(&self) -> Option<NodeId> {
        self.character.as_ref().map(|(node, _)| *node)
    }

    /// Key went down.
    pub fn key_down(&mut self, code: &str) {
        self.harness.stage_mut().input.press(code);
    }

    /// Key went up.
    pub fn key_up(&mut self, code: &str) {
        self.harness.stage_mut().input.release(code);
    }

    /// Current motion, once loaded.
    pub fn motion(&self) -> Option<Motion> {
        self.character
            .as_ref()
            .map(|(_, c)| c.borrow().active_motion())
    }

    /// Smoothed locomotion speed, once loaded.
    pub fn speed(&self) -> Option<f32> {
        self.character.as_ref().map(|(_, c)| c.borrow().speed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::core::Clock;
    use crate::loaders::{LoadError, MemorySource};
    use crate::testing;

    fn demo(clips: &[&str]) -> (CharacterDemo<HeadlessBackend>, Result<NodeId, HarnessError>) {
        let source = MemorySource::new()
            .with(CHARACTER_MODEL, testing::gltf_model(&["Character"], clips));
        let mut demo = CharacterDemo::new(
            HeadlessBackend::new(),
            Container::new(800, 600),
            CharacterConfig::default(),
        )
        .unwrap();
        demo.harness.set_clock(Clock::manual());
        let loaded = pollster::block_on(demo.load_character(&source));
        (demo, loaded)
    }

    fn run_frames(demo: &mut CharacterDemo<HeadlessBackend>, frames: usize, step: f64) {
        for _ in 0..frames {
            demo.harness.clock_mut().advance(step);
            demo.harness.frame().unwrap();
        }
    }

    #[test]
    fn test_missing_clip_fails_load() {
        let (demo, loaded) = demo(&["idle", "run"]);
        assert!(matches!(
            loaded,
            Err(HarnessError::Load(LoadError::MissingAsset(name))) if name == "jump"
        ));
        assert!(demo.character().is_none());
    }

    #[test]
    fn test_running_moves_character_forward() {
        let (mut demo, loaded) = demo(&["idle", "run", "jump"]);
        let node = loaded.unwrap();
        demo.harness.start();
        run_frames(&mut demo, 2, 0.05);
        assert_eq!(demo.motion(), Some(Motion::Idle));
        assert_eq!(demo.speed(), Some(0.0));

        demo.key_down("KeyW");
        run_frames(&mut demo, 20, 0.05);
        assert_eq!(demo.motion(), Some(Motion::Run));
        let speed = demo.speed().unwrap();
        assert!(speed > 2.0 && speed <= 4.0);

        let position = demo
            .harness
            .stage()
            .active_scene()
            .unwrap()
            .find(node)
            .unwrap()
            .transform
            .position;
        assert!(position.z < -0.5);
        assert!(position.x.abs() < 1e-5);

        demo.key_up("KeyW");
        demo.key_down("Space");
        run_frames(&mut demo, 1, 0.05);
        assert_eq!(demo.motion(), Some(Motion::Action));
        assert!(demo.speed().unwrap() < speed);
    }
}
