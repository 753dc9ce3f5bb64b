//! Image-lit model scenes: a lens-flared spot light over Suzanne, and an SUV
//! put together from a body and four copies of one wheel.

use super::{launch, Container};
use crate::backend::RenderBackend;
use crate::camera::{CameraId, PerspectiveCamera};
use crate::controls::OrbitControls;
use crate::core::{HarnessBuilder, ToneMapping};
use crate::harness::{Harness, HarnessError};
use crate::loaders::{AssetBatch, AssetSource, LoadProgress, LoadingManager};
use crate::scene::{Background, LensflareElement, Node, NodeId, NodeKind, Scene, SpotLight};
use glam::Vec3;
use std::cell::RefCell;
use std::f32::consts::PI;

/// Equirectangular sunset used for lighting.
pub const HDR_ENVIRONMENT: &str = "img/venice_sunset_1k.hdr";

const LENSFLARE_TEXTURE: &str = "img/lensflare0.png";
const SUZANNE_MODEL: &str = "models/suzanne_scene.glb";
const SUV_BODY: &str = "models/suv_body.glb";
const SUV_WHEEL: &str = "models/suv_wheel.glb";

/// Wheel offsets on the body, and whether the wheel faces the other way.
const WHEELS: [(Vec3, bool); 4] = [
    (Vec3::new(-0.65, 0.2, -0.77), false),
    (Vec3::new(0.65, 0.2, -0.77), true),
    (Vec3::new(-0.65, 0.2, 0.57), false),
    (Vec3::new(0.65, 0.2, 0.57), true),
];

fn damped_controls(target: Vec3) -> OrbitControls {
    let mut controls = OrbitControls::with_target(target);
    controls.enable_damping = true;
    controls
}

fn perspective(position: Vec3, target: Vec3) -> PerspectiveCamera {
    let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0);
    camera.set_position(position);
    camera.look_at(target);
    camera
}

/// Spot light with a lens flare shining on a loaded Suzanne scene.
pub struct SuzanneLensflare<B: RenderBackend> {
    /// The harness.
    pub harness: Harness<B>,
    /// Orbiting camera.
    pub camera: CameraId,
    /// The spot light.
    pub light: NodeId,
    model: Option<NodeId>,
}

impl<B: RenderBackend> SuzanneLensflare<B> {
    /// Set up the light and camera. The model arrives with
    /// [`load_assets`](Self::load_assets).
    pub fn new(backend: B, container: Container) -> Result<Self, HarnessError> {
        let config = HarnessBuilder::new()
            .antialias(true)
            .tone_mapping(ToneMapping::AcesFilmic, 0.1)
            .shadows(true)
            .build();
        let mut harness = launch(backend, config, container)?;

        let mut spot = SpotLight::new(PI * 1000.0, PI / 16.0);
        spot.cast_shadow = true;
        let mut light = Node::new("spot light", NodeKind::SpotLight(spot));
        light.transform.position = Vec3::new(5.0, 5.0, 5.0);

        let mut scene = Scene::new();
        let light = scene.add(light);
        scene.add(Node::new("spot light helper", NodeKind::SpotLightHelper { light }));

        let stage = harness.stage_mut();
        stage.scenes.add("suzanne", scene);
        let camera = stage
            .cameras
            .add("camera", perspective(Vec3::new(1.5, 0.75, 2.0), Vec3::ZERO));
        stage.sync_cameras();
        harness.attach_controls(damped_controls(Vec3::ZERO), camera)?;

        Ok(Self {
            harness,
            camera,
            light,
            model: None,
        })
    }

    /// Loaded model root, once attached.
    pub fn model(&self) -> Option<NodeId> {
        self.model
    }

    /// Load the environment map, the flare sprite and the model together
    /// and attach them.
    ///
    /// Suzanne casts shadows and the plane receives them. Nothing is
    /// attached unless every load succeeds.
    pub async fn load_assets(&mut self, source: &dyn AssetSource) -> Result<NodeId, HarnessError> {
        let mut assets = AssetBatch::new()
            .environment("environment", HDR_ENVIRONMENT)
            .model("suzanne", SUZANNE_MODEL)
            .texture("flare", LENSFLARE_TEXTURE)
            .load(source)
            .await?;
        let environment = assets.environment("environment")?;
        let flare = assets.texture("flare")?;
        let mut model = assets.take_model("suzanne")?;
        model.node_mut("Suzanne")?.cast_shadow = true;
        model.node_mut("Plane")?.receive_shadow = true;

        let scene = self
            .harness
            .stage_mut()
            .scenes
            .active_mut()
            .ok_or(HarnessError::UnknownScene(None))?;
        match scene.find_mut(self.light).map(|node| &mut node.kind) {
            Some(NodeKind::SpotLight(spot)) => spot.lensflare.push(LensflareElement {
                texture: flare,
                size: 1000.0,
                distance: 0.0,
            }),
            _ => return Err(HarnessError::UnknownNode(self.light)),
        }
        scene.set_environment(Some(environment));
        let id = scene.add(model.scene);
        self.model = Some(id);
        self.harness.request_render();
        Ok(id)
    }
}

/// SUV body and wheels under an image-lit, blurred sky.
pub struct SuvDemo<B: RenderBackend> {
    /// The harness.
    pub harness: Harness<B>,
    /// Orbiting camera.
    pub camera: CameraId,
    body: Option<NodeId>,
    loading: RefCell<LoadingManager>,
}

impl<B: RenderBackend> SuvDemo<B> {
    /// Set up an empty scene and camera. The car arrives with
    /// [`load_assets`](Self::load_assets).
    pub fn new(backend: B, container: Container) -> Result<Self, HarnessError> {
        let config = HarnessBuilder::new()
            .antialias(true)
            .tone_mapping(ToneMapping::AcesFilmic, 1.0)
            .build();
        let mut harness = launch(backend, config, container)?;

        let target = Vec3::new(0.0, 0.75, 0.0);
        let stage = harness.stage_mut();
        stage.scenes.add("suv", Scene::new());
        let camera = stage
            .cameras
            .add("camera", perspective(Vec3::new(2.0, 1.0, -2.0), target));
        stage.sync_cameras();
        harness.attach_controls(damped_controls(target), camera)?;

        Ok(Self {
            harness,
            camera,
            body: None,
            loading: RefCell::new(LoadingManager::new()),
        })
    }

    /// Body root, once attached.
    pub fn body(&self) -> Option<NodeId> {
        self.body
    }

    /// Progress of the last load.
    pub fn progress(&self) -> LoadProgress {
        self.loading.borrow().progress()
    }

    /// Fetch the environment, body and wheel concurrently, then assemble.
    ///
    /// The car is built off-scene and attached in one step, so a failed load
    /// leaves the scene exactly as it was.
    pub async fn load_assets(&mut self, source: &dyn AssetSource) -> Result<NodeId, HarnessError> {
        self.loading.borrow_mut().reset();
        let mut assets = AssetBatch::new()
            .environment("environment", HDR_ENVIRONMENT)
            .model("body", SUV_BODY)
            .model("wheel", SUV_WHEEL)
            .load_with(source, &self.loading)
            .await?;

        let environment = assets.environment("environment")?;
        let mut body = assets.take_model("body")?.scene;
        let wheel = assets.take_model("wheel")?.scene;

        let mut copies: Vec<Node> = (1..WHEELS.len()).map(|_| wheel.duplicate()).collect();
        copies.insert(0, wheel);
        for (mut wheel, (position, flipped)) in copies.into_iter().zip(WHEELS) {
            wheel.transform.position = position;
            if flipped {
                wheel.transform.rotate_y(PI);
            }
            body.add(wheel);
        }

        let scene = self
            .harness
            .stage_mut()
            .scenes
            .active_mut()
            .ok_or(HarnessError::UnknownScene(None))?;
        scene.set_environment(Some(environment.clone()));
        scene.set_background(Background::Equirect(environment));
        scene.set_background_blurriness(1.0);
        let id = scene.add(body);
        self.body = Some(id);
        self.harness.request_render();
        Ok(id)
    }
}
