//! # Harness Module
//!
//! The scene harness: owns the stage, a render backend and the frame loop.
//!
//! A frame is `tick` (controls and systems advance by the elapsed time)
//! followed by `render` (the active scene drawn through the active camera).
//! In continuous mode every display refresh produces a frame; in on-demand
//! mode only refreshes that follow a redraw request do, and systems then
//! advance by all the time that passed since the previous frame.

mod error;
mod scheduler;
mod stage;
mod system;

pub use error::HarnessError;
pub use scheduler::{RedrawRequest, Scheduler};
pub use stage::Stage;
pub use system::{LookAt, Spin, System};

use crate::backend::{RenderBackend, SurfaceDescriptor};
use crate::camera::CameraId;
use crate::controls::{ListenerId, OrbitControls};
use crate::core::{Clock, FrameStats, HarnessConfig, ScheduleMode, Viewport};

struct ControlsBinding {
    controls: OrbitControls,
    camera: CameraId,
    listener: ListenerId,
}

/// Drives one interactive scene.
pub struct Harness<B: RenderBackend> {
    stage: Stage,
    backend: B,
    config: HarnessConfig,
    scheduler: Scheduler,
    clock: Clock,
    stats: FrameStats,
    systems: Vec<Box<dyn System>>,
    controls: Option<ControlsBinding>,
    /// Seconds since the last drawn frame.
    pending: f32,
    frames: u64,
}

impl<B: RenderBackend> Harness<B> {
    /// Size the surface to its container and hand it to the backend.
    ///
    /// `container` is in CSS pixels; the device pixel ratio is clamped to
    /// `config.max_pixel_ratio`. A backend that cannot provide a surface is
    /// fatal.
    pub fn new(
        mut backend: B,
        config: HarnessConfig,
        container: (u32, u32),
        device_pixel_ratio: f64,
    ) -> Result<Self, HarnessError> {
        let viewport = Viewport::new(
            container.0,
            container.1,
            device_pixel_ratio,
            config.max_pixel_ratio,
        );
        let (width, height) = viewport.physical_size();
        backend.configure(&SurfaceDescriptor::new(&config, width, height))?;
        log::info!(
            "Harness surface {}x{} (pixel ratio {})",
            width,
            height,
            viewport.pixel_ratio()
        );

        Ok(Self {
            stage: Stage::new(viewport),
            backend,
            scheduler: Scheduler::new(config.schedule),
            stats: FrameStats::new(config.stats_panel),
            config,
            clock: Clock::new(),
            systems: Vec::new(),
            controls: None,
            pending: 0.0,
            frames: 0,
        })
    }

    /// Replace the frame clock, e.g. with [`Clock::manual`].
    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    /// Get the frame clock.
    #[inline]
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Get the stage.
    #[inline]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Get the stage mutably.
    #[inline]
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    /// Get the backend.
    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get the backend mutably.
    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Frame timing readout.
    #[inline]
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Frame timing readout, mutably (to switch panels).
    #[inline]
    pub fn stats_mut(&mut self) -> &mut FrameStats {
        &mut self.stats
    }

    /// Configuration the harness was built with.
    #[inline]
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Frame scheduler.
    #[inline]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Frames rendered so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Register something to advance every tick.
    pub fn add_system(&mut self, system: impl System + 'static) {
        self.systems.push(Box::new(system));
    }

    /// Drive `camera` with orbit controls.
    ///
    /// Every control change requests a redraw. Previously attached controls
    /// are detached first.
    pub fn attach_controls(
        &mut self,
        mut controls: OrbitControls,
        camera: CameraId,
    ) -> Result<(), HarnessError> {
        if self.stage.cameras.get(camera).is_none() {
            return Err(HarnessError::UnknownCamera(Some(camera)));
        }
        self.detach_controls();

        let redraw = self.scheduler.redraw().clone();
        let listener = controls.listeners_mut().subscribe(move || redraw.request());
        self.controls = Some(ControlsBinding {
            controls,
            camera,
            listener,
        });
        Ok(())
    }

    /// Stop driving the camera. The redraw listener is removed before the
    /// controls are handed back.
    pub fn detach_controls(&mut self) -> Option<OrbitControls> {
        let mut binding = self.controls.take()?;
        binding.controls.listeners_mut().unsubscribe(binding.listener);
        Some(binding.controls)
    }

    /// Attached controls.
    pub fn controls_mut(&mut self) -> Option<&mut OrbitControls> {
        self.controls.as_mut().map(|b| &mut b.controls)
    }

    /// Ask for one more frame in on-demand mode.
    pub fn request_render(&self) {
        self.scheduler.redraw().request();
    }

    /// React to new container dimensions.
    ///
    /// Cameras are updated; the backend surface is resized only when the
    /// physical size changed.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if let Some((w, h)) = self.stage.on_resize(width, height) {
            self.backend.resize(w, h);
            self.request_render();
        }
    }

    /// Apply a new device pixel ratio.
    pub fn set_device_pixel_ratio(&mut self, ratio: f64) {
        if let Some((w, h)) = self.stage.set_device_pixel_ratio(ratio) {
            self.backend.resize(w, h);
            self.request_render();
        }
    }

    fn update_controls(&mut self, delta: f32) {
        if let Some(binding) = self.controls.as_mut() {
            if let Some(camera) = self.stage.cameras.get_mut(binding.camera) {
                binding.controls.update(camera, delta);
            }
        }
    }

    fn update_systems(&mut self, delta: f32) {
        for system in self.systems.iter_mut() {
            system.update(&mut self.stage, delta);
        }
    }

    /// Advance controls and systems by `delta` seconds.
    pub fn tick(&mut self, delta: f32) {
        self.update_controls(delta);
        self.update_systems(delta);
    }

    /// Draw the active scene through the active camera.
    pub fn render(&mut self) -> Result<(), HarnessError> {
        let scene = self.stage.active_scene()?;
        let camera = self.stage.active_camera()?;
        self.backend.draw(scene, camera)?;
        self.frames += 1;
        Ok(())
    }

    /// Start the loop.
    pub fn start(&mut self) {
        self.clock.start();
        self.scheduler.start();
    }

    /// Stop the loop.
    pub fn stop(&mut self) {
        self.scheduler.stop();
        self.clock.stop();
    }

    /// Check if the loop is running.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Handle one display refresh. Returns `true` if a frame was drawn.
    pub fn frame(&mut self) -> Result<bool, HarnessError> {
        if !self.scheduler.is_running() {
            return Ok(false);
        }
        let delta = self.clock.get_delta() as f32;
        self.pending += delta;

        let mode = self.scheduler.mode();
        if mode == ScheduleMode::OnDemand {
            // Damped controls keep emitting changes until they settle.
            self.update_controls(delta);
        }
        if !self.scheduler.should_render() {
            return Ok(false);
        }

        let elapsed = std::mem::take(&mut self.pending);
        self.stats.begin(self.clock.now());
        match mode {
            ScheduleMode::Continuous => self.tick(elapsed),
            ScheduleMode::OnDemand => self.update_systems(elapsed),
        }
        self.stats.end(self.clock.now());

        self.render()?;
        self.stats.update(self.clock.now());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::camera::PerspectiveCamera;
    use crate::core::HarnessBuilder;
    use crate::scene::{Geometry, Material, Node, Scene};
    use glam::Vec3;

    fn cube() -> Node {
        Node::mesh(
            "cube",
            Geometry::Box {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            Material::normal().wireframe(),
        )
    }

    fn harness(mode: ScheduleMode) -> (Harness<HeadlessBackend>, CameraId) {
        let config = HarnessBuilder::new().schedule(mode).build();
        let mut harness = Harness::new(HeadlessBackend::new(), config, (800, 600), 1.0).unwrap();
        harness.set_clock(Clock::manual());
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0);
        camera.set_position(Vec3::new(0.0, 0.0, 5.0));
        camera.look_at(Vec3::ZERO);
        let camera = harness.stage_mut().cameras.add("main", camera);
        harness.stage_mut().scenes.add("main", Scene::new());
        (harness, camera)
    }

    #[test]
    fn test_context_failure_is_fatal() {
        let result = Harness::new(
            HeadlessBackend::refusing("no adapter"),
            HarnessConfig::default(),
            (800, 600),
            1.0,
        );
        assert!(matches!(result, Err(HarnessError::Context(_))));
    }

    #[test]
    fn test_surface_uses_clamped_pixel_ratio() {
        let harness = Harness::new(HeadlessBackend::new(), HarnessConfig::default(), (640, 480), 3.0)
            .unwrap();
        assert_eq!(harness.backend().size(), Some((1280, 960)));
    }

    #[test]
    fn test_resize_reaches_backend_once() {
        let (mut harness, camera) = harness(ScheduleMode::Continuous);
        harness.on_resize(1000, 500);
        harness.on_resize(1000, 500);

        assert_eq!(harness.backend().resizes(), &[(1000, 500)]);
        let aspect = harness
            .stage()
            .cameras
            .get(camera)
            .and_then(|c| c.as_perspective())
            .map(|c| c.aspect);
        assert_eq!(aspect, Some(2.0));
    }

    #[test]
    fn test_continuous_frame_ticks_and_renders() {
        let (mut harness, _camera) = harness(ScheduleMode::Continuous);
        let node = harness
            .stage_mut()
            .scenes
            .active_mut()
            .unwrap()
            .add(cube());
        harness.add_system(Spin::new(node, Vec3::new(1.0, 2.0, 0.0)));

        assert!(!harness.frame().unwrap());
        harness.start();
        assert!(harness.frame().unwrap());
        harness.clock_mut().advance(0.5);
        assert!(harness.frame().unwrap());

        let rotation = harness
            .stage()
            .active_scene()
            .unwrap()
            .find(node)
            .unwrap()
            .transform
            .rotation;
        assert!((rotation - Vec3::new(0.5, 1.0, 0.0)).length() < 1e-5);
        assert_eq!(harness.backend().draws().len(), 2);
        assert_eq!(harness.stats().frames(), 2);
    }

    #[test]
    fn test_closure_system() {
        let (mut harness, _camera) = harness(ScheduleMode::Continuous);
        harness.add_system(|stage: &mut Stage, _delta: f32| stage.input.press("KeyW"));
        harness.tick(0.016);
        assert!(harness.stage().input.is_pressed("KeyW"));
    }

    #[test]
    fn test_on_demand_renders_after_changes_only() {
        let (mut harness, camera) = harness(ScheduleMode::OnDemand);
        harness.attach_controls(OrbitControls::new(), camera).unwrap();
        harness.start();

        assert!(harness.frame().unwrap());
        assert!(!harness.frame().unwrap());
        assert!(!harness.frame().unwrap());

        if let Some(controls) = harness.controls_mut() {
            controls.rotate(0.3, 0.0);
        }
        assert!(harness.frame().unwrap());
        assert!(!harness.frame().unwrap());

        harness.request_render();
        assert!(harness.frame().unwrap());
        assert_eq!(harness.backend().draws().len(), 3);
    }

    #[test]
    fn test_on_demand_systems_catch_up_when_drawn() {
        let (mut harness, _camera) = harness(ScheduleMode::OnDemand);
        let node = harness
            .stage_mut()
            .scenes
            .active_mut()
            .unwrap()
            .add(cube());
        harness.add_system(Spin::new(node, Vec3::new(1.0, 0.0, 0.0)));
        let rotation = |harness: &Harness<HeadlessBackend>| {
            harness
                .stage()
                .active_scene()
                .unwrap()
                .find(node)
                .unwrap()
                .transform
                .rotation
                .x
        };

        harness.start();
        harness.clock_mut().advance(0.5);
        assert!(harness.frame().unwrap());
        assert!((rotation(&harness) - 0.5).abs() < 1e-5);

        harness.clock_mut().advance(0.25);
        assert!(!harness.frame().unwrap());
        harness.clock_mut().advance(0.25);
        assert!(!harness.frame().unwrap());
        assert!((rotation(&harness) - 0.5).abs() < 1e-5);

        harness.request_render();
        assert!(harness.frame().unwrap());
        assert!((rotation(&harness) - 1.0).abs() < 1e-5);
        assert_eq!(harness.stats().frames(), 2);
    }

    #[test]
    fn test_on_demand_resize_redraws() {
        let (mut harness, _camera) = harness(ScheduleMode::OnDemand);
        harness.start();
        assert!(harness.frame().unwrap());
        harness.on_resize(400, 400);
        assert!(harness.frame().unwrap());
        assert_eq!(harness.backend().last_draw().map(|d| d.size), Some((400, 400)));
    }

    #[test]
    fn test_detached_controls_leave_no_listener() {
        let (mut harness, camera) = harness(ScheduleMode::OnDemand);
        assert_eq!(harness.scheduler().redraw().handles(), 1);

        harness.attach_controls(OrbitControls::new(), camera).unwrap();
        assert_eq!(harness.scheduler().redraw().handles(), 2);
        harness.attach_controls(OrbitControls::new(), camera).unwrap();
        assert_eq!(harness.scheduler().redraw().handles(), 2);

        let controls = harness.detach_controls().unwrap();
        assert!(controls.listeners().is_empty());
        assert_eq!(harness.scheduler().redraw().handles(), 1);
    }

    #[test]
    fn test_controls_need_known_camera() {
        let (mut harness, _camera) = harness(ScheduleMode::OnDemand);
        let stray = PerspectiveCamera::default().id();
        assert!(matches!(
            harness.attach_controls(OrbitControls::new(), stray),
            Err(HarnessError::UnknownCamera(Some(_)))
        ));
    }

    #[test]
    fn test_scene_switch_renders_selected_root_only() {
        let (mut harness, _camera) = harness(ScheduleMode::Continuous);
        let a = harness.stage().scenes.active_id().unwrap();
        let spinning = harness
            .stage_mut()
            .scenes
            .active_mut()
            .unwrap()
            .add(cube());
        let mut scene_b = Scene::new();
        scene_b.add(Node::group("b-only"));
        let b = harness.stage_mut().scenes.add("b", scene_b);
        harness.add_system(Spin::new(spinning, Vec3::ONE));

        harness.stage_mut().switch_scene(b).unwrap();
        harness.start();
        for _ in 0..3 {
            harness.clock_mut().advance(0.1);
            harness.frame().unwrap();
        }

        assert!(harness.backend().draws().iter().all(|d| d.scene == b));
        assert_eq!(harness.backend().last_draw().unwrap().visible, ["b-only"]);

        let scene_a = harness.stage().scenes.get(a).unwrap();
        let node = scene_a.find(spinning).unwrap();
        assert_eq!(node.transform.rotation, Vec3::ZERO);
        assert_eq!(scene_a.count_objects(), 1);
    }

    #[test]
    fn test_render_without_camera_fails() {
        let mut harness =
            Harness::new(HeadlessBackend::new(), HarnessConfig::default(), (10, 10), 1.0).unwrap();
        harness.stage_mut().scenes.add("main", Scene::new());
        assert!(matches!(harness.render(), Err(HarnessError::UnknownCamera(None))));
    }
}
