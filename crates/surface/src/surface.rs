use vitrine_render::{RenderError, RenderView, SceneRenderer};
use vitrine_scene::{MotionSet, Scene};

use crate::boundary::{FailureBoundary, FALLBACK_NOTICE};
use crate::clock::{FrameClock, Subscription};
use crate::config::SurfaceConfig;
use crate::indicator::LoadingIndicator;
use crate::rig::install_lighting_rig;

/// Caller-supplied decorative content. Re-invoked on retry so a remounted
/// surface gets a freshly constructed subtree.
pub type ContentFn = dyn Fn(&mut Scene, &mut MotionSet);

/// Fallible renderer constructor. Context creation failures surface here.
pub type FactoryFn<R> = dyn FnMut() -> Result<R, RenderError>;

/// What the host should show for this surface right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceView<'a> {
    /// Not yet initialized: cover the region with the loading indicator.
    Loading { label: &'a str },
    /// Initialized: decorative content is rendering, no further gating.
    Live,
    /// Tripped: show the fallback notice with a retry control.
    Failed { notice: &'static str },
}

/// The render surface controller.
///
/// Owns one viewport's scene, motion table, clock, and renderer, and
/// supervises every fallible step. The host drives it with `tick` (or
/// `step` with explicit time), reads `view()` to decide what to draw
/// around it, and forwards the user's retry action to `retry()`.
pub struct Surface<R: SceneRenderer> {
    config: SurfaceConfig,
    content: Box<ContentFn>,
    factory: Box<FactoryFn<R>>,
    scene: Scene,
    motions: MotionSet,
    clock: FrameClock,
    subscription: Option<Subscription>,
    boundary: FailureBoundary,
    renderer: Option<R>,
    aspect: f32,
    torn_down: bool,
}

impl<R: SceneRenderer> Surface<R> {
    /// Create a surface in the loading state. The scene (lighting rig plus
    /// caller content) is built immediately; the renderer is not
    /// constructed until `mount`.
    pub fn new(
        config: SurfaceConfig,
        content: Box<ContentFn>,
        factory: Box<FactoryFn<R>>,
    ) -> Self {
        let mut surface = Self {
            config,
            content,
            factory,
            scene: Scene::new(),
            motions: MotionSet::new(),
            clock: FrameClock::new(),
            subscription: None,
            boundary: FailureBoundary::new(),
            renderer: None,
            aspect: 16.0 / 9.0,
            torn_down: false,
        };
        surface.rebuild_scene();
        surface
    }

    fn rebuild_scene(&mut self) {
        self.scene = Scene::new();
        self.motions = MotionSet::new();
        install_lighting_rig(&mut self.scene, self.config.shadows);
        (self.content)(&mut self.scene, &mut self.motions);
        tracing::debug!(
            nodes = self.scene.len(),
            motions = self.motions.len(),
            "scene built"
        );
    }

    /// Run the renderer factory. A factory error trips the boundary; on
    /// success the frame subscription starts and the clock restarts so
    /// animation begins from the initial pose.
    pub fn mount(&mut self) {
        if self.torn_down {
            return;
        }
        match (self.factory)() {
            Ok(renderer) => {
                self.renderer = Some(renderer);
                self.subscription = Some(self.clock.subscribe());
                self.clock.restart();
                tracing::info!("surface mounted");
            }
            Err(error) => self.fail(error),
        }
    }

    fn fail(&mut self, error: RenderError) {
        self.boundary.trip(&error);
        // Dropping the subscription stops further frame updates; the
        // renderer goes with it so a disposed context is never touched.
        self.subscription = None;
        self.renderer = None;
    }

    /// Advance one frame using the surface's own clock.
    pub fn tick(&mut self) -> Option<R::Output> {
        let t = self.clock.elapsed();
        self.step(t)
    }

    /// Advance one frame at explicit elapsed time `t`: run the motion pass,
    /// then render. Inert unless mounted and healthy; a render error trips
    /// the boundary and stops the surface. Returns the renderer's output
    /// when a frame was produced.
    pub fn step(&mut self, t: f32) -> Option<R::Output> {
        self.subscription.as_ref()?;
        self.motions.advance(&mut self.scene, t);
        let view = self.render_view();
        let result = match self.renderer.as_mut() {
            Some(renderer) => renderer.render(&self.scene, &view, t),
            None => return None,
        };
        match result {
            Ok(output) => Some(output),
            Err(error) => {
                self.fail(error);
                None
            }
        }
    }

    /// Explicit user retry. Clears the captured error, rebuilds the scene
    /// from scratch, and re-runs the factory. Returns whether a retry
    /// actually happened.
    pub fn retry(&mut self) -> bool {
        if self.torn_down || !self.boundary.retry() {
            return false;
        }
        self.rebuild_scene();
        self.mount();
        true
    }

    /// Tear the surface down. The frame subscription is revoked and the
    /// renderer dropped; any later tick is a no-op.
    pub fn teardown(&mut self) {
        self.subscription = None;
        self.renderer = None;
        self.torn_down = true;
        tracing::info!("surface torn down");
    }

    /// Update the viewport aspect ratio from the container size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Current visual state for the host.
    pub fn view(&self) -> SurfaceView<'_> {
        if self.boundary.is_failed() {
            SurfaceView::Failed {
                notice: FALLBACK_NOTICE,
            }
        } else if self.renderer.is_some() {
            SurfaceView::Live
        } else {
            SurfaceView::Loading {
                label: &self.config.loading_text,
            }
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self.view(), SurfaceView::Live)
    }

    /// The camera for this surface: configured position, looking at the
    /// origin, with the current container aspect.
    pub fn render_view(&self) -> RenderView {
        RenderView {
            eye: self.config.camera_position,
            target: glam::Vec3::ZERO,
            fov_degrees: self.config.fov_degrees,
            aspect: self.aspect,
        }
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Backend access for the host, e.g. to forward orbit input. `None`
    /// while loading, failed, or torn down.
    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        self.renderer.as_mut()
    }

    pub fn indicator(&self) -> LoadingIndicator {
        LoadingIndicator::new(self.config.loading_text.clone())
    }

    /// Captured failure text, for diagnostics only.
    pub fn failure_message(&self) -> Option<&str> {
        self.boundary.message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use vitrine_render::DebugTextRenderer;
    use vitrine_scene::{FloatingObject, NodeKind, PrimitiveKind, BOB_AMPLITUDE};

    /// Renderer that fails after a configurable number of frames.
    struct FlakyRenderer {
        frames_until_failure: u32,
    }

    impl SceneRenderer for FlakyRenderer {
        type Output = ();

        fn render(
            &mut self,
            _scene: &Scene,
            _view: &RenderView,
            _elapsed: f32,
        ) -> Result<(), RenderError> {
            if self.frames_until_failure == 0 {
                return Err(RenderError::Draw("device lost".into()));
            }
            self.frames_until_failure -= 1;
            Ok(())
        }
    }

    fn sphere_surface(controls: bool, shadows: bool) -> Surface<DebugTextRenderer> {
        let config = SurfaceConfig::default()
            .controls(controls)
            .shadows(shadows);
        Surface::new(
            config,
            Box::new(|scene, motions| {
                FloatingObject::new(Vec3::ZERO).spawn(scene, motions);
            }),
            Box::new(|| Ok(DebugTextRenderer::new())),
        )
    }

    fn sphere_id(surface: &Surface<DebugTextRenderer>) -> vitrine_common::ObjectId {
        surface
            .scene()
            .nodes()
            .find(|(_, n)| matches!(n.kind, NodeKind::Mesh { .. }))
            .map(|(id, _)| id)
            .unwrap()
    }

    #[test]
    fn loads_then_goes_live_on_mount() {
        let mut surface = sphere_surface(true, true);
        assert_eq!(
            surface.view(),
            SurfaceView::Loading {
                label: "Loading 3D Scene..."
            }
        );
        surface.mount();
        assert!(surface.is_live());
    }

    #[test]
    fn composed_scene_has_rig_and_content() {
        // Scenario: controls off, shadows on, one default sphere at origin.
        let mut surface = sphere_surface(false, true);
        surface.mount();

        let scene = surface.scene();
        assert_eq!(scene.light_count(), 4);
        assert_eq!(scene.mesh_count(), 1);
        assert!(scene
            .nodes()
            .any(|(_, n)| matches!(n.kind, NodeKind::ShadowCatcher { .. })));
        assert!(!surface.config().controls);

        let id = sphere_id(&surface);
        let node = surface.scene().get(id).unwrap();
        assert!(matches!(
            node.kind,
            NodeKind::Mesh {
                primitive: PrimitiveKind::Sphere,
                ..
            }
        ));

        // The sphere's vertical position oscillates within the bob bound.
        let mut seen_above = false;
        let mut seen_below = false;
        for step in 0..200 {
            let t = step as f32 * 0.1;
            surface.step(t);
            let y = surface.scene().get(id).unwrap().transform.position.y;
            assert!(y.abs() <= BOB_AMPLITUDE + 1e-6);
            seen_above |= y > 0.05;
            seen_below |= y < -0.05;
        }
        assert!(seen_above && seen_below);
    }

    #[test]
    fn step_before_mount_is_inert() {
        let mut surface = sphere_surface(true, true);
        let id = sphere_id(&surface);
        let before = surface.scene().get(id).unwrap().transform;
        surface.step(5.0);
        assert_eq!(surface.scene().get(id).unwrap().transform, before);
    }

    #[test]
    fn factory_failure_trips_boundary() {
        let mut surface: Surface<DebugTextRenderer> = Surface::new(
            SurfaceConfig::default(),
            Box::new(|_, _| {}),
            Box::new(|| Err(RenderError::NoAdapter)),
        );
        surface.mount();
        assert_eq!(
            surface.view(),
            SurfaceView::Failed {
                notice: FALLBACK_NOTICE
            }
        );
        assert!(surface.failure_message().unwrap().contains("adapter"));
    }

    #[test]
    fn frame_failure_trips_boundary_and_stops_updates() {
        let mut surface: Surface<FlakyRenderer> = Surface::new(
            SurfaceConfig::default(),
            Box::new(|scene, motions| {
                FloatingObject::new(Vec3::ZERO).spawn(scene, motions);
            }),
            Box::new(|| {
                Ok(FlakyRenderer {
                    frames_until_failure: 2,
                })
            }),
        );
        surface.mount();
        surface.step(0.1);
        surface.step(0.2);
        assert!(surface.is_live());

        surface.step(0.3); // third frame fails
        assert!(matches!(surface.view(), SurfaceView::Failed { .. }));

        // Failed surface no longer mutates its scene.
        let mesh = surface
            .scene()
            .nodes()
            .find(|(_, n)| matches!(n.kind, NodeKind::Mesh { .. }))
            .map(|(id, _)| id)
            .unwrap();
        let frozen = surface.scene().get(mesh).unwrap().transform;
        surface.step(10.0);
        assert_eq!(surface.scene().get(mesh).unwrap().transform, frozen);
    }

    #[test]
    fn retry_rebuilds_a_fresh_subtree() {
        let mut attempts = 0u32;
        let mut surface: Surface<DebugTextRenderer> = Surface::new(
            SurfaceConfig::default(),
            Box::new(|scene, motions| {
                FloatingObject::new(Vec3::new(2.0, 3.0, 0.0)).spawn(scene, motions);
            }),
            Box::new(move || {
                attempts += 1;
                if attempts == 1 {
                    Err(RenderError::ContextCreation("no webgpu".into()))
                } else {
                    Ok(DebugTextRenderer::new())
                }
            }),
        );
        surface.mount();
        assert!(matches!(surface.view(), SurfaceView::Failed { .. }));

        assert!(surface.retry());
        assert!(surface.is_live());
        assert!(surface.failure_message().is_none());
        assert_eq!(surface.scene().mesh_count(), 1);

        // Retry while healthy is a no-op.
        assert!(!surface.retry());
    }

    #[test]
    fn teardown_revokes_frame_updates() {
        let mut surface = sphere_surface(true, true);
        surface.mount();
        surface.step(1.0);
        let id = sphere_id(&surface);
        let before = surface.scene().get(id).unwrap().transform;

        surface.teardown();
        surface.step(2.0);
        assert_eq!(surface.scene().get(id).unwrap().transform, before);

        // A torn-down surface cannot be revived by retry.
        assert!(!surface.retry());
    }

    #[test]
    fn resize_updates_render_view_aspect() {
        let mut surface = sphere_surface(true, true);
        surface.resize(800, 400);
        assert_eq!(surface.render_view().aspect, 2.0);
        // Degenerate sizes are ignored.
        surface.resize(0, 400);
        assert_eq!(surface.render_view().aspect, 2.0);
    }
}
