use glam::{Mat4, Vec3};
use vitrine_scene::{NodeKind, Scene};

/// Camera/view configuration for one frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    /// Width over height of the viewport.
    pub aspect: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl RenderView {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, 0.1, 1000.0)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Failures a renderer can surface.
///
/// Both initialization and per-frame failures use this taxonomy; the
/// surface controller treats them identically (boundary trip, manual
/// retry).
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no compatible graphics adapter available")]
    NoAdapter,
    #[error("rendering context creation failed: {0}")]
    ContextCreation(String),
    #[error("rendering surface lost: {0}")]
    SurfaceLost(String),
    #[error("draw failed: {0}")]
    Draw(String),
}

/// A renderer walks the scene description once per call and produces
/// output. It never mutates the scene; all animation happens in the
/// motion pass before rendering.
pub trait SceneRenderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the given scene from the given view.
    fn render(
        &mut self,
        scene: &Scene,
        view: &RenderView,
        elapsed: f32,
    ) -> Result<Self::Output, RenderError>;
}

/// Text renderer for tests and CLI diagnostics.
///
/// Walks the scene exactly like a GPU backend would and reports what it
/// saw, without needing a graphics device.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl SceneRenderer for DebugTextRenderer {
    type Output = String;

    fn render(
        &mut self,
        scene: &Scene,
        view: &RenderView,
        elapsed: f32,
    ) -> Result<String, RenderError> {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Scene (t={elapsed:.2}s, nodes={}, meshes={}, lights={}) ===\n",
            scene.len(),
            scene.mesh_count(),
            scene.light_count()
        ));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x, view.eye.y, view.eye.z, view.fov_degrees
        ));

        for (id, node) in scene.nodes() {
            let label = match &node.kind {
                NodeKind::AmbientLight { intensity } => format!("ambient({intensity})"),
                NodeKind::DirectionalLight { intensity, shadow } => format!(
                    "directional({intensity}, shadow={})",
                    shadow.is_some()
                ),
                NodeKind::PointLight { intensity, .. } => format!("point({intensity})"),
                NodeKind::Mesh { primitive, .. } => format!("mesh({primitive:?})"),
                NodeKind::Group => "group".to_string(),
                NodeKind::ShadowCatcher { .. } => "shadow_catcher".to_string(),
            };
            // World position comes from the chained parent transforms, the
            // same walk a GPU backend performs.
            let p = scene
                .world_transform(id)
                .unwrap_or(Mat4::IDENTITY)
                .transform_point3(Vec3::ZERO);
            out.push_str(&format!(
                "  [{:.8}] {label} at ({:.2}, {:.2}, {:.2})\n",
                &id.0.to_string()[..8],
                p.x,
                p.y,
                p.z
            ));
        }

        Ok(out)
    }
}
