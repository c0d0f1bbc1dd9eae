use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Per-surface configuration, supplied by the host section at
/// construction and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Camera position; the camera always looks at the origin.
    pub camera_position: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Whether drag-to-orbit interaction is installed.
    pub controls: bool,
    /// Whether the key light casts shadows and the contact-shadow plane is
    /// rendered.
    pub shadows: bool,
    /// Label shown by the loading indicator.
    pub loading_text: String,
    /// Upper bound applied to the device pixel ratio, keeping GPU load in
    /// check on high-DPI displays.
    pub pixel_ratio_cap: f32,
    /// Refresh the shadow map every frame instead of once at startup.
    /// Off by default: the decorative motion is subtle enough that a stale
    /// map is a fair trade for the saved per-frame cost.
    pub shadow_auto_refresh: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            camera_position: Vec3::new(0.0, 0.0, 5.0),
            fov_degrees: 75.0,
            controls: true,
            shadows: true,
            loading_text: "Loading 3D Scene...".to_string(),
            pixel_ratio_cap: 2.0,
            shadow_auto_refresh: false,
        }
    }
}

impl SurfaceConfig {
    pub fn camera(mut self, position: Vec3, fov_degrees: f32) -> Self {
        self.camera_position = position;
        self.fov_degrees = fov_degrees;
        self
    }

    pub fn controls(mut self, on: bool) -> Self {
        self.controls = on;
        self
    }

    pub fn shadows(mut self, on: bool) -> Self {
        self.shadows = on;
        self
    }

    pub fn loading_text(mut self, text: impl Into<String>) -> Self {
        self.loading_text = text.into();
        self
    }

    /// Device pixel ratio with the configured cap applied (never below 1).
    pub fn capped_pixel_ratio(&self, device_pixel_ratio: f32) -> f32 {
        device_pixel_ratio.clamp(1.0, self.pixel_ratio_cap)
    }
}
