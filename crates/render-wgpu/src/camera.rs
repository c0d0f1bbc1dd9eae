use glam::{Mat4, Vec3};

/// Rotation speed multiplier. Deliberately below 1.0 for a calmer feel on
/// decorative content.
const ROTATE_SPEED: f32 = 0.5;

const SENSITIVITY: f32 = 0.005;

/// Drag-to-orbit camera around a fixed target.
///
/// Panning and zooming are not provided: the distance and target are fixed
/// at construction. The vertical orbit is clamped to the upper hemisphere,
/// so the camera can never swing below the horizon.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    /// Elevation above the horizon, in [0, ~pi/2].
    pub pitch: f32,
}

impl OrbitCamera {
    /// Place the orbit so its initial eye matches `eye`, looking at the
    /// origin. An eye below the horizon is lifted onto it.
    pub fn from_eye(eye: Vec3) -> Self {
        let distance = eye.length().max(0.01);
        let yaw = eye.x.atan2(eye.z);
        let pitch = (eye.y / distance).asin().clamp(0.0, MAX_PITCH);
        Self {
            target: Vec3::ZERO,
            distance,
            yaw,
            pitch,
        }
    }

    /// Apply a drag delta in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * SENSITIVITY * ROTATE_SPEED;
        self.pitch = (self.pitch + dy * SENSITIVITY * ROTATE_SPEED).clamp(0.0, MAX_PITCH);
    }

    pub fn eye(&self) -> Vec3 {
        self.target
            + self.distance
                * Vec3::new(
                    self.pitch.cos() * self.yaw.sin(),
                    self.pitch.sin(),
                    self.pitch.cos() * self.yaw.cos(),
                )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }
}

const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_eye_preserves_distance_and_position() {
        let cam = OrbitCamera::from_eye(Vec3::new(0.0, 0.0, 8.0));
        assert!((cam.distance - 8.0).abs() < 1e-5);
        assert!((cam.eye() - Vec3::new(0.0, 0.0, 8.0)).length() < 1e-4);
    }

    #[test]
    fn pitch_clamped_to_upper_hemisphere() {
        let mut cam = OrbitCamera::from_eye(Vec3::new(0.0, 0.0, 5.0));
        // Drag far downward: the eye must never sink below the horizon.
        cam.rotate(0.0, -10_000.0);
        assert!(cam.pitch >= 0.0);
        assert!(cam.eye().y >= -1e-4);
        // Drag far upward: clamped short of the pole.
        cam.rotate(0.0, 10_000.0);
        assert!(cam.pitch <= MAX_PITCH);
    }

    #[test]
    fn orbit_keeps_distance_fixed() {
        let mut cam = OrbitCamera::from_eye(Vec3::new(0.0, 0.0, 6.0));
        for _ in 0..100 {
            cam.rotate(17.0, 3.0);
            assert!(((cam.eye() - cam.target).length() - 6.0).abs() < 1e-4);
        }
    }

    #[test]
    fn eye_below_horizon_is_lifted() {
        let cam = OrbitCamera::from_eye(Vec3::new(0.0, -3.0, 4.0));
        assert!(cam.pitch >= 0.0);
        assert!(cam.eye().y >= 0.0);
    }

    #[test]
    fn view_matrix_is_finite() {
        let cam = OrbitCamera::from_eye(Vec3::new(0.0, 0.0, 5.0));
        let m = cam.view_matrix();
        assert!(!m.col(0).x.is_nan());
    }
}
