//! First-person camera
//!
//! Orientation is kept as yaw and pitch angles. With yaw measured from +X
//! toward +Z, the view direction is
//! `(cos(pitch) cos(yaw), sin(pitch), cos(pitch) sin(yaw))`, so a yaw of 90°
//! looks down +Z.

use objview_input::CameraControl;
use objview_math::{mat4, Mat4, Vec3};

/// Camera with a world position and yaw/pitch orientation
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    /// Radians, increasing turns right
    pub yaw: f32,
    /// Radians, increasing looks up
    pub pitch: f32,
    /// Pitch is kept within `±pitch_limit`
    pub pitch_limit: f32,

    home_position: Vec3,
    home_yaw: f32,
    home_pitch: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::looking_at(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO)
    }
}

impl Camera {
    /// Create a camera; the initial pose is what [`reset`](Self::reset) returns to
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let pitch_limit = 1.5;
        let pitch = pitch.clamp(-pitch_limit, pitch_limit);
        Self {
            position,
            yaw,
            pitch,
            pitch_limit,
            home_position: position,
            home_yaw: yaw,
            home_pitch: pitch,
        }
    }

    /// Create a camera at `position` facing `target`
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let dir = (target - position).normalized();
        if dir == Vec3::ZERO {
            return Self::new(position, std::f32::consts::FRAC_PI_2, 0.0);
        }
        let pitch = dir.y.clamp(-1.0, 1.0).asin();
        let yaw = dir.z.atan2(dir.x);
        Self::new(position, yaw, pitch)
    }

    /// Builder: set the pitch limit (radians)
    pub fn with_pitch_limit(mut self, limit: f32) -> Self {
        self.pitch_limit = limit.abs();
        self.pitch = self.pitch.clamp(-self.pitch_limit, self.pitch_limit);
        self.home_pitch = self.home_pitch.clamp(-self.pitch_limit, self.pitch_limit);
        self
    }

    /// Unit view direction
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw)
    }

    /// Unit vector to the camera's right, always horizontal
    pub fn right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(-sin_yaw, 0.0, cos_yaw)
    }

    /// World-to-view transform
    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.position, self.position + self.forward(), Vec3::Y)
    }

    /// Return to the pose the camera was created with
    pub fn reset(&mut self) {
        self.position = self.home_position;
        self.yaw = self.home_yaw;
        self.pitch = self.home_pitch;
    }
}

impl CameraControl for Camera {
    fn move_local(&mut self, forward: f32, right: f32) {
        self.position += self.forward() * forward + self.right() * right;
    }

    fn move_y(&mut self, delta: f32) {
        self.position.y += delta;
    }

    fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        // Clamp pitch so the view never flips over the pole
        self.pitch = (self.pitch + delta_pitch).clamp(-self.pitch_limit, self.pitch_limit);
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_default_camera_looks_at_origin() {
        let cam = Camera::default();
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, -10.0));
        assert!(approx_eq(cam.forward(), Vec3::Z), "forward {:?}", cam.forward());
        assert!((cam.pitch).abs() < EPSILON);
    }

    #[test]
    fn test_right_is_perpendicular() {
        let cam = Camera::new(Vec3::ZERO, 0.7, 0.3);
        assert!(cam.right().dot(cam.forward()).abs() < EPSILON);
        assert!(cam.right().dot(Vec3::Y).abs() < EPSILON);
        // Looking down +Z in a right-handed frame, right is -X
        assert!(approx_eq(Camera::default().right(), -Vec3::X));
    }

    #[test]
    fn test_positive_yaw_turns_right() {
        let mut cam = Camera::default();
        let right = cam.right();
        cam.rotate(0.1, 0.0);
        assert!(cam.forward().dot(right) > 0.0);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut cam = Camera::default();
        cam.rotate(0.0, 10.0);
        assert_eq!(cam.pitch, cam.pitch_limit);
        cam.rotate(0.0, -20.0);
        assert_eq!(cam.pitch, -cam.pitch_limit);
    }

    #[test]
    fn test_with_pitch_limit() {
        let mut cam = Camera::default().with_pitch_limit(0.5);
        cam.rotate(0.0, 1.0);
        assert_eq!(cam.pitch, 0.5);
    }

    #[test]
    fn test_move_local_forward() {
        let mut cam = Camera::default();
        cam.move_local(2.0, 0.0);
        assert!(approx_eq(cam.position, Vec3::new(0.0, 0.0, -8.0)));
        cam.move_local(0.0, 1.0);
        assert!(approx_eq(cam.position, Vec3::new(-1.0, 0.0, -8.0)));
        cam.move_y(3.0);
        assert!(approx_eq(cam.position(), Vec3::new(-1.0, 3.0, -8.0)));
    }

    #[test]
    fn test_reset_restores_initial_pose() {
        let mut cam = Camera::default();
        cam.move_local(3.0, 1.0);
        cam.rotate(0.4, 0.2);
        cam.reset();
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, -10.0));
        assert!(approx_eq(cam.forward(), Vec3::Z));
    }

    #[test]
    fn test_view_matrix_puts_target_ahead() {
        let cam = Camera::default();
        let p = mat4::transform_point(cam.view_matrix(), Vec3::ZERO);
        assert!(approx_eq(p, Vec3::new(0.0, 0.0, -10.0)), "got {:?}", p);
    }

    #[test]
    fn test_looking_at_same_point() {
        let cam = Camera::looking_at(Vec3::ZERO, Vec3::ZERO);
        assert!(approx_eq(cam.forward(), Vec3::Z));
    }
}
