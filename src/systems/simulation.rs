//! Per-frame simulation
//!
//! Manages the frame update including:
//! - Delta time calculation
//! - Input → camera movement
//! - Model spin about +Y

use std::f32::consts::TAU;
use std::time::Instant;
use objview_input::CameraController;
use objview_math::{mat4, Mat4};
use objview_render::camera::Camera;

/// Longest frame step, so a stall does not teleport the camera
const MAX_FRAME_TIME: f32 = 0.25;

/// Advances the camera and the model's spin each frame
pub struct SimulationSystem {
    last_frame: Instant,
    /// Current model rotation about +Y, radians in `[0, 2π)`
    model_angle: f32,
    /// Radians per second
    spin_speed: f32,
    spin_enabled: bool,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new(spin_speed: f32, spin_enabled: bool) -> Self {
        Self {
            last_frame: Instant::now(),
            model_angle: 0.0,
            spin_speed,
            spin_enabled,
        }
    }

    /// Run one frame using wall-clock time since the previous call
    ///
    /// Returns the model matrix for this frame.
    pub fn update(
        &mut self,
        camera: &mut Camera,
        controller: &mut CameraController,
        cursor_captured: bool,
    ) -> Mat4 {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.step(raw_dt, camera, controller, cursor_captured)
    }

    /// Run one frame with an explicit time step (capped)
    pub fn step(
        &mut self,
        dt: f32,
        camera: &mut Camera,
        controller: &mut CameraController,
        cursor_captured: bool,
    ) -> Mat4 {
        let dt = dt.clamp(0.0, MAX_FRAME_TIME);

        controller.update(camera, dt, cursor_captured);

        if self.spin_enabled {
            self.model_angle = (self.model_angle + self.spin_speed * dt).rem_euclid(TAU);
        }

        self.model_matrix()
    }

    /// Pause or resume the spin; returns whether it is now spinning
    pub fn toggle_spin(&mut self) -> bool {
        self.spin_enabled = !self.spin_enabled;
        self.spin_enabled
    }

    pub fn model_angle(&self) -> f32 {
        self.model_angle
    }

    pub fn model_matrix(&self) -> Mat4 {
        mat4::rotation_y(self.model_angle)
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(1.0, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use objview_math::Vec3;
    use winit::event::ElementState;
    use winit::keyboard::KeyCode;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_spin_advances_with_time() {
        let mut sim = SimulationSystem::new(1.0, true);
        let mut camera = Camera::default();
        let mut controller = CameraController::new();
        sim.step(0.1, &mut camera, &mut controller, false);
        sim.step(0.1, &mut camera, &mut controller, false);
        assert!((sim.model_angle() - 0.2).abs() < EPSILON);
    }

    #[test]
    fn test_delta_time_capped() {
        let mut sim = SimulationSystem::new(1.0, true);
        let mut camera = Camera::default();
        let mut controller = CameraController::new();
        sim.step(5.0, &mut camera, &mut controller, false);
        assert!((sim.model_angle() - MAX_FRAME_TIME).abs() < EPSILON);
    }

    #[test]
    fn test_toggle_spin_pauses() {
        let mut sim = SimulationSystem::default();
        let mut camera = Camera::default();
        let mut controller = CameraController::new();
        assert!(!sim.toggle_spin());
        sim.step(0.1, &mut camera, &mut controller, false);
        assert_eq!(sim.model_angle(), 0.0);
        assert!(sim.toggle_spin());
    }

    #[test]
    fn test_angle_wraps() {
        let mut sim = SimulationSystem::new(30.0, true);
        let mut camera = Camera::default();
        let mut controller = CameraController::new();
        for _ in 0..10 {
            sim.step(0.25, &mut camera, &mut controller, false);
        }
        assert!(sim.model_angle() >= 0.0 && sim.model_angle() < TAU);
    }

    #[test]
    fn test_model_matrix_rotates_about_y() {
        let mut sim = SimulationSystem::new(std::f32::consts::FRAC_PI_2 / 0.25, true);
        let mut camera = Camera::default();
        let mut controller = CameraController::new();
        let model = sim.step(0.25, &mut camera, &mut controller, false);
        let r = mat4::transform_vector(model, Vec3::Z);
        assert!((r - Vec3::X).length() < 1e-4, "got {:?}", r);
    }

    #[test]
    fn test_camera_moves_through_controller() {
        let mut sim = SimulationSystem::default();
        let mut camera = Camera::default();
        let mut controller = CameraController::new().with_move_speed(4.0);
        controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        sim.step(0.25, &mut camera, &mut controller, false);
        assert!((camera.position - Vec3::new(0.0, 0.0, -9.0)).length() < 1e-4);
    }
}
