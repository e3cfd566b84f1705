//! First-person camera controller
//!
//! Controls:
//! - W/S: Forward/backward along the view direction
//! - A/D: Left/right strafe
//! - Space/Shift: Up/down (world Y)
//! - Arrow keys: Turn (left/right) and look (up/down)
//! - Mouse: Look around while the cursor is captured or the left button is held

use objview_math::Vec3;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Camera controller for handling input
pub struct CameraController {
    // Movement state
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,

    // Keyboard look state
    turn_left: bool,
    turn_right: bool,
    look_up: bool,
    look_down: bool,

    // Mouse state
    mouse_pressed: bool,
    pending_yaw: f32,
    pending_pitch: f32,

    // Configuration
    /// Units per second
    pub move_speed: f32,
    /// Radians per second for the arrow keys
    pub rotate_speed: f32,
    /// Radians per pixel of mouse motion
    pub mouse_sensitivity: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            up: false,
            down: false,

            turn_left: false,
            turn_right: false,
            look_up: false,
            look_down: false,

            mouse_pressed: false,
            pending_yaw: 0.0,
            pending_pitch: 0.0,

            move_speed: 6.0,
            rotate_speed: 0.6,
            mouse_sensitivity: 0.002,
        }
    }

    /// Process keyboard input
    ///
    /// Returns true if the key is one of the camera keys.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match key {
            KeyCode::KeyW => { self.forward = pressed; true }
            KeyCode::KeyS => { self.backward = pressed; true }
            KeyCode::KeyA => { self.left = pressed; true }
            KeyCode::KeyD => { self.right = pressed; true }
            KeyCode::Space => { self.up = pressed; true }
            KeyCode::ShiftLeft | KeyCode::ShiftRight => { self.down = pressed; true }
            KeyCode::ArrowLeft => { self.turn_left = pressed; true }
            KeyCode::ArrowRight => { self.turn_right = pressed; true }
            KeyCode::ArrowUp => { self.look_up = pressed; true }
            KeyCode::ArrowDown => { self.look_down = pressed; true }
            _ => false,
        }
    }

    /// Process mouse button input
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.mouse_pressed = state == ElementState::Pressed;
        }
    }

    /// Process mouse movement
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        self.pending_yaw += delta_x as f32;
        self.pending_pitch += delta_y as f32;
    }

    /// Update the camera based on accumulated input
    ///
    /// When `cursor_captured` is true, free look is enabled (no click required).
    /// Returns the camera position for debug display.
    pub fn update<C: CameraControl>(&mut self, camera: &mut C, dt: f32, cursor_captured: bool) -> Vec3 {
        let fwd = (self.forward as i32 - self.backward as i32) as f32;
        let rgt = (self.right as i32 - self.left as i32) as f32;
        let up_down = (self.up as i32 - self.down as i32) as f32;

        camera.move_local(fwd * self.move_speed * dt, rgt * self.move_speed * dt);
        camera.move_y(up_down * self.move_speed * dt);

        let turn = (self.turn_right as i32 - self.turn_left as i32) as f32;
        let look = (self.look_up as i32 - self.look_down as i32) as f32;
        if turn != 0.0 || look != 0.0 {
            camera.rotate(turn * self.rotate_speed * dt, look * self.rotate_speed * dt);
        }

        // Mouse right turns right, mouse down looks down
        if cursor_captured || self.mouse_pressed {
            camera.rotate(
                self.pending_yaw * self.mouse_sensitivity,
                -self.pending_pitch * self.mouse_sensitivity,
            );
        }

        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;

        camera.position()
    }

    /// Check if any movement or look keys are pressed
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right
            || self.up || self.down
            || self.turn_left || self.turn_right || self.look_up || self.look_down
    }

    /// Builder: set movement speed
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    /// Builder: set arrow-key rotation speed
    pub fn with_rotate_speed(mut self, speed: f32) -> Self {
        self.rotate_speed = speed;
        self
    }

    /// Builder: set mouse sensitivity
    pub fn with_mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }
}

/// Trait for camera control
/// Allows the controller to work with different camera implementations
pub trait CameraControl {
    /// Move along the view direction and the camera's right vector
    fn move_local(&mut self, forward: f32, right: f32);
    fn move_y(&mut self, delta: f32);
    /// Positive yaw turns right, positive pitch looks up
    fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32);
    fn position(&self) -> Vec3;
}
