//! Special keys and clicks mapped to viewer actions
//!
//! Camera keys (WASD, Space, Shift, arrows) are left to the
//! `CameraController`; this module only knows about the one-shot actions.

use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// One-shot actions triggered on key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Capture or release the cursor
    ToggleCursor,
    Exit,
    /// Return the camera to its starting pose
    ResetCamera,
    ToggleFullscreen,
    ToggleParallax,
    /// Pause or resume the model spin
    ToggleSpin,
}

impl InputAction {
    /// Short description for the controls listing
    pub fn label(self) -> &'static str {
        match self {
            InputAction::ToggleCursor => "release cursor / exit",
            InputAction::Exit => "exit",
            InputAction::ResetCamera => "reset camera",
            InputAction::ToggleFullscreen => "toggle fullscreen",
            InputAction::ToggleParallax => "toggle parallax mapping",
            InputAction::ToggleSpin => "pause/resume spin",
        }
    }
}

/// Keys with a fixed action. Escape is handled separately since its
/// meaning depends on whether the cursor is captured.
const KEY_BINDINGS: &[(KeyCode, InputAction)] = &[
    (KeyCode::KeyR, InputAction::ResetCamera),
    (KeyCode::KeyF, InputAction::ToggleFullscreen),
    (KeyCode::KeyP, InputAction::ToggleParallax),
    (KeyCode::KeyT, InputAction::ToggleSpin),
];

/// Maps raw input events to [`InputAction`]s
pub struct InputMapper;

impl InputMapper {
    /// Action for a key event, or `None` for releases and camera keys
    pub fn map_keyboard(
        key: KeyCode,
        state: ElementState,
        cursor_captured: bool,
    ) -> Option<InputAction> {
        if state != ElementState::Pressed {
            return None;
        }

        if key == KeyCode::Escape {
            return Some(if cursor_captured {
                InputAction::ToggleCursor
            } else {
                InputAction::Exit
            });
        }

        KEY_BINDINGS
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|&(_, action)| action)
    }

    /// A left click captures the cursor when it is free
    pub fn map_mouse_button(
        button: MouseButton,
        state: ElementState,
        cursor_captured: bool,
    ) -> Option<InputAction> {
        let is_click = button == MouseButton::Left && state == ElementState::Pressed;
        (is_click && !cursor_captured).then_some(InputAction::ToggleCursor)
    }

    /// Human-readable controls, one line per binding
    pub fn controls_help() -> Vec<String> {
        let mut lines = vec![
            "WASD move, Space/Shift up/down, arrows turn".to_string(),
            "Click to capture the mouse for looking around".to_string(),
            format!("Esc: {}", InputAction::ToggleCursor.label()),
        ];
        lines.extend(
            KEY_BINDINGS
                .iter()
                .map(|(key, action)| format!("{:?}: {}", key, action.label())),
        );
        lines
    }
}
