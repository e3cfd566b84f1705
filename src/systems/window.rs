//! The viewer window
//!
//! Owns the winit window plus the cursor-capture state used for mouse look.

use std::sync::Arc;
use winit::{
    dpi::LogicalSize,
    error::ExternalError,
    event_loop::ActiveEventLoop,
    window::{CursorGrabMode, Fullscreen, Window},
};
use objview_math::Vec3;
use crate::config::WindowConfig;

/// The application window and whether it holds the cursor
pub struct WindowSystem {
    window: Arc<Window>,
    cursor_captured: bool,
    base_title: String,
}

impl WindowSystem {
    /// Open a window sized and titled from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let fullscreen = config.fullscreen.then(|| Fullscreen::Borderless(None));
        let attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_fullscreen(fullscreen);

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| WindowError::CreationFailed(e.to_string()))?;

        Ok(Self {
            window: Arc::new(window),
            cursor_captured: false,
            base_title: config.title.clone(),
        })
    }

    /// Shared handle for surface creation
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn is_cursor_captured(&self) -> bool {
        self.cursor_captured
    }

    /// Grab and hide the cursor; returns whether the grab succeeded
    pub fn capture_cursor(&mut self) -> bool {
        match grab_cursor(&self.window) {
            Ok(mode) => {
                self.window.set_cursor_visible(false);
                self.cursor_captured = true;
                log::info!("Cursor captured ({:?}), Esc to release", mode);
                true
            }
            Err(e) => {
                log::warn!("Failed to capture cursor: {}", e);
                false
            }
        }
    }

    /// Give the cursor back to the desktop
    pub fn release_cursor(&mut self) {
        if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
            log::debug!("Cursor release: {}", e);
        }
        self.window.set_cursor_visible(true);
        self.cursor_captured = false;
        log::info!("Cursor released, click to capture");
    }

    pub fn toggle_fullscreen(&self) {
        let next = match self.window.fullscreen() {
            Some(_) => None,
            None => Some(Fullscreen::Borderless(None)),
        };
        self.window.set_fullscreen(next);
    }

    /// Show camera position and parallax state in the title bar
    pub fn update_title(&self, position: Vec3, parallax: bool) {
        let title = format_title(&self.base_title, position, parallax, self.cursor_captured);
        self.window.set_title(&title);
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Locked grabs are not available everywhere (X11); fall back to confined
fn grab_cursor(window: &Window) -> Result<CursorGrabMode, ExternalError> {
    window
        .set_cursor_grab(CursorGrabMode::Locked)
        .map(|_| CursorGrabMode::Locked)
        .or_else(|_| {
            window
                .set_cursor_grab(CursorGrabMode::Confined)
                .map(|_| CursorGrabMode::Confined)
        })
}

fn format_title(base: &str, position: Vec3, parallax: bool, cursor_captured: bool) -> String {
    let hint = if cursor_captured {
        "Esc to release"
    } else {
        "Click to capture"
    };
    format!(
        "{} - ({:.1}, {:.1}, {:.1}) parallax:{} [{}]",
        base,
        position.x,
        position.y,
        position.z,
        if parallax { "on" } else { "off" },
        hint
    )
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}
