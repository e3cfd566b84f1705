//! objview - textured OBJ viewer
//!
//! Displays a Wavefront OBJ model with a BMP texture, normal mapping and
//! parallax mapping.
//!
//! Usage: `objview [MODEL.obj [TEXTURE.bmp]]`

use std::path::PathBuf;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use objview::config::AppConfig;
use objview::input::{InputAction, InputMapper};
use objview::scene::SceneAssets;
use objview::systems::{RenderError, RenderSystem, SimulationSystem, WindowSystem};
use objview_input::CameraController;
use objview_math::Vec3;
use objview_render::camera::Camera;

/// Main application state
struct App {
    config: AppConfig,
    /// Loaded before the window exists, uploaded on `resumed`
    assets: SceneAssets,
    window_system: Option<WindowSystem>,
    render_system: Option<RenderSystem>,
    simulation: SimulationSystem,
    camera: Camera,
    controller: CameraController,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let assets = SceneAssets::load(&config.assets, config.rendering.relief_strength);

        let camera = Camera::looking_at(
            Vec3::from(config.camera.start_position),
            Vec3::from(config.camera.look_at),
        )
        .with_pitch_limit(config.camera.pitch_limit.to_radians());

        let controller = CameraController::new()
            .with_move_speed(config.input.move_speed)
            .with_rotate_speed(config.input.rotate_speed)
            .with_mouse_sensitivity(config.input.mouse_sensitivity);

        let simulation = SimulationSystem::new(
            config.rendering.model_spin_speed,
            config.rendering.model_spin_enabled,
        );

        Self {
            config,
            assets,
            window_system: None,
            render_system: None,
            simulation,
            camera,
            controller,
        }
    }

    fn cursor_captured(&self) -> bool {
        self.window_system
            .as_ref()
            .map(|w| w.is_cursor_captured())
            .unwrap_or(false)
    }

    /// Apply a special-key action; returns false when the app should exit
    fn handle_action(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::Exit => return false,
            InputAction::ToggleCursor => {
                if let Some(window) = &mut self.window_system {
                    if window.is_cursor_captured() {
                        window.release_cursor();
                    } else {
                        window.capture_cursor();
                    }
                }
            }
            InputAction::ResetCamera => {
                self.camera.reset();
                log::info!("Camera reset to starting position");
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window_system {
                    window.toggle_fullscreen();
                }
            }
            InputAction::ToggleParallax => {
                if let Some(render) = &mut self.render_system {
                    render.toggle_parallax();
                }
            }
            InputAction::ToggleSpin => {
                let spinning = self.simulation.toggle_spin();
                log::info!("Model spin {}", if spinning { "on" } else { "off" });
            }
        }
        true
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let cursor_captured = self.cursor_captured();
        let model = self
            .simulation
            .update(&mut self.camera, &mut self.controller, cursor_captured);

        if let Some(render) = &mut self.render_system {
            match render.render_frame(&self.camera, model) {
                Ok(()) => {}
                // Surface was reconfigured; the next frame draws normally
                Err(RenderError::SurfaceLost) => log::debug!("Surface lost, reconfigured"),
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory, exiting");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }

            if self.config.debug.show_camera_position {
                if let Some(window) = &self.window_system {
                    window.update_title(self.camera.position, render.parallax_enabled());
                }
            }
        }

        if let Some(window) = &self.window_system {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window_system.is_some() {
            return;
        }

        let window_system = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let mut render_system = match RenderSystem::new(
            window_system.window().clone(),
            self.config.rendering.clone(),
            self.config.camera.clone(),
            self.config.window.vsync,
        ) {
            Ok(render) => render,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        render_system.upload_scene(&self.assets);
        window_system.request_redraw();

        self.window_system = Some(window_system);
        self.render_system = Some(render_system);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(render) = &mut self.render_system {
                    render.resize(size.width, size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    let cursor_captured = self.cursor_captured();
                    if let Some(action) = InputMapper::map_keyboard(key, event.state, cursor_captured) {
                        if !self.handle_action(action) {
                            event_loop.exit();
                        }
                        return;
                    }
                    self.controller.process_keyboard(key, event.state);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let cursor_captured = self.cursor_captured();
                if let Some(action) = InputMapper::map_mouse_button(button, state, cursor_captured) {
                    self.handle_action(action);
                }
                self.controller.process_mouse_button(button, state);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.controller.process_mouse_motion(delta.0, delta.1);
        }
    }
}

/// `objview [MODEL.obj [TEXTURE.bmp]]` overrides the configured paths
fn apply_cli_overrides(config: &mut AppConfig, mut args: impl Iterator<Item = String>) {
    if let Some(model) = args.next() {
        config.assets.model = PathBuf::from(model);
    }
    if let Some(texture) = args.next() {
        config.assets.diffuse_texture = PathBuf::from(texture);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_result = AppConfig::load();
    let log_level = config_result
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = config_result.unwrap_or_else(|e| {
        log::error!("{}. Using defaults.", e);
        AppConfig::default()
    });
    apply_cli_overrides(&mut config, std::env::args().skip(1));

    log::info!("Starting objview with model {}", config.assets.model.display());
    for line in InputMapper::controls_help() {
        log::info!("  {}", line);
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_no_args_keeps_config() {
        let mut config = AppConfig::default();
        apply_cli_overrides(&mut config, args(&[]));
        assert_eq!(config.assets.model, PathBuf::from("assets/box.obj"));
        assert_eq!(config.assets.diffuse_texture, PathBuf::from("assets/crate.bmp"));
    }

    #[test]
    fn test_model_arg() {
        let mut config = AppConfig::default();
        apply_cli_overrides(&mut config, args(&["teapot.obj"]));
        assert_eq!(config.assets.model, PathBuf::from("teapot.obj"));
        assert_eq!(config.assets.diffuse_texture, PathBuf::from("assets/crate.bmp"));
    }

    #[test]
    fn test_model_and_texture_args() {
        let mut config = AppConfig::default();
        apply_cli_overrides(&mut config, args(&["teapot.obj", "brick.bmp"]));
        assert_eq!(config.assets.model, PathBuf::from("teapot.obj"));
        assert_eq!(config.assets.diffuse_texture, PathBuf::from("brick.bmp"));
    }
}
