//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`OBJVIEW_SECTION__KEY`)
//!
//! Every section and field has a default, so any of these may be missing.

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Window configuration
    pub window: WindowConfig,
    /// Camera configuration
    pub camera: CameraConfig,
    /// Input configuration
    pub input: InputConfig,
    /// Model and texture paths
    pub assets: AssetsConfig,
    /// Rendering configuration
    pub rendering: RenderingConfig,
    /// Debug configuration
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`OBJVIEW_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // OBJVIEW_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("OBJVIEW_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "objview".to_string(),
            width: 800,
            height: 600,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting position [x, y, z]
    pub start_position: [f32; 3],
    /// Point the camera faces at startup [x, y, z]
    pub look_at: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Maximum pitch angle in degrees
    pub pitch_limit: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 0.0, -10.0],
            look_at: [0.0, 0.0, 0.0],
            fov: 30.0,
            near: 0.1,
            far: 100.0,
            pitch_limit: 85.0,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Movement speed (units per second)
    pub move_speed: f32,
    /// Arrow-key rotation speed (radians per second)
    pub rotate_speed: f32,
    /// Mouse sensitivity (radians per pixel)
    pub mouse_sensitivity: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            rotate_speed: 0.6,
            mouse_sensitivity: 0.002,
        }
    }
}

/// Asset paths
///
/// Without explicit normal or height maps both are derived from the
/// diffuse texture's brightness.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Wavefront OBJ model
    pub model: PathBuf,
    /// BMP colour texture
    pub diffuse_texture: PathBuf,
    /// Optional BMP tangent-space normal map
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_map: Option<PathBuf>,
    /// Optional BMP height map (brightness is height)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_map: Option<PathBuf>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from("assets/box.obj"),
            diffuse_texture: PathBuf::from("assets/crate.bmp"),
            normal_map: None,
            height_map: None,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Point light position [x, y, z]
    pub light_position: [f32; 3],
    /// Light colour [r, g, b]
    pub light_color: [f32; 3],
    /// Ambient light strength
    pub ambient_strength: f32,
    /// Specular highlight strength
    pub specular_strength: f32,
    /// Specular exponent
    pub shininess: f32,
    /// Multisample count (1 disables MSAA; unsupported counts fall back to 1)
    pub msaa_samples: u32,
    /// Enable parallax mapping at startup
    pub parallax_enabled: bool,
    /// Texture-space depth of the parallax effect
    pub parallax_scale: f32,
    /// Slope multiplier for normal maps derived from brightness
    pub relief_strength: f32,
    /// Model rotation about +Y (radians per second)
    pub model_spin_speed: f32,
    /// Spin the model at startup
    pub model_spin_enabled: bool,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.2, 0.3, 0.3, 1.0],
            light_position: [10.0, 10.0, -10.0],
            light_color: [1.0, 1.0, 1.0],
            ambient_strength: 0.2,
            specular_strength: 0.5,
            shininess: 32.0,
            msaa_samples: 4,
            parallax_enabled: true,
            parallax_scale: 0.04,
            relief_strength: 4.0,
            model_spin_speed: 1.0,
            model_spin_enabled: true,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Show the camera position in the window title
    pub show_camera_position: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_camera_position: true,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.camera.fov, 30.0);
        assert_eq!(config.camera.start_position, [0.0, 0.0, -10.0]);
        assert_eq!(config.rendering.background_color, [0.2, 0.3, 0.3, 1.0]);
        assert_eq!(config.rendering.light_position, [10.0, 10.0, -10.0]);
        assert_eq!(config.rendering.msaa_samples, 4);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("diffuse_texture"));
        assert!(toml.contains("parallax_scale"));
        // Unset optional maps are left out
        assert!(!toml.contains("normal_map"));
    }

    #[test]
    fn test_partial_section_uses_defaults() {
        let config: AppConfig = Figment::new()
            .merge(Toml::string("[window]\ntitle = \"Partial\"\n"))
            .extract()
            .unwrap();
        assert_eq!(config.window.title, "Partial");
        assert_eq!(config.window.width, 800);
        assert_eq!(config.input.move_speed, 6.0);
    }

    #[test]
    fn test_optional_asset_paths() {
        let config: AppConfig = Figment::new()
            .merge(Toml::string("[assets]\nheight_map = \"maps/h.bmp\"\n"))
            .extract()
            .unwrap();
        assert_eq!(config.assets.height_map, Some(PathBuf::from("maps/h.bmp")));
        assert!(config.assets.normal_map.is_none());
        assert_eq!(config.assets.model, PathBuf::from("assets/box.obj"));
    }

    #[test]
    fn test_invalid_value_is_error() {
        let result: Result<AppConfig, ConfigError> = Figment::new()
            .merge(Toml::string("[window]\nwidth = \"wide\"\n"))
            .extract()
            .map_err(ConfigError::from);
        let err = result.unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_load_from_missing_dir_gives_defaults() {
        let config = AppConfig::load_from("/nonexistent/config/dir").unwrap();
        assert_eq!(config.window.width, 800);
    }
}
