//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use objview::config::AppConfig;
use serial_test::serial;
use std::path::PathBuf;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("OBJVIEW_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("OBJVIEW_WINDOW__TITLE");
    assert_eq!(config.window.title, "Test From Env");
}

#[test]
#[serial]
fn test_env_override_keeps_other_fields() {
    std::env::set_var("OBJVIEW_INPUT__MOVE_SPEED", "12.5");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("OBJVIEW_INPUT__MOVE_SPEED");

    assert_eq!(config.input.move_speed, 12.5);
    assert_eq!(config.input.mouse_sensitivity, 0.002);
    assert_eq!(config.window.width, 800);
}

#[test]
#[serial]
fn test_env_override_asset_path() {
    std::env::set_var("OBJVIEW_ASSETS__NORMAL_MAP", "maps/normal.bmp");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("OBJVIEW_ASSETS__NORMAL_MAP");

    assert_eq!(config.assets.normal_map, Some(PathBuf::from("maps/normal.bmp")));
    assert!(config.assets.height_map.is_none());
}

#[test]
#[serial]
fn test_default_file_loading() {
    std::env::remove_var("OBJVIEW_WINDOW__TITLE");

    let cwd = std::env::current_dir().unwrap();
    assert!(cwd.join("config/default.toml").exists());

    let config = AppConfig::load_from(cwd.join("config")).unwrap();
    assert_eq!(config.camera.fov, 30.0);
    assert_eq!(config.assets.model, PathBuf::from("assets/box.obj"));
    assert_eq!(config.rendering.background_color, [0.2, 0.3, 0.3, 1.0]);
    assert_eq!(config.rendering.msaa_samples, 4);
}

#[test]
#[serial]
fn test_user_file_overrides_default() {
    let dir = std::env::temp_dir().join(format!("objview-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("default.toml"), "[window]\nwidth = 640\nheight = 480\n").unwrap();
    std::fs::write(dir.join("user.toml"), "[window]\nwidth = 1024\n").unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    assert_eq!(config.window.width, 1024);
    assert_eq!(config.window.height, 480);
}
