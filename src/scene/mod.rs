//! Scene setup
//!
//! Loads the model and textures the viewer displays.

mod scene_assets;

pub use scene_assets::SceneAssets;
