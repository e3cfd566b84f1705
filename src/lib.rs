//! objview: a textured OBJ model viewer
//!
//! The binary wires these modules into a winit event loop:
//!
//! - [`config`] - layered TOML + environment configuration
//! - [`input`] - special-key mapping (cursor capture, reset, toggles)
//! - [`scene`] - model and texture loading with fallbacks
//! - [`systems`] - window, rendering and per-frame simulation

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
