//! Camera input handling
//!
//! This crate turns keyboard and mouse events into first-person camera
//! movement for the model viewer.

mod camera_controller;

pub use camera_controller::{CameraController, CameraControl};
