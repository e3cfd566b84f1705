//! Application systems
//!
//! The window, the renderer and the per-frame update, driven by `main`.

mod render;
mod simulation;
mod window;

pub use render::{RenderError, RenderSystem};
pub use simulation::SimulationSystem;
pub use window::{WindowError, WindowSystem};
