//! Rendering pipeline components
//!
//! GPU data layouts and the render pipeline that draws the model.

pub mod types;
pub mod mesh_pipeline;

// Re-export types
pub use types::{ModelVertex, SceneUniforms};

// Re-export pipelines
pub use mesh_pipeline::{choose_sample_count, MeshPipeline};
