//! Mesh Rendering Library
//!
//! This crate provides the wgpu-based rendering pipeline for displaying a
//! textured, normal-mapped and parallax-mapped triangle mesh.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::Camera`] - First-person camera with yaw and pitch
//! - [`texture::GpuTexture`] - Texture, view and sampler uploaded from [`TextureData`]
//! - [`pipeline::MeshPipeline`] - Lit, textured mesh rendering

pub mod context;
pub mod camera;
pub mod texture;
pub mod pipeline;

// Re-export asset types the renderer consumes
pub use objview_assets::{Mesh, TextureData};
pub use objview_math::{Mat4, Vec3};
