//! 3D Mathematics Library
//!
//! Small vector and matrix types shared by the asset loaders and the renderer.
//!
//! ## Core Types
//!
//! - [`Vec2`] - texture coordinates
//! - [`Vec3`] - positions, normals, tangents
//! - [`Mat4`] - column-major 4x4 matrix helpers in [`mat4`]

mod vec2;
mod vec3;
pub mod mat4;

pub use vec2::Vec2;
pub use vec3::Vec3;
pub use mat4::Mat4;
