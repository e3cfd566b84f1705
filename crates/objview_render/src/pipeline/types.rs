//! GPU-compatible data types for the mesh pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use objview_assets::Mesh;
use objview_math::mat4;

/// A mesh vertex with its tangent frame
///
/// Layout: 56 bytes (must match mesh.wgsl VertexInput)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
    /// Direction of increasing u
    pub tangent: [f32; 3],
    /// Direction of increasing v
    pub bitangent: [f32; 3],
}

impl ModelVertex {
    /// Interleave the mesh's parallel arrays into vertices
    pub fn from_mesh(mesh: &Mesh) -> Vec<ModelVertex> {
        (0..mesh.vertex_count())
            .map(|i| ModelVertex {
                position: mesh.positions[i].to_array(),
                tex_coords: mesh.tex_coords[i].to_array(),
                normal: mesh.normals[i].to_array(),
                tangent: mesh.tangents[i].to_array(),
                bitangent: mesh.bitangents[i].to_array(),
            })
            .collect()
    }
}

/// Per-frame scene uniforms
///
/// Layout: 256 bytes total (must match mesh.wgsl SceneUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    /// Model matrix (64 bytes)
    pub model: [[f32; 4]; 4],
    /// View matrix (64 bytes)
    pub view: [[f32; 4]; 4],
    /// Projection matrix (64 bytes)
    pub projection: [[f32; 4]; 4],
    /// Light position in world space + ambient (16 bytes)
    pub light_position: [f32; 3],
    pub ambient_strength: f32,
    /// Camera position in world space + specular (16 bytes)
    pub camera_position: [f32; 3],
    pub specular_strength: f32,
    /// Light colour + specular exponent (16 bytes)
    pub light_color: [f32; 3],
    pub shininess: f32,
    /// Parallax parameters (16 bytes)
    pub parallax_scale: f32,
    /// Non-zero enables parallax mapping
    pub parallax_enabled: u32,
    pub _padding: [u32; 2],
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            model: mat4::IDENTITY,
            view: mat4::IDENTITY,
            projection: mat4::IDENTITY,
            light_position: [10.0, 10.0, -10.0],
            ambient_strength: 0.2,
            camera_position: [0.0, 0.0, -10.0],
            specular_strength: 0.5,
            light_color: [1.0, 1.0, 1.0],
            shininess: 32.0,
            parallax_scale: 0.04,
            parallax_enabled: 1,
            _padding: [0; 2],
        }
    }
}
