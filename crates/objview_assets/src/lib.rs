//! Asset loading for objview
//!
//! Turns files on disk into data the renderer can upload:
//!
//! - [`BitmapImage`] - uncompressed 24/32-bit BMP decoding
//! - [`ObjData`] - Wavefront OBJ text parsing (triangles with `v/vt/vn` corners)
//! - [`Mesh`] - de-indexed vertex arrays with tangents and bitangents
//! - [`HeightMap`] - brightness-as-height relief for parallax and normal maps
//! - [`TextureData`] - RGBA8 images ready for GPU upload
//! - [`AssetError`] - everything that can go wrong on the way

mod asset_error;
pub mod bitmap;
pub mod obj;
pub mod mesh;
mod relief;
mod texture_data;

pub use asset_error::AssetError;
pub use bitmap::{BitmapHeader, BitmapImage};
pub use obj::{Face, FaceVertex, ObjData};
pub use mesh::{orthogonalize_tangent, triangle_tangent_basis, Mesh};
pub use relief::HeightMap;
pub use texture_data::TextureData;
