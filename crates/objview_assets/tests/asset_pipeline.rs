//! Integration tests for the asset pipeline
//!
//! These tests run the shipped demo assets through every loader:
//! 1. The crate texture decodes and expands to RGBA
//! 2. The box model parses, de-indexes and gets a valid tangent frame
//! 3. Relief maps derived from the texture match its dimensions

use std::path::PathBuf;

use objview_assets::{AssetError, BitmapHeader, BitmapImage, HeightMap, Mesh, ObjData, TextureData};
use objview_math::Vec3;

const EPSILON: f32 = 1e-4;

fn asset_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../assets")
        .join(name)
}

// ==================== Bitmap Tests ====================

#[test]
fn test_crate_bitmap_loads() {
    let image = BitmapImage::load(asset_path("crate.bmp")).unwrap();
    assert_eq!(image.width(), 64);
    assert_eq!(image.height(), 64);
    assert_eq!(image.size(), 64 * 64 * 3);
}

#[test]
fn test_crate_bitmap_header() {
    let bytes = std::fs::read(asset_path("crate.bmp")).unwrap();
    let header = BitmapHeader::parse(&bytes).unwrap();
    assert_eq!(header.data_offset, 54);
    assert_eq!(header.bits_per_pixel, 24);
    assert!(!header.top_down);
    assert_eq!(header.data_size, header.row_stride() * 64);
}

#[test]
fn test_crate_bitmap_reencodes_identically() {
    let bytes = std::fs::read(asset_path("crate.bmp")).unwrap();
    let image = BitmapImage::from_bytes(&bytes).unwrap();
    assert_eq!(BitmapImage::from_bytes(&image.to_bmp_bytes()).unwrap(), image);
}

#[test]
fn test_texture_data_from_crate() {
    let image = BitmapImage::load(asset_path("crate.bmp")).unwrap();
    let texture = TextureData::from_bitmap(&image);
    assert_eq!(texture.pixels.len(), 64 * 64 * 4);
    assert!(texture.pixels.chunks_exact(4).all(|p| p[3] == 255));
}

#[test]
fn test_obj_is_not_a_bitmap() {
    let result = BitmapImage::load(asset_path("box.obj"));
    assert!(matches!(result, Err(AssetError::InvalidSignature(_))));
}

// ==================== Mesh Tests ====================

#[test]
fn test_box_obj_parses() {
    let obj = ObjData::load(asset_path("box.obj")).unwrap();
    assert_eq!(obj.positions.len(), 8);
    assert_eq!(obj.tex_coords.len(), 4);
    assert_eq!(obj.normals.len(), 6);
    assert_eq!(obj.faces.len(), 12);
}

#[test]
fn test_box_mesh_array_lengths() {
    let mesh = Mesh::load(asset_path("box.obj")).unwrap();
    assert_eq!(mesh.triangle_count(), 12);
    assert_eq!(mesh.vertex_count(), 36);
    for len in [
        mesh.tex_coords.len(),
        mesh.normals.len(),
        mesh.tangents.len(),
        mesh.bitangents.len(),
    ] {
        assert_eq!(len, 36);
    }
}

#[test]
fn test_box_tangent_frame() {
    let mesh = Mesh::load(asset_path("box.obj")).unwrap();
    for i in 0..mesh.vertex_count() {
        let n = mesh.normals[i];
        let t = mesh.tangents[i];
        let b = mesh.bitangents[i];
        assert!((t.length() - 1.0).abs() < EPSILON, "vertex {}: tangent {:?}", i, t);
        assert!(t.dot(n).abs() < EPSILON, "vertex {}: tangent not perpendicular", i);
        assert!(n.cross(t).dot(b) >= 0.0, "vertex {}: frame is left-handed", i);
    }
}

#[test]
fn test_box_normals_point_outward() {
    let mesh = Mesh::load(asset_path("box.obj")).unwrap();
    for tri in 0..mesh.triangle_count() {
        let [a, b, c] = [0, 1, 2].map(|k| mesh.positions[tri * 3 + k]);
        let face_normal = (b - a).cross(c - a).normalized();
        assert!(face_normal.dot(mesh.normals[tri * 3]) > 0.99, "triangle {} winds inward", tri);
    }
}

#[test]
fn test_box_bounds() {
    let mesh = Mesh::load(asset_path("box.obj")).unwrap();
    let (min, max) = mesh.bounds().unwrap();
    assert_eq!(min, Vec3::new(-1.0, -1.0, -1.0));
    assert_eq!(max, Vec3::new(1.0, 1.0, 1.0));
}

#[test]
fn test_missing_model() {
    assert!(matches!(
        Mesh::load(asset_path("missing.obj")),
        Err(AssetError::Io(_))
    ));
}

// ==================== Relief Tests ====================

#[test]
fn test_relief_maps_match_texture_size() {
    let image = BitmapImage::load(asset_path("crate.bmp")).unwrap();
    let heights = HeightMap::from_luminance(&image);
    assert_eq!(heights.values.len(), 64 * 64);
    assert!(heights.values.iter().all(|h| (0.0..=1.0).contains(h)));

    let normals = heights.to_normal_map(4.0);
    assert_eq!((normals.width, normals.height), (64, 64));
    // Normals always face out of the surface
    assert!(normals.pixels.chunks_exact(4).all(|p| p[2] >= 128));

    let height_texture = heights.to_texture_data();
    assert_eq!(height_texture.pixels.len(), normals.pixels.len());
}
