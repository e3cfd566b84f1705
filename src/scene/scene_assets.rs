//! Loading the model and its textures
//!
//! Asset problems never stop the viewer. Each failure is logged and replaced
//! with a stand-in: an empty mesh, a white diffuse texture, a flat normal map
//! or a flat height map.

use std::path::Path;

use objview_assets::{BitmapImage, HeightMap, Mesh, TextureData};

use crate::config::AssetsConfig;

/// Everything the renderer uploads, in CPU memory
#[derive(Debug, Clone)]
pub struct SceneAssets {
    pub mesh: Mesh,
    /// Colour texture (sRGB)
    pub diffuse: TextureData,
    /// Tangent-space normal map (linear)
    pub normal_map: TextureData,
    /// Height map, height in the red channel (linear)
    pub height_map: TextureData,
}

impl SceneAssets {
    /// Load the configured assets
    ///
    /// Normal and height maps that are not configured are derived from the
    /// diffuse texture, with `relief_strength` scaling the derived normals.
    pub fn load(config: &AssetsConfig, relief_strength: f32) -> Self {
        let mesh = match Mesh::load(&config.model) {
            Ok(mesh) => mesh,
            Err(e) => {
                log::error!("Failed to load model {}: {}", config.model.display(), e);
                Mesh::empty()
            }
        };

        let diffuse_image = load_bitmap(&config.diffuse_texture);
        let diffuse = diffuse_image
            .as_ref()
            .map(TextureData::from_bitmap)
            .unwrap_or_else(|| TextureData::solid([255, 255, 255, 255]));

        let heights = match &config.height_map {
            Some(path) => load_bitmap(path).map(|image| HeightMap::from_luminance(&image)),
            None => diffuse_image.as_ref().map(HeightMap::from_luminance),
        };

        let normal_map = match &config.normal_map {
            Some(path) => load_bitmap(path).map(|image| TextureData::from_bitmap(&image)),
            None => heights.as_ref().map(|h| h.to_normal_map(relief_strength)),
        }
        .unwrap_or_else(TextureData::flat_normal);

        let height_map = heights
            .map(|h| h.to_texture_data())
            .unwrap_or_else(TextureData::flat_height);

        log::info!(
            "Scene: {} triangles, diffuse {}x{}, normal map {}x{}, height map {}x{}",
            mesh.triangle_count(),
            diffuse.width,
            diffuse.height,
            normal_map.width,
            normal_map.height,
            height_map.width,
            height_map.height
        );

        Self {
            mesh,
            diffuse,
            normal_map,
            height_map,
        }
    }
}

/// Load a bitmap, logging failures; empty images count as missing
fn load_bitmap(path: &Path) -> Option<BitmapImage> {
    match BitmapImage::load(path) {
        Ok(image) if image.is_empty() => {
            log::warn!("Bitmap {} has no pixels, ignoring it", path.display());
            None
        }
        Ok(image) => Some(image),
        Err(e) => {
            log::error!("Failed to load bitmap {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn shipped(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets").join(name)
    }

    fn missing(name: &str) -> PathBuf {
        PathBuf::from("/nonexistent/assets").join(name)
    }

    #[test]
    fn test_load_shipped_assets() {
        let config = AssetsConfig {
            model: shipped("box.obj"),
            diffuse_texture: shipped("crate.bmp"),
            normal_map: None,
            height_map: None,
        };
        let assets = SceneAssets::load(&config, 4.0);
        assert_eq!(assets.mesh.triangle_count(), 12);
        assert_eq!((assets.diffuse.width, assets.diffuse.height), (64, 64));
        // Derived maps match the diffuse texture
        assert_eq!((assets.normal_map.width, assets.normal_map.height), (64, 64));
        assert_eq!((assets.height_map.width, assets.height_map.height), (64, 64));
    }

    #[test]
    fn test_missing_assets_fall_back() {
        let config = AssetsConfig {
            model: missing("box.obj"),
            diffuse_texture: missing("crate.bmp"),
            normal_map: None,
            height_map: None,
        };
        let assets = SceneAssets::load(&config, 4.0);
        assert!(assets.mesh.is_empty());
        assert_eq!(assets.diffuse, TextureData::solid([255, 255, 255, 255]));
        assert_eq!(assets.normal_map, TextureData::flat_normal());
        assert_eq!(assets.height_map, TextureData::flat_height());
    }

    #[test]
    fn test_missing_explicit_normal_map_is_flat() {
        let config = AssetsConfig {
            model: shipped("box.obj"),
            diffuse_texture: shipped("crate.bmp"),
            normal_map: Some(missing("normal.bmp")),
            height_map: None,
        };
        let assets = SceneAssets::load(&config, 4.0);
        assert_eq!(assets.normal_map, TextureData::flat_normal());
        // Height still comes from the diffuse texture
        assert_eq!(assets.height_map.width, 64);
    }

    #[test]
    fn test_explicit_height_map() {
        let config = AssetsConfig {
            model: shipped("box.obj"),
            diffuse_texture: missing("crate.bmp"),
            normal_map: None,
            height_map: Some(shipped("crate.bmp")),
        };
        let assets = SceneAssets::load(&config, 4.0);
        assert_eq!(assets.diffuse.width, 1);
        assert_eq!(assets.height_map.width, 64);
        assert_eq!(assets.normal_map.width, 64);
    }

    #[test]
    fn test_corrupt_oversized_bitmap_falls_back() {
        let mut bytes = BitmapImage::empty().to_bmp_bytes();
        bytes[0x12..0x16].copy_from_slice(&1_000_000u32.to_le_bytes());
        bytes[0x16..0x1A].copy_from_slice(&1_000_000u32.to_le_bytes());
        let path = std::env::temp_dir().join(format!("objview-huge-{}.bmp", std::process::id()));
        std::fs::write(&path, &bytes).unwrap();

        let config = AssetsConfig {
            model: shipped("box.obj"),
            diffuse_texture: path.clone(),
            normal_map: None,
            height_map: None,
        };
        let assets = SceneAssets::load(&config, 4.0);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(assets.diffuse, TextureData::solid([255, 255, 255, 255]));
        assert_eq!(assets.normal_map, TextureData::flat_normal());
        assert_eq!(assets.height_map, TextureData::flat_height());
    }

    #[test]
    fn test_zero_relief_strength_gives_flat_normals() {
        let config = AssetsConfig {
            model: shipped("box.obj"),
            diffuse_texture: shipped("crate.bmp"),
            normal_map: None,
            height_map: None,
        };
        let assets = SceneAssets::load(&config, 0.0);
        assert!(assets
            .normal_map
            .pixels
            .chunks_exact(4)
            .all(|p| p == [128, 128, 255, 255]));
    }
}
