//! CPU-side RGBA8 texture images, ready for GPU upload

use crate::bitmap::BitmapImage;

/// Tightly packed RGBA8 pixels, bottom row first
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureData {
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Expand a decoded bitmap to RGBA with opaque alpha
    pub fn from_bitmap(image: &BitmapImage) -> Self {
        let pixels = image
            .data()
            .chunks_exact(BitmapImage::BYTES_PER_PIXEL)
            .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
            .collect();

        Self {
            width: image.width(),
            height: image.height(),
            pixels,
        }
    }

    /// A single texel of one colour
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: rgba.to_vec(),
        }
    }

    /// Tangent-space normal map that leaves the surface normal untouched
    pub fn flat_normal() -> Self {
        Self::solid([128, 128, 255, 255])
    }

    /// Height map with no relief, so parallax mapping shifts nothing
    pub fn flat_height() -> Self {
        Self::solid([0, 0, 0, 255])
    }

    /// Nearest-neighbour copy whose larger side is at most `max_dimension`
    ///
    /// The aspect ratio is kept; images that already fit are cloned.
    pub fn fit_within(&self, max_dimension: u32) -> Self {
        let max_dimension = max_dimension.max(1);
        let largest = self.width.max(self.height);
        if largest <= max_dimension {
            return self.clone();
        }

        let scale = |side: u32| ((side as u64 * max_dimension as u64 / largest as u64) as u32).max(1);
        let (width, height) = (scale(self.width), scale(self.height));

        let mut pixels = Vec::with_capacity(width as usize * height as usize * Self::BYTES_PER_PIXEL);
        for y in 0..height {
            let src_y = (y as u64 * self.height as u64 / height as u64) as u32;
            for x in 0..width {
                let src_x = (x as u64 * self.width as u64 / width as u64) as u32;
                let i = (src_y as usize * self.width as usize + src_x as usize) * Self::BYTES_PER_PIXEL;
                pixels.extend_from_slice(&self.pixels[i..i + Self::BYTES_PER_PIXEL]);
            }
        }

        Self { width, height, pixels }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn bytes_per_row(&self) -> u32 {
        self.width * Self::BYTES_PER_PIXEL as u32
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * Self::BYTES_PER_PIXEL;
        let p = &self.pixels[i..i + Self::BYTES_PER_PIXEL];
        Some([p[0], p[1], p[2], p[3]])
    }
}
