//! Height and normal maps derived from a colour image
//!
//! A single diffuse bitmap carries no surface relief. Treating its brightness
//! as height gives a plausible bump pattern for parallax mapping, and the
//! gradient of that height gives a matching tangent-space normal map.

use objview_math::Vec3;

use crate::bitmap::BitmapImage;
use crate::texture_data::TextureData;

/// Rec. 601 luma weights
const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Scalar height per texel, in `[0, 1]`, bottom row first
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeightMap {
    pub width: u32,
    pub height: u32,
    pub values: Vec<f32>,
}

impl HeightMap {
    /// Brighter texels are higher
    pub fn from_luminance(image: &BitmapImage) -> Self {
        let values = image
            .data()
            .chunks_exact(BitmapImage::BYTES_PER_PIXEL)
            .map(|rgb| {
                let luma = rgb[0] as f32 * LUMA_WEIGHTS[0]
                    + rgb[1] as f32 * LUMA_WEIGHTS[1]
                    + rgb[2] as f32 * LUMA_WEIGHTS[2];
                (luma / 255.0).clamp(0.0, 1.0)
            })
            .collect();

        Self {
            width: image.width(),
            height: image.height(),
            values,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Height at `(x, y)`, wrapping around the edges like a repeating texture
    fn sample_wrapped(&self, x: i64, y: i64) -> f32 {
        let w = self.width as i64;
        let h = self.height as i64;
        let index = y.rem_euclid(h) * w + x.rem_euclid(w);
        self.values[index as usize]
    }

    /// Tangent-space normal map from the height gradient
    ///
    /// `strength` scales the slopes; 0 gives a flat map.
    pub fn to_normal_map(&self, strength: f32) -> TextureData {
        if self.is_empty() {
            return TextureData::default();
        }

        let mut pixels = Vec::with_capacity(self.values.len() * TextureData::BYTES_PER_PIXEL);
        for y in 0..self.height as i64 {
            for x in 0..self.width as i64 {
                let dh_du = (self.sample_wrapped(x + 1, y) - self.sample_wrapped(x - 1, y)) * 0.5;
                let dh_dv = (self.sample_wrapped(x, y + 1) - self.sample_wrapped(x, y - 1)) * 0.5;
                let normal = Vec3::new(-dh_du * strength, -dh_dv * strength, 1.0).normalized();
                pixels.extend_from_slice(&[
                    encode_unit(normal.x),
                    encode_unit(normal.y),
                    encode_unit(normal.z),
                    255,
                ]);
            }
        }

        TextureData {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Grey-scale texture with the height in every colour channel
    pub fn to_texture_data(&self) -> TextureData {
        let pixels = self
            .values
            .iter()
            .flat_map(|&h| {
                let v = (h * 255.0).round() as u8;
                [v, v, v, 255]
            })
            .collect();

        TextureData {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

/// Map a component in `[-1, 1]` to a byte
fn encode_unit(value: f32) -> u8 {
    ((value * 0.5 + 0.5) * 255.0).round().clamp(0.0, 255.0) as u8
}
