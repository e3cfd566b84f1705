//! Windows bitmap (BMP) loading
//!
//! Only the parts of the format a texture needs: the 54-byte file + info
//! header, uncompressed 24- or 32-bit pixels, bottom-up or top-down rows.
//!
//! Decoded pixels are always packed RGB, 3 bytes per pixel, without row
//! padding, with rows ordered bottom-up. The first row therefore lines up
//! with texture coordinate `v = 0`, so OBJ texture coordinates can be used
//! as-is.

use std::path::Path;

use crate::AssetError;

/// Size of the BMP file header plus BITMAPINFOHEADER in bytes
pub const HEADER_SIZE: usize = 54;

const SIGNATURE: [u8; 2] = *b"BM";
const DATA_OFFSET_OFFSET: usize = 0x0A;
const INFO_HEADER_SIZE: u32 = 40;
const WIDTH_OFFSET: usize = 0x12;
const HEIGHT_OFFSET: usize = 0x16;
const BITS_PER_PIXEL_OFFSET: usize = 0x1C;
const COMPRESSION_OFFSET: usize = 0x1E;
const DATA_SIZE_OFFSET: usize = 0x22;

/// Bit depth assumed when the header leaves it at zero
const DEFAULT_BITS_PER_PIXEL: u16 = 24;
/// Uncompressed pixel data
const BI_RGB: u32 = 0;
/// Largest accepted width or height
pub const MAX_DIMENSION: u32 = 16384;
/// 72 DPI, in pixels per metre
const PIXELS_PER_METRE: i32 = 2835;

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn read_i32(bytes: &[u8], offset: usize) -> i32 {
    read_u32(bytes, offset) as i32
}

/// Metadata decoded from the fixed 54-byte bitmap header
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapHeader {
    /// Byte offset of the pixel array from the start of the file
    pub data_offset: usize,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels (magnitude; see `top_down`)
    pub height: u32,
    /// Rows are stored top row first (negative height in the file)
    pub top_down: bool,
    pub bits_per_pixel: u16,
    /// Compression method; only `0` (BI_RGB) is accepted
    pub compression: u32,
    /// Size of the pixel array in bytes, including row padding
    pub data_size: usize,
}

impl BitmapHeader {
    /// Parse the header at the start of `bytes`
    ///
    /// A zero data offset means "right after the header", a zero data size is
    /// derived from the dimensions. Zero-sized images parse successfully and
    /// report [`is_empty`](Self::is_empty).
    pub fn parse(bytes: &[u8]) -> Result<Self, AssetError> {
        if bytes.len() < HEADER_SIZE {
            return Err(AssetError::Truncated {
                expected: HEADER_SIZE,
                actual: bytes.len(),
            });
        }

        let signature = [bytes[0], bytes[1]];
        if signature != SIGNATURE {
            return Err(AssetError::InvalidSignature(signature));
        }

        let raw_width = read_i32(bytes, WIDTH_OFFSET);
        let raw_height = read_i32(bytes, HEIGHT_OFFSET);
        if raw_width < 0 {
            return Err(AssetError::Unsupported(format!("negative width {}", raw_width)));
        }

        let mut data_offset = read_u32(bytes, DATA_OFFSET_OFFSET) as usize;
        if data_offset == 0 {
            data_offset = HEADER_SIZE;
        }

        let mut header = Self {
            data_offset,
            width: raw_width as u32,
            height: raw_height.unsigned_abs(),
            top_down: raw_height < 0,
            bits_per_pixel: DEFAULT_BITS_PER_PIXEL,
            compression: read_u32(bytes, COMPRESSION_OFFSET),
            data_size: read_u32(bytes, DATA_SIZE_OFFSET) as usize,
        };

        if header.is_empty() {
            header.width = 0;
            header.height = 0;
            header.data_size = 0;
            return Ok(header);
        }

        if header.width > MAX_DIMENSION || header.height > MAX_DIMENSION {
            return Err(AssetError::Unsupported(format!(
                "{}x{} bitmap, the limit is {} pixels per side",
                header.width, header.height, MAX_DIMENSION
            )));
        }

        let bits_per_pixel = read_u16(bytes, BITS_PER_PIXEL_OFFSET);
        header.bits_per_pixel = match bits_per_pixel {
            0 => DEFAULT_BITS_PER_PIXEL,
            24 | 32 => bits_per_pixel,
            other => {
                return Err(AssetError::Unsupported(format!("{} bits per pixel", other)));
            }
        };

        if header.compression != BI_RGB {
            return Err(AssetError::Unsupported(format!(
                "compression method {}",
                header.compression
            )));
        }

        if header.data_size == 0 {
            header.data_size = header
                .row_stride()
                .checked_mul(header.height as usize)
                .ok_or_else(|| AssetError::Unsupported("image dimensions too large".to_string()))?;
        }

        Ok(header)
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bits_per_pixel as usize / 8
    }

    /// Bytes per stored row; rows are padded to a multiple of 4
    pub fn row_stride(&self) -> usize {
        (self.width as usize * self.bytes_per_pixel() + 3) & !3
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A decoded bitmap: packed RGB rows, bottom row first
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitmapImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl BitmapImage {
    /// Bytes per decoded pixel (R, G, B)
    pub const BYTES_PER_PIXEL: usize = 3;

    /// A 0x0 image with no pixel data
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap packed bottom-up RGB pixels
    ///
    /// Returns `None` when `pixels` does not hold exactly
    /// `width * height * 3` bytes.
    pub fn from_rgb(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = width as usize * height as usize * Self::BYTES_PER_PIXEL;
        (pixels.len() == expected).then_some(Self { width, height, pixels })
    }

    /// Read and decode a `.bmp` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path.as_ref())?;
        let image = Self::from_bytes(&bytes)?;
        log::debug!(
            "Loaded bitmap {} ({}x{})",
            path.as_ref().display(),
            image.width,
            image.height
        );
        Ok(image)
    }

    /// Decode a bitmap held in memory
    ///
    /// Pixel data cut short by the end of the input is tolerated: the missing
    /// pixels decode as black and a warning is logged. Less than half of the
    /// pixel data is a `Truncated` error.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let header = BitmapHeader::parse(bytes)?;
        if header.is_empty() {
            return Ok(Self::empty());
        }

        let width = header.width as usize;
        let height = header.height as usize;
        let stride = header.row_stride();
        let source_bpp = header.bytes_per_pixel();

        let data = bytes.get(header.data_offset..).unwrap_or(&[]);
        let needed = stride
            .checked_mul(height)
            .ok_or_else(|| AssetError::Unsupported("image dimensions too large".to_string()))?;
        if data.len() < needed {
            if data.len() < needed / 2 {
                return Err(AssetError::Truncated {
                    expected: header.data_offset + needed,
                    actual: bytes.len(),
                });
            }
            log::warn!(
                "Bitmap pixel data truncated: expected {} bytes, found {}",
                needed,
                data.len()
            );
        }

        let len = width * height * Self::BYTES_PER_PIXEL;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| {
            AssetError::Unsupported(format!("no memory for a {}x{} bitmap", width, height))
        })?;
        pixels.resize(len, 0);
        for row in 0..height {
            let target_row = if header.top_down { height - 1 - row } else { row };
            let row_start = row * stride;
            for x in 0..width {
                let src = row_start + x * source_bpp;
                let Some(bgr) = data.get(src..src + 3) else {
                    continue;
                };
                let dst = (target_row * width + x) * Self::BYTES_PER_PIXEL;
                pixels[dst] = bgr[2];
                pixels[dst + 1] = bgr[1];
                pixels[dst + 2] = bgr[0];
            }
        }

        Ok(Self {
            width: header.width,
            height: header.height,
            pixels,
        })
    }

    /// Encode as an uncompressed 24-bit bottom-up BMP file
    pub fn to_bmp_bytes(&self) -> Vec<u8> {
        let width = self.width as usize;
        let height = self.height as usize;
        let stride = (width * 3 + 3) & !3;
        let data_size = stride * height;

        let mut out = Vec::with_capacity(HEADER_SIZE + data_size);
        // File header
        out.extend_from_slice(&SIGNATURE);
        out.extend_from_slice(&((HEADER_SIZE + data_size) as u32).to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&(HEADER_SIZE as u32).to_le_bytes());
        // BITMAPINFOHEADER
        out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
        out.extend_from_slice(&(self.width as i32).to_le_bytes());
        out.extend_from_slice(&(self.height as i32).to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&24u16.to_le_bytes());
        out.extend_from_slice(&BI_RGB.to_le_bytes());
        out.extend_from_slice(&(data_size as u32).to_le_bytes());
        out.extend_from_slice(&PIXELS_PER_METRE.to_le_bytes());
        out.extend_from_slice(&PIXELS_PER_METRE.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        debug_assert_eq!(out.len(), HEADER_SIZE);

        for row in self.pixels.chunks_exact(width.max(1) * Self::BYTES_PER_PIXEL) {
            for rgb in row.chunks_exact(Self::BYTES_PER_PIXEL) {
                out.extend_from_slice(&[rgb[2], rgb[1], rgb[0]]);
            }
            out.resize(out.len() + (stride - width * 3), 0);
        }

        out
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed RGB pixel data, bottom row first
    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    /// Size of the pixel data in bytes
    pub fn size(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// RGB value at column `x`, row `y` (row 0 is the bottom row)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * Self::BYTES_PER_PIXEL;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
    }
}
