//! GPU textures uploaded from CPU-side [`TextureData`]

use std::borrow::Cow;

use objview_assets::TextureData;

/// Upper bound for anisotropic filtering; backends clamp to what they support
const MAX_ANISOTROPY: u16 = 16;

/// A sampled 2D texture with its view and sampler
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
}

impl GpuTexture {
    /// Upload an RGBA8 image
    ///
    /// Colour images should pass `srgb = true`; data maps (normals, heights)
    /// must stay linear. Rows are uploaded in stored order, so the first row
    /// of `data` is sampled at `v = 0`. An empty image uploads as a single
    /// white texel; one larger than the device allows is downscaled.
    pub fn from_texture_data(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &TextureData,
        label: &str,
        srgb: bool,
    ) -> Self {
        let max_dimension = device.limits().max_texture_dimension_2d;
        let data = upload_source(data, max_dimension, label);

        let size = wgpu::Extent3d {
            width: data.width,
            height: data.height,
            depth_or_array_layers: 1,
        };
        let format = if srgb {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            &data.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(data.bytes_per_row()),
                rows_per_image: Some(data.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_repeat_sampler(device, label);

        Self {
            texture,
            view,
            sampler,
            width: data.width,
            height: data.height,
        }
    }
}

/// The image actually uploaded for `data` under a `max_dimension` limit
fn upload_source<'a>(data: &'a TextureData, max_dimension: u32, label: &str) -> Cow<'a, TextureData> {
    if data.is_empty() {
        log::warn!("Texture '{}' is empty, uploading a white texel", label);
        return Cow::Owned(TextureData::solid([255, 255, 255, 255]));
    }

    if data.width > max_dimension || data.height > max_dimension {
        let fitted = data.fit_within(max_dimension);
        log::warn!(
            "Texture '{}' is {}x{}, above the device limit of {}; downscaled to {}x{}",
            label,
            data.width,
            data.height,
            max_dimension,
            fitted.width,
            fitted.height
        );
        return Cow::Owned(fitted);
    }

    Cow::Borrowed(data)
}

/// Linear, repeating, anisotropic sampler
pub fn create_repeat_sampler(device: &wgpu::Device, label: &str) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        anisotropy_clamp: MAX_ANISOTROPY,
        ..Default::default()
    })
}
