//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - The mesh pipeline and its textures
//! - Frame rendering

use std::sync::Arc;
use winit::window::Window;
use objview_math::{mat4, Mat4};
use objview_render::{
    camera::Camera,
    context::{ContextError, RenderContext},
    pipeline::{choose_sample_count, MeshPipeline, ModelVertex, SceneUniforms},
    texture::GpuTexture,
};
use crate::config::{CameraConfig, RenderingConfig};
use crate::scene::SceneAssets;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
    /// GPU setup failed
    Context(ContextError),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
            RenderError::Context(e) => write!(f, "GPU setup failed: {}", e),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Context(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Context(e)
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: MeshPipeline,
    render_config: RenderingConfig,
    camera_config: CameraConfig,
    parallax_enabled: bool,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: RenderingConfig,
        camera_config: CameraConfig,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let sample_count = choose_sample_count(render_config.msaa_samples, context.surface_format_flags);
        log::info!("Rendering with {}x MSAA", sample_count);

        let mut pipeline = MeshPipeline::new(&context.device, context.config.format, sample_count);
        pipeline.ensure_depth_texture(
            &context.device,
            context.size.width,
            context.size.height,
        );

        let parallax_enabled = render_config.parallax_enabled;
        Ok(Self {
            context,
            pipeline,
            render_config,
            camera_config,
            parallax_enabled,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.pipeline
            .ensure_depth_texture(&self.context.device, self.context.size.width, self.context.size.height);
    }

    /// Upload the mesh and its three textures
    pub fn upload_scene(&mut self, assets: &SceneAssets) {
        let device = &self.context.device;
        let queue = &self.context.queue;

        let vertices = ModelVertex::from_mesh(&assets.mesh);
        self.pipeline.upload_mesh(device, &vertices);

        let diffuse = GpuTexture::from_texture_data(device, queue, &assets.diffuse, "Diffuse Texture", true);
        let normal = GpuTexture::from_texture_data(device, queue, &assets.normal_map, "Normal Map", false);
        let height = GpuTexture::from_texture_data(device, queue, &assets.height_map, "Height Map", false);
        self.pipeline.set_material(device, &diffuse, &normal, &height);

        log::info!(
            "Uploaded {} vertices ({} triangles)",
            self.pipeline.vertex_count(),
            assets.mesh.triangle_count()
        );
    }

    /// Switch parallax mapping on or off; returns the new state
    pub fn toggle_parallax(&mut self) -> bool {
        self.parallax_enabled = !self.parallax_enabled;
        log::info!("Parallax mapping {}", if self.parallax_enabled { "on" } else { "off" });
        self.parallax_enabled
    }

    pub fn parallax_enabled(&self) -> bool {
        self.parallax_enabled
    }

    /// Render a single frame
    pub fn render_frame(&mut self, camera: &Camera, model: Mat4) -> Result<(), RenderError> {
        let uniforms = build_uniforms(
            &self.render_config,
            &self.camera_config,
            camera,
            model,
            self.context.aspect_ratio(),
            self.parallax_enabled,
        );
        self.pipeline.update_uniforms(&self.context.queue, &uniforms);

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.context.reconfigure();
                return Err(RenderError::SurfaceLost);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let bg = &self.render_config.background_color;
        self.pipeline.render(
            &mut encoder,
            &view,
            wgpu::Color {
                r: bg[0] as f64,
                g: bg[1] as f64,
                b: bg[2] as f64,
                a: bg[3] as f64,
            },
        );

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}

/// Per-frame uniforms from config, camera and model transform
fn build_uniforms(
    render_config: &RenderingConfig,
    camera_config: &CameraConfig,
    camera: &Camera,
    model: Mat4,
    aspect: f32,
    parallax_enabled: bool,
) -> SceneUniforms {
    let projection = mat4::perspective(
        camera_config.fov.to_radians(),
        aspect,
        camera_config.near,
        camera_config.far,
    );

    SceneUniforms {
        model,
        view: camera.view_matrix(),
        projection,
        light_position: render_config.light_position,
        ambient_strength: render_config.ambient_strength,
        camera_position: camera.position.to_array(),
        specular_strength: render_config.specular_strength,
        light_color: render_config.light_color,
        shininess: render_config.shininess,
        parallax_scale: render_config.parallax_scale,
        parallax_enabled: parallax_enabled as u32,
        _padding: [0; 2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use objview_math::Vec3;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
        assert_eq!(
            format!("{}", RenderError::from(ContextError::NoAdapter)),
            "GPU setup failed: No suitable GPU adapter found"
        );
    }

    #[test]
    fn test_uniforms_follow_config() {
        let render_config = RenderingConfig::default();
        let camera_config = CameraConfig::default();
        let camera = Camera::default();
        let uniforms = build_uniforms(
            &render_config,
            &camera_config,
            &camera,
            mat4::IDENTITY,
            4.0 / 3.0,
            true,
        );

        assert_eq!(uniforms.model, mat4::IDENTITY);
        assert_eq!(uniforms.light_position, [10.0, 10.0, -10.0]);
        assert_eq!(uniforms.camera_position, [0.0, 0.0, -10.0]);
        assert_eq!(uniforms.shininess, 32.0);
        assert_eq!(uniforms.parallax_enabled, 1);
        assert_eq!(uniforms.parallax_scale, 0.04);
    }

    #[test]
    fn test_uniforms_parallax_off() {
        let uniforms = build_uniforms(
            &RenderingConfig::default(),
            &CameraConfig::default(),
            &Camera::default(),
            mat4::IDENTITY,
            1.0,
            false,
        );
        assert_eq!(uniforms.parallax_enabled, 0);
    }

    #[test]
    fn test_uniform_projection_uses_fov_degrees() {
        let camera_config = CameraConfig {
            fov: 90.0,
            ..CameraConfig::default()
        };
        let uniforms = build_uniforms(
            &RenderingConfig::default(),
            &camera_config,
            &Camera::default(),
            mat4::IDENTITY,
            2.0,
            true,
        );
        // 90° vertical fov: focal length 1, scaled by aspect horizontally
        assert!((uniforms.projection[1][1] - 1.0).abs() < 1e-5);
        assert!((uniforms.projection[0][0] - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_origin_is_in_front_of_default_camera() {
        let camera = Camera::default();
        let view = camera.view_matrix();
        let p = mat4::transform_point(view, Vec3::ZERO);
        // Right-handed view space looks down -Z
        assert!((p.z + 10.0).abs() < 1e-4, "got {:?}", p);
    }
}
