mod environment;
mod helpers;
mod material;
mod targets;

use eightball_core::{
    BallConfig, BallError, Camera, Dispose, FrameOutput, MeshRole, ResourceArena, ResourceKind,
    SceneGraph, TextureSlot,
};
use environment::FrameUniforms;
use material::GpuMesh;
use targets::DepthTarget;
use web_sys as web;
use wgpu::util::DeviceExt;

/// Everything the arena can own for one mount.
pub(crate) enum GpuResource {
    Geometry {
        vertices: wgpu::Buffer,
        indices: wgpu::Buffer,
    },
    Buffer(wgpu::Buffer),
    Texture(wgpu::Texture),
}

impl Dispose for GpuResource {
    fn dispose(&mut self) {
        match self {
            GpuResource::Geometry { vertices, indices } => {
                vertices.destroy();
                indices.destroy();
            }
            GpuResource::Buffer(b) => b.destroy(),
            GpuResource::Texture(t) => t.destroy(),
        }
    }
}

fn graphics_err(what: &str, e: impl std::fmt::Debug) -> BallError {
    BallError::GraphicsContext(format!("{what}: {e:?}"))
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    view_format: wgpu::TextureFormat,

    sphere_pipeline: wgpu::RenderPipeline,
    decal_pipeline: wgpu::RenderPipeline,

    frame_uniforms: FrameUniforms,
    frame_uniform_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,

    meshes: Vec<GpuMesh>,
    glyph_texture: wgpu::Texture,
    prompt_texture: wgpu::Texture,
    depth: DepthTarget,
    arena: ResourceArena<GpuResource>,

    width: u32,
    height: u32,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        scene: &SceneGraph,
        ball: &BallConfig,
    ) -> Result<Self, BallError> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| graphics_err("create_surface", e))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| BallError::GraphicsContext("no WebGPU adapter".into()))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                    label: Some("eightball_device"),
                },
                None,
            )
            .await
            .map_err(|e| graphics_err("request_device", e))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| BallError::GraphicsContext("surface reports no formats".into()))?;
        let view_format = format.add_srgb_suffix();
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: if view_format != format {
                vec![view_format]
            } else {
                vec![]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let mut arena = ResourceArena::new();
        let sampler = helpers::linear_clamp_sampler(&device, "linear_sampler");

        // Face textures start blank; the glyph is drawn right after mount
        // and the prompt on the first frame.
        let (glyph_texture, glyph_view) = helpers::create_sampled_texture(
            &device,
            "glyph_texture",
            ball.glyph_texture_px,
            ball.glyph_texture_px,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        );
        arena.insert(
            ResourceKind::Texture,
            "glyph_texture",
            GpuResource::Texture(glyph_texture.clone()),
        );
        let (prompt_texture, prompt_view) = helpers::create_sampled_texture(
            &device,
            "prompt_texture",
            ball.prompt_texture_px,
            ball.prompt_texture_px,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        );
        arena.insert(
            ResourceKind::Texture,
            "prompt_texture",
            GpuResource::Texture(prompt_texture.clone()),
        );
        let (white_texture, white_view) = helpers::create_sampled_texture(
            &device,
            "white_texture",
            1,
            1,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        );
        helpers::write_rgba8(&queue, &white_texture, &[255, 255, 255, 255]);
        arena.insert(
            ResourceKind::Texture,
            "white_texture",
            GpuResource::Texture(white_texture),
        );
        let env_view = environment::upload_radiance(&device, &queue, &mut arena, &scene.environment);

        let camera = Camera::for_aspect(width as f32 / height as f32);
        let frame_uniforms = FrameUniforms::new(&camera, &scene.lights, &scene.environment);
        let frame_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("frame_uniforms"),
            contents: bytemuck::bytes_of(&frame_uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        arena.insert(
            ResourceKind::Uniforms,
            "frame_uniforms",
            GpuResource::Buffer(frame_uniform_buffer.clone()),
        );

        let frame_bgl = helpers::uniform_texture_layout(&device, "frame_bgl");
        let mesh_bgl = helpers::uniform_texture_layout(&device, "mesh_bgl");
        let frame_bind_group = helpers::uniform_texture_bind_group(
            &device,
            "frame_bg",
            &frame_bgl,
            &frame_uniform_buffer,
            &env_view,
            &sampler,
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ball_shader"),
            source: wgpu::ShaderSource::Wgsl(eightball_core::BALL_WGSL.into()),
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ball_pl"),
            bind_group_layouts: &[&frame_bgl, &mesh_bgl],
            push_constant_ranges: &[],
        });
        let sphere_pipeline = helpers::make_mesh_pipeline(
            &device,
            &layout,
            &shader,
            &helpers::MeshPipelineDesc {
                label: "sphere_pipeline",
                color_format: view_format,
                blend: Some(wgpu::BlendState::REPLACE),
                depth_write: true,
                depth_compare: wgpu::CompareFunction::Less,
                depth_bias: wgpu::DepthBiasState::default(),
            },
        );
        // Decals sit exactly on the sphere surface; a negative bias keeps
        // them in front without writing depth.
        let decal_pipeline = helpers::make_mesh_pipeline(
            &device,
            &layout,
            &shader,
            &helpers::MeshPipelineDesc {
                label: "decal_pipeline",
                color_format: view_format,
                blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                depth_write: false,
                depth_compare: wgpu::CompareFunction::LessEqual,
                depth_bias: wgpu::DepthBiasState {
                    constant: -4,
                    slope_scale: -1.0,
                    clamp: 0.0,
                },
            },
        );

        let mut meshes = Vec::with_capacity(scene.meshes.len());
        for mesh in &scene.meshes {
            let view = match mesh.material.map {
                Some(TextureSlot::Glyph) => &glyph_view,
                Some(TextureSlot::Prompt) => &prompt_view,
                None => &white_view,
            };
            meshes.push(GpuMesh::upload(
                &device, &mut arena, &mesh_bgl, mesh, view, &sampler,
            ));
        }

        let depth = DepthTarget::new(&device, &mut arena, width, height);
        log::info!(
            "gpu ready: {}x{} {:?} alpha {:?}, {} resources",
            width,
            height,
            view_format,
            alpha_mode,
            arena.live_count()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            view_format,
            sphere_pipeline,
            decal_pipeline,
            frame_uniforms,
            frame_uniform_buffer,
            frame_bind_group,
            meshes,
            glyph_texture,
            prompt_texture,
            depth,
            arena,
            width,
            height,
        })
    }

    /// Replaces the pixels of one face texture.
    pub fn upload_face(&self, slot: TextureSlot, rgba: &[u8]) {
        let texture = match slot {
            TextureSlot::Glyph => &self.glyph_texture,
            TextureSlot::Prompt => &self.prompt_texture,
        };
        helpers::write_rgba8(&self.queue, texture, rgba);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth
                .recreate(&self.device, &mut self.arena, width, height);

            let camera = Camera::for_aspect(width as f32 / height as f32);
            self.frame_uniforms.set_camera(&camera);
            self.queue.write_buffer(
                &self.frame_uniform_buffer,
                0,
                bytemuck::bytes_of(&self.frame_uniforms),
            );
            log::debug!("surface resized to {}x{}", width, height);
        }
    }

    /// Reconfigures after the surface reports it was lost or outdated.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, out: &FrameOutput) -> Result<(), wgpu::SurfaceError> {
        for mesh in &self.meshes {
            let opacity = match mesh.role {
                MeshRole::Sphere => mesh.material.opacity,
                MeshRole::GlyphDecal => out.glyph.opacity,
                MeshRole::PromptDecal => out.prompt.opacity,
            };
            mesh.write_uniforms(&self.queue, out.root, opacity);
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("ball_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.frame_bind_group, &[]);

            rpass.set_pipeline(&self.sphere_pipeline);
            for mesh in self.meshes.iter().filter(|m| m.role == MeshRole::Sphere) {
                mesh.draw(&mut rpass);
            }

            rpass.set_pipeline(&self.decal_pipeline);
            for mesh in &self.meshes {
                let visible = match mesh.role {
                    MeshRole::Sphere => false,
                    MeshRole::GlyphDecal => out.glyph.visible,
                    MeshRole::PromptDecal => out.prompt.visible,
                };
                if visible {
                    mesh.draw(&mut rpass);
                }
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Releases every GPU allocation of this mount, then the device.
    pub fn dispose(mut self) -> usize {
        log::debug!("releasing gpu resources: {:?}", self.arena.census());
        let released = self.arena.dispose_all();
        self.meshes.clear();
        self.device.destroy();
        released
    }
}
