use super::{helpers, GpuResource};
use eightball_core::environment::EnvironmentBake;
use eightball_core::{Camera, LightRig, ResourceArena, ResourceKind};

const SPECULAR_ENV_INTENSITY: f32 = 1.0;
const DIFFUSE_ENV_INTENSITY: f32 = 1.0;

/// Per-frame uniforms shared by every draw; layout matches `Frame` in
/// ball.wgsl.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    light_dirs: [[f32; 4]; 3],
    light_colors: [[f32; 4]; 3],
    sh: [[f32; 4]; 9],
    env: [f32; 4],
}

impl FrameUniforms {
    pub(crate) fn new(camera: &Camera, lights: &LightRig, env: &EnvironmentBake) -> Self {
        let directional = lights.directional();
        let mut light_dirs = [[0.0; 4]; 3];
        let mut light_colors = [[0.0; 4]; 3];
        for (i, light) in directional.iter().enumerate() {
            light_dirs[i] = light.direction().extend(0.0).to_array();
            light_colors[i] = light.radiance().extend(1.0).to_array();
        }
        let mut sh = [[0.0; 4]; 9];
        for (dst, c) in sh.iter_mut().zip(env.irradiance_sh.iter()) {
            *dst = c.extend(0.0).to_array();
        }
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            camera_pos: camera.eye.extend(1.0).to_array(),
            ambient: lights.ambient.extend(1.0).to_array(),
            light_dirs,
            light_colors,
            sh,
            env: [SPECULAR_ENV_INTENSITY, DIFFUSE_ENV_INTENSITY, 0.0, 0.0],
        }
    }

    pub(crate) fn set_camera(&mut self, camera: &Camera) {
        self.view_proj = camera.view_proj().to_cols_array_2d();
        self.camera_pos = camera.eye.extend(1.0).to_array();
    }
}

/// Uploads the baked equirect radiance. Texels are stored linear; the
/// shader undoes the Reinhard encoding.
pub(crate) fn upload_radiance(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    arena: &mut ResourceArena<GpuResource>,
    env: &EnvironmentBake,
) -> wgpu::TextureView {
    let (tex, view) = helpers::create_sampled_texture(
        device,
        "environment",
        env.radiance_width,
        env.radiance_height,
        wgpu::TextureFormat::Rgba8Unorm,
    );
    helpers::write_rgba8(queue, &tex, &env.radiance_rgba8);
    arena.insert(ResourceKind::Texture, "environment", GpuResource::Texture(tex));
    view
}
