use super::{helpers, GpuResource};
use eightball_core::{MeshRole, PbrMaterial, ResourceArena, ResourceKind, SceneMesh};
use glam::Mat4;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MeshUniforms {
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    base_color: [f32; 4],
    pbr: [f32; 4],
}

impl MeshUniforms {
    pub(crate) fn new(model: Mat4, material: &PbrMaterial, opacity: f32) -> Self {
        let normal = model.inverse().transpose();
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: normal.to_cols_array_2d(),
            base_color: material.base_color.extend(opacity.clamp(0.0, 1.0)).to_array(),
            pbr: [
                material.roughness,
                material.metalness,
                material.clearcoat,
                material.clearcoat_roughness,
            ],
        }
    }
}

fn labels(role: MeshRole) -> (&'static str, &'static str) {
    match role {
        MeshRole::Sphere => ("sphere_geometry", "sphere_material"),
        MeshRole::GlyphDecal => ("glyph_decal_geometry", "glyph_decal_material"),
        MeshRole::PromptDecal => ("prompt_decal_geometry", "prompt_decal_material"),
    }
}

/// One scene mesh on the GPU: geometry, its material uniforms and the bind
/// group tying those to a face texture.
pub(crate) struct GpuMesh {
    pub(crate) role: MeshRole,
    pub(crate) material: PbrMaterial,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl GpuMesh {
    pub(crate) fn upload(
        device: &wgpu::Device,
        arena: &mut ResourceArena<GpuResource>,
        layout: &wgpu::BindGroupLayout,
        mesh: &SceneMesh,
        texture_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let (geometry_label, material_label) = labels(mesh.role);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(geometry_label),
            contents: bytemuck::cast_slice(&mesh.geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(geometry_label),
            contents: bytemuck::cast_slice(&mesh.geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        arena.insert(
            ResourceKind::Geometry,
            geometry_label,
            GpuResource::Geometry {
                vertices: vertex_buffer.clone(),
                indices: index_buffer.clone(),
            },
        );

        let initial = MeshUniforms::new(Mat4::IDENTITY, &mesh.material, mesh.material.opacity);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(material_label),
            contents: bytemuck::bytes_of(&initial),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        arena.insert(
            ResourceKind::Material,
            material_label,
            GpuResource::Buffer(uniform_buffer.clone()),
        );
        let bind_group = helpers::uniform_texture_bind_group(
            device,
            material_label,
            layout,
            &uniform_buffer,
            texture_view,
            sampler,
        );

        Self {
            role: mesh.role,
            material: mesh.material,
            vertex_buffer,
            index_buffer,
            index_count: mesh.geometry.indices.len() as u32,
            uniform_buffer,
            bind_group,
        }
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, model: Mat4, opacity: f32) {
        let u = MeshUniforms::new(model, &self.material, opacity);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.index_count == 0 {
            return;
        }
        rpass.set_bind_group(1, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
