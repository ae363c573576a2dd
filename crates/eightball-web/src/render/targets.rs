use super::{helpers, GpuResource};
use eightball_core::{ResourceArena, ResourceId, ResourceKind};

/// Depth attachment sized to the surface.
///
/// The texture itself lives in the mount's arena; resizing swaps it in
/// place so the old allocation is released immediately.
pub(crate) struct DepthTarget {
    id: ResourceId,
    pub(crate) view: wgpu::TextureView,
}

impl DepthTarget {
    pub(crate) fn new(
        device: &wgpu::Device,
        arena: &mut ResourceArena<GpuResource>,
        width: u32,
        height: u32,
    ) -> Self {
        let (tex, view) = helpers::create_depth_texture(device, width, height);
        let id = arena.insert(ResourceKind::RenderTarget, "depth", GpuResource::Texture(tex));
        Self { id, view }
    }

    pub(crate) fn recreate(
        &mut self,
        device: &wgpu::Device,
        arena: &mut ResourceArena<GpuResource>,
        width: u32,
        height: u32,
    ) {
        let (tex, view) = helpers::create_depth_texture(device, width, height);
        if arena.replace(self.id, GpuResource::Texture(tex)) {
            self.view = view;
        } else {
            log::warn!("depth target no longer live; resize skipped");
        }
    }
}
