use super::helpers;

/// Size-dependent render targets.
///
/// - `scene_*` receives the offscreen pass (refractive subtrees hidden) and is
///   sampled by wrapper and bubble materials in the on-screen pass.
/// - `depth_*` is shared by both passes; each pass clears it.
pub(crate) struct RenderTargets {
    pub(crate) scene_tex: wgpu::Texture,
    pub(crate) scene_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let (scene_tex, scene_view) = scene_color(device, format, width, height);
        let (depth_tex, depth_view) = helpers::create_depth_texture(device, width, height);
        Self {
            scene_tex,
            scene_view,
            depth_tex,
            depth_view,
        }
    }

    pub(crate) fn recreate(
        &mut self,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) {
        (self.scene_tex, self.scene_view) = scene_color(device, format, width, height);
        (self.depth_tex, self.depth_view) = helpers::create_depth_texture(device, width, height);
    }
}

fn scene_color(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    helpers::create_color_texture(
        device,
        "scene_tex",
        width,
        height,
        format,
        wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
    )
}
