use crate::constants::{CLEAR_COLOR, MAX_DRAWS_PER_PASS, OBJECT_UNIFORM_STRIDE, RIBBON_MAX_VERTICES};
use candy_core::{Camera, DrawItem, FramePlan, MaterialBlock, Scene, ShaderKind, StripMesh};
use fnv::FnvHashMap;
use web_sys as web;

mod helpers;
mod meshes;
mod pipelines;
mod targets;

use meshes::MeshCache;
use pipelines::RibbonVertex;
use targets::RenderTargets;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    camera_time: [f32; 4],
    resolution: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ObjectUniform {
    model: [[f32; 4]; 4],
    material: MaterialBlock,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct RibbonUniform {
    view_proj: [[f32; 4]; 4],
    color: [f32; 4],
}

/// Cursor ribbon to draw on top of the scene: geometry plus rgb/opacity.
pub struct RibbonDraw<'r> {
    pub mesh: &'r StripMesh,
    pub color: [f32; 4],
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    pipelines: FnvHashMap<ShaderKind, wgpu::RenderPipeline>,
    globals_buffer: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    object_buffer: wgpu::Buffer,
    object_bg: wgpu::BindGroup,

    texture_bgl: wgpu::BindGroupLayout,
    linear_sampler: wgpu::Sampler,
    // Bound in the offscreen pass, where nothing samples the scene color.
    _dummy_tex: wgpu::Texture,
    bg_dummy: wgpu::BindGroup,
    bg_scene: wgpu::BindGroup,
    targets: RenderTargets,

    ribbon_pipeline: wgpu::RenderPipeline,
    ribbon_uniform: wgpu::Buffer,
    ribbon_bg: wgpu::BindGroup,
    ribbon_vb: wgpu::Buffer,
    ribbon_ib: wgpu::Buffer,

    meshes: MeshCache,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene.wgsl"),
            source: wgpu::ShaderSource::Wgsl(candy_core::SCENE_WGSL.into()),
        });
        let ribbon_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ribbon.wgsl"),
            source: wgpu::ShaderSource::Wgsl(candy_core::RIBBON_WGSL.into()),
        });

        let globals_size = std::mem::size_of::<Globals>() as u64;
        let object_size = std::mem::size_of::<ObjectUniform>() as u64;
        let globals_bgl = pipelines::uniform_layout(&device, "globals_bgl", false, globals_size);
        let object_bgl = pipelines::uniform_layout(&device, "object_bgl", true, object_size);
        let texture_bgl = pipelines::texture_layout(&device);

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: globals_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        // Two halves: offscreen draws, then on-screen draws.
        let object_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("objects"),
            size: OBJECT_UNIFORM_STRIDE * MAX_DRAWS_PER_PASS * 2,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let object_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bg"),
            layout: &object_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &object_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(object_size),
                }),
            }],
        });

        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let targets = RenderTargets::new(&device, format, width, height);
        let (dummy_tex, dummy_view) = helpers::create_color_texture(
            &device,
            "dummy_tex",
            1,
            1,
            format,
            wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let bg_dummy =
            helpers::texture_bind_group(&device, "bg_dummy", &texture_bgl, &dummy_view, &linear_sampler);
        let bg_scene = helpers::texture_bind_group(
            &device,
            "bg_scene",
            &texture_bgl,
            &targets.scene_view,
            &linear_sampler,
        );

        let scene_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_layout"),
            bind_group_layouts: &[&globals_bgl, &object_bgl, &texture_bgl],
            push_constant_ranges: &[],
        });
        let pipelines = pipelines::build_scene_pipelines(&device, &scene_layout, &scene_shader, format);

        let ribbon_size = std::mem::size_of::<RibbonUniform>() as u64;
        let ribbon_bgl = pipelines::uniform_layout(&device, "ribbon_bgl", false, ribbon_size);
        let ribbon_uniform = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ribbon_uniform"),
            size: ribbon_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let ribbon_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ribbon_bg"),
            layout: &ribbon_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ribbon_uniform.as_entire_binding(),
            }],
        });
        let ribbon_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ribbon_layout"),
            bind_group_layouts: &[&ribbon_bgl],
            push_constant_ranges: &[],
        });
        let ribbon_pipeline =
            pipelines::build_ribbon_pipeline(&device, &ribbon_layout, &ribbon_shader, format);
        let ribbon_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ribbon_vb"),
            size: RIBBON_MAX_VERTICES * std::mem::size_of::<RibbonVertex>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let ribbon_ib = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ribbon_ib"),
            size: RIBBON_MAX_VERTICES * 3 * std::mem::size_of::<u32>() as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        log::info!("[gpu] ready {}x{} {:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipelines,
            globals_buffer,
            globals_bg,
            object_buffer,
            object_bg,
            texture_bgl,
            linear_sampler,
            _dummy_tex: dummy_tex,
            bg_dummy,
            bg_scene,
            targets,
            ribbon_pipeline,
            ribbon_uniform,
            ribbon_bg,
            ribbon_vb,
            ribbon_ib,
            meshes: MeshCache::default(),
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: CLEAR_COLOR[3],
            },
        })
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

            self.targets
                .recreate(&self.device, self.config.format, width, height);
            self.bg_scene = helpers::texture_bind_group(
                &self.device,
                "bg_scene",
                &self.texture_bgl,
                &self.targets.scene_view,
                &self.linear_sampler,
            );
        }
    }

    /// Reconfigure after a lost or outdated surface.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Execute one frame plan: the optional offscreen pass into the scene
    /// color target, then the on-screen pass, then the ribbon on top.
    pub fn render(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        plan: &FramePlan,
        time: f32,
        ribbon: Option<RibbonDraw<'_>>,
    ) -> Result<(), wgpu::SurfaceError> {
        let view_proj = camera.view_proj().to_cols_array_2d();
        let globals = Globals {
            view_proj,
            camera_time: [camera.position.x, camera.position.y, camera.position.z, time],
            resolution: [self.width as f32, self.height as f32, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let offscreen = plan.offscreen.as_deref().map(|items| self.prepare(scene, items, 0));
        let onscreen = self.prepare(scene, &plan.onscreen, MAX_DRAWS_PER_PASS);
        let ribbon_indices = ribbon.and_then(|r| self.prepare_ribbon(view_proj, r));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        if let Some(items) = &offscreen {
            let mut rpass = self.begin_pass(&mut encoder, "offscreen_pass", &self.targets.scene_view);
            self.draw_items(&mut rpass, items, 0, &self.bg_dummy);
        }
        {
            let scene_bg = if offscreen.is_some() {
                &self.bg_scene
            } else {
                &self.bg_dummy
            };
            let mut rpass = self.begin_pass(&mut encoder, "onscreen_pass", &view);
            self.draw_items(&mut rpass, &onscreen, MAX_DRAWS_PER_PASS, scene_bg);
            if let Some(count) = ribbon_indices {
                rpass.set_pipeline(&self.ribbon_pipeline);
                rpass.set_bind_group(0, &self.ribbon_bg, &[]);
                rpass.set_vertex_buffer(0, self.ribbon_vb.slice(..));
                rpass.set_index_buffer(self.ribbon_ib.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..count, 0, 0..1);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Upload meshes and per-object uniforms for one pass, starting at uniform
    /// slot `base`. Returns the items that will actually be drawn.
    fn prepare(&mut self, scene: &Scene, items: &[DrawItem], base: u64) -> Vec<DrawItem> {
        let mut drawn: Vec<DrawItem> = items
            .iter()
            .filter(|d| self.meshes.ensure(&self.device, scene, d.mesh))
            .copied()
            .collect();
        if drawn.len() as u64 > MAX_DRAWS_PER_PASS {
            log::warn!("[gpu] {} draws exceed pass capacity, truncating", drawn.len());
            drawn.truncate(MAX_DRAWS_PER_PASS as usize);
        }
        if drawn.is_empty() {
            return drawn;
        }
        let stride = OBJECT_UNIFORM_STRIDE as usize;
        let mut bytes = vec![0u8; drawn.len() * stride];
        for (i, d) in drawn.iter().enumerate() {
            let obj = ObjectUniform {
                model: d.world.to_cols_array_2d(),
                material: d.material.block(),
            };
            let raw = bytemuck::bytes_of(&obj);
            bytes[i * stride..i * stride + raw.len()].copy_from_slice(raw);
        }
        self.queue
            .write_buffer(&self.object_buffer, base * OBJECT_UNIFORM_STRIDE, &bytes);
        drawn
    }

    fn prepare_ribbon(&mut self, view_proj: [[f32; 4]; 4], ribbon: RibbonDraw<'_>) -> Option<u32> {
        let mesh = ribbon.mesh;
        if mesh.is_empty() || mesh.indices.is_empty() {
            return None;
        }
        if mesh.vertex_count() as u64 > RIBBON_MAX_VERTICES {
            log::warn!("[gpu] ribbon has {} vertices, skipping", mesh.vertex_count());
            return None;
        }
        let vertices: Vec<RibbonVertex> = mesh
            .positions
            .iter()
            .zip(mesh.uvs.iter())
            .map(|(p, uv)| RibbonVertex { pos: *p, uv: *uv })
            .collect();
        let uniform = RibbonUniform {
            view_proj,
            color: ribbon.color,
        };
        self.queue
            .write_buffer(&self.ribbon_uniform, 0, bytemuck::bytes_of(&uniform));
        self.queue
            .write_buffer(&self.ribbon_vb, 0, bytemuck::cast_slice(&vertices));
        self.queue
            .write_buffer(&self.ribbon_ib, 0, bytemuck::cast_slice(&mesh.indices));
        Some(mesh.indices.len() as u32)
    }

    fn begin_pass<'e>(
        &self,
        encoder: &'e mut wgpu::CommandEncoder,
        label: &str,
        target: &wgpu::TextureView,
    ) -> wgpu::RenderPass<'e> {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.targets.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        })
    }

    fn draw_items(
        &self,
        rpass: &mut wgpu::RenderPass<'_>,
        items: &[DrawItem],
        base: u64,
        scene_bg: &wgpu::BindGroup,
    ) {
        rpass.set_bind_group(0, &self.globals_bg, &[]);
        rpass.set_bind_group(2, scene_bg, &[]);
        let mut current: Option<ShaderKind> = None;
        for (i, d) in items.iter().enumerate() {
            let Some(mesh) = self.meshes.get(d.mesh) else {
                continue;
            };
            let kind = d.material.shader_kind();
            if current != Some(kind) {
                let Some(pipeline) = self.pipelines.get(&kind) else {
                    continue;
                };
                rpass.set_pipeline(pipeline);
                current = Some(kind);
            }
            let offset = ((base + i as u64) * OBJECT_UNIFORM_STRIDE) as u32;
            rpass.set_bind_group(1, &self.object_bg, &[offset]);
            rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }
}
