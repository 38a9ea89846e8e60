use super::helpers::{self, DEPTH_FORMAT};
use candy_core::{ShaderKind, Side};
use fnv::FnvHashMap;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneVertex {
    pub(crate) pos: [f32; 3],
    pub(crate) nrm: [f32; 3],
    pub(crate) uv: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct RibbonVertex {
    pub(crate) pos: [f32; 3],
    pub(crate) uv: [f32; 2],
}

const SCENE_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];
const RIBBON_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

fn scene_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<SceneVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &SCENE_ATTRS,
    }
}

fn ribbon_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<RibbonVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &RIBBON_ATTRS,
    }
}

pub(crate) fn uniform_layout(
    device: &wgpu::Device,
    label: &str,
    dynamic: bool,
    min_size: u64,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: dynamic,
                min_binding_size: wgpu::BufferSize::new(min_size),
            },
            count: None,
        }],
    })
}

pub(crate) fn texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_tex_bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

/// Fixed-function state for one material kind.
struct KindState {
    vs: &'static str,
    fs: &'static str,
    cull: Option<wgpu::Face>,
    depth_write: bool,
}

fn kind_state(kind: ShaderKind) -> KindState {
    match kind {
        ShaderKind::Candy => KindState {
            vs: "vs_main",
            fs: "fs_candy",
            cull: None,
            depth_write: true,
        },
        ShaderKind::Wrapper(side) => KindState {
            vs: "vs_main",
            fs: "fs_wrapper",
            cull: match side {
                Side::Back => Some(wgpu::Face::Front),
                Side::Front => Some(wgpu::Face::Back),
                Side::Double => None,
            },
            depth_write: false,
        },
        ShaderKind::Bubble => KindState {
            vs: "vs_bubble",
            fs: "fs_bubble",
            cull: None,
            depth_write: false,
        },
        ShaderKind::Basic => KindState {
            vs: "vs_main",
            fs: "fs_basic",
            cull: None,
            depth_write: true,
        },
    }
}

pub(crate) const ALL_KINDS: [ShaderKind; 6] = [
    ShaderKind::Candy,
    ShaderKind::Wrapper(Side::Back),
    ShaderKind::Wrapper(Side::Front),
    ShaderKind::Wrapper(Side::Double),
    ShaderKind::Bubble,
    ShaderKind::Basic,
];

pub(crate) fn build_scene_pipelines(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
) -> FnvHashMap<ShaderKind, wgpu::RenderPipeline> {
    let mut out = FnvHashMap::default();
    for kind in ALL_KINDS {
        let st = kind_state(kind);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(st.fs),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(st.vs),
                buffers: &[scene_vertex_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: st.cull,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: st.depth_write,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(st.fs),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: helpers::alpha_blend(),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        out.insert(kind, pipeline);
    }
    out
}

pub(crate) fn build_ribbon_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("ribbon_pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_ribbon"),
            buffers: &[ribbon_vertex_layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::Always,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_ribbon"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: helpers::additive_blend(),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}
