//! Render pipelines, one per draw pass.
//!
//! All passes share the unlit vertex-colour shader and the camera bind group;
//! they differ in primitive topology, blending and depth writes.

use crate::data_structures::{
    instance::InstanceRaw,
    mesh::{MeshVertex, Topology, Vertex},
    texture::DepthTexture,
};

#[derive(Debug)]
pub struct Pipelines {
    pub opaque: wgpu::RenderPipeline,
    pub translucent: wgpu::RenderPipeline,
    pub lines: wgpu::RenderPipeline,
    pub points: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Skyline Pipeline Layout"),
            bind_group_layouts: &[camera_bind_group_layout],
            immediate_size: 0,
        });
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Skyline Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("skyline.wgsl").into()),
        });
        let mk = |label, topology, blend, depth_write| {
            mk_render_pipeline(
                device,
                &layout,
                &shader,
                PassState {
                    label,
                    color_format: config.format,
                    topology,
                    blend,
                    depth_write,
                },
            )
        };

        Self {
            opaque: mk("Opaque Pipeline", Topology::Triangles, None, true),
            translucent: mk(
                "Translucent Pipeline",
                Topology::Triangles,
                Some(wgpu::BlendState::ALPHA_BLENDING),
                false,
            ),
            lines: mk(
                "Wireframe Pipeline",
                Topology::Lines,
                Some(wgpu::BlendState::ALPHA_BLENDING),
                true,
            ),
            points: mk(
                "Points Pipeline",
                Topology::Points,
                Some(wgpu::BlendState::ALPHA_BLENDING),
                false,
            ),
        }
    }
}

pub struct PassState {
    pub label: &'static str,
    pub color_format: wgpu::TextureFormat,
    pub topology: Topology,
    pub blend: Option<wgpu::BlendState>,
    pub depth_write: bool,
}

fn primitive_topology(topology: Topology) -> wgpu::PrimitiveTopology {
    match topology {
        Topology::Triangles => wgpu::PrimitiveTopology::TriangleList,
        Topology::Lines => wgpu::PrimitiveTopology::LineList,
        Topology::Points => wgpu::PrimitiveTopology::PointList,
    }
}

pub fn mk_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    state: PassState,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some(state.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[MeshVertex::desc(), InstanceRaw::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: state.color_format,
                blend: state.blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: primitive_topology(state.topology),
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Facet winding depends on the face, so nothing is culled.
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DepthTexture::DEPTH_FORMAT,
            depth_write_enabled: state.depth_write,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview_mask: None,
    })
}
