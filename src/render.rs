//! GPU mirror of the scene graph and per-frame drawing.
//!
//! Every scene node is uploaded once; afterwards only its instance matrix is
//! rewritten each frame. Nodes removed from the scene drop their buffers on the
//! next [`Renderer::sync`]. Drawing happens in four batches: opaque triangles,
//! wireframe lines, blended triangles (without depth writes), then points.

use std::collections::HashMap;

use wgpu::util::DeviceExt;

use crate::{
    context::Context,
    data_structures::{
        mesh::{MaterialKind, MeshVertex},
        scene_graph::{MeshId, SceneGraph, SceneNode},
    },
};

/// Vertex, index and instance buffers of one scene node.
#[derive(Debug)]
pub struct GpuMesh {
    vertex: wgpu::Buffer,
    index: wgpu::Buffer,
    instance: wgpu::Buffer,
    amount: u32,
    kind: MaterialKind,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, id: MeshId, node: &SceneNode) -> Self {
        let vertices = MeshVertex::bake(&node.mesh, &node.material);
        let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Mesh {} Vertex Buffer", id.raw())),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Mesh {} Index Buffer", id.raw())),
            contents: bytemuck::cast_slice(&node.mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instance = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Mesh {} Instance Buffer", id.raw())),
            contents: bytemuck::cast_slice(&[node.transform.to_raw()]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        Self {
            vertex,
            index,
            instance,
            amount: node.mesh.indices.len() as u32,
            kind: node.material.kind,
        }
    }
}

/// Which pipeline a material is drawn with, in draw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Pass {
    Opaque,
    Lines,
    Blended,
    Points,
}

impl From<MaterialKind> for Pass {
    fn from(kind: MaterialKind) -> Self {
        match kind {
            MaterialKind::Opaque => Pass::Opaque,
            MaterialKind::Wireframe => Pass::Lines,
            MaterialKind::Shell | MaterialKind::Translucent => Pass::Blended,
            MaterialKind::Points => Pass::Points,
        }
    }
}

#[derive(Debug, Default)]
pub struct Renderer {
    /// `None` marks a node with nothing to draw, so it is not uploaded again.
    meshes: HashMap<MeshId, Option<GpuMesh>>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings GPU state in line with `scene`: frees removed nodes, uploads new
    /// ones and rewrites every instance matrix.
    pub fn sync(&mut self, ctx: &Context, scene: &mut SceneGraph) {
        for id in scene.drain_removed() {
            self.meshes.remove(&id);
        }
        for (id, node) in scene.iter() {
            let gpu = self.meshes.entry(id).or_insert_with(|| {
                (!node.mesh.is_empty()).then(|| GpuMesh::upload(&ctx.device, id, node))
            });
            if let Some(gpu) = gpu {
                ctx.queue
                    .write_buffer(&gpu.instance, 0, bytemuck::cast_slice(&[node.transform.to_raw()]));
            }
        }
    }

    pub fn draw(&self, ctx: &Context) -> Result<(), wgpu::SurfaceError> {
        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            render_pass.set_bind_group(0, &ctx.camera.bind_group, &[]);
            let mut batches: Vec<(Pass, &GpuMesh)> = self
                .meshes
                .values()
                .flatten()
                .map(|gpu| (Pass::from(gpu.kind), gpu))
                .collect();
            batches.sort_by_key(|(pass, _)| *pass);

            let mut current = None;
            for (pass, gpu) in batches {
                if current != Some(pass) {
                    render_pass.set_pipeline(match pass {
                        Pass::Opaque => &ctx.pipelines.opaque,
                        Pass::Lines => &ctx.pipelines.lines,
                        Pass::Blended => &ctx.pipelines.translucent,
                        Pass::Points => &ctx.pipelines.points,
                    });
                    current = Some(pass);
                }
                render_pass.set_vertex_buffer(0, gpu.vertex.slice(..));
                render_pass.set_vertex_buffer(1, gpu.instance.slice(..));
                render_pass.set_index_buffer(gpu.index.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..gpu.amount, 0, 0..1);
            }
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
