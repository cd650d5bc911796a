//! CPU-side geometry and materials.
//!
//! A [`Mesh`] is plain positions plus indices; the renderer bakes the owning
//! node's [`Material`] colour into [`MeshVertex`] when it uploads the mesh.

/// Describes how the bytes of a GPU vertex buffer map to shader inputs.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topology {
    Triangles,
    Lines,
    Points,
}

impl Topology {
    /// Number of indices per primitive.
    pub fn arity(self) -> usize {
        match self {
            Topology::Triangles => 3,
            Topology::Lines => 2,
            Topology::Points => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl Mesh {
    pub fn empty(topology: Topology) -> Self {
        Self {
            positions: Vec::new(),
            indices: Vec::new(),
            topology,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn primitive_count(&self) -> usize {
        self.indices.len() / self.topology.arity()
    }

    /// A point list drawing every position once.
    pub fn points(positions: Vec<[f32; 3]>) -> Self {
        let indices = (0..positions.len() as u32).collect();
        Self {
            positions,
            indices,
            topology: Topology::Points,
        }
    }

    /// Closed axis-aligned box spanning `min..max`, 12 triangles.
    pub fn cuboid(min: [f32; 3], max: [f32; 3]) -> Self {
        const TRIANGLES: [u32; 36] = [
            0, 1, 2, 0, 2, 3, // back (-z)
            4, 6, 5, 4, 7, 6, // front (+z)
            0, 4, 5, 0, 5, 1, // bottom (-y)
            3, 2, 6, 3, 6, 7, // top (+y)
            0, 3, 7, 0, 7, 4, // left (-x)
            1, 5, 6, 1, 6, 2, // right (+x)
        ];
        Self {
            positions: cuboid_corners(min, max).to_vec(),
            indices: TRIANGLES.to_vec(),
            topology: Topology::Triangles,
        }
    }

    /// The 12 edges of an axis-aligned box as a line list.
    pub fn cuboid_edges(min: [f32; 3], max: [f32; 3]) -> Self {
        const EDGES: [u32; 24] = [
            0, 1, 1, 2, 2, 3, 3, 0, // back ring
            4, 5, 5, 6, 6, 7, 7, 4, // front ring
            0, 4, 1, 5, 2, 6, 3, 7, // struts
        ];
        Self {
            positions: cuboid_corners(min, max).to_vec(),
            indices: EDGES.to_vec(),
            topology: Topology::Lines,
        }
    }

    /// One quad in the z = `z` plane, wound towards +z.
    pub fn quad(min: [f32; 2], max: [f32; 2], z: f32) -> Self {
        Self {
            positions: vec![
                [min[0], min[1], z],
                [max[0], min[1], z],
                [max[0], max[1], z],
                [min[0], max[1], z],
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
            topology: Topology::Triangles,
        }
    }

    /// Appends `other`, rebasing its indices. Both meshes must share a topology.
    pub fn append(&mut self, other: &Mesh) {
        debug_assert_eq!(self.topology, other.topology);
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    pub fn translate(&mut self, offset: [f32; 3]) {
        for p in &mut self.positions {
            p[0] += offset[0];
            p[1] += offset[1];
            p[2] += offset[2];
        }
    }

    /// Axis-aligned bounds of all positions, `None` for a mesh without positions.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(mut lo, mut hi), p| {
            for axis in 0..3 {
                lo[axis] = lo[axis].min(p[axis]);
                hi[axis] = hi[axis].max(p[axis]);
            }
            (lo, hi)
        }))
    }
}

fn cuboid_corners(min: [f32; 3], max: [f32; 3]) -> [[f32; 3]; 8] {
    [
        [min[0], min[1], min[2]],
        [max[0], min[1], min[2]],
        [max[0], max[1], min[2]],
        [min[0], max[1], min[2]],
        [min[0], min[1], max[2]],
        [max[0], min[1], max[2]],
        [max[0], max[1], max[2]],
        [min[0], max[1], max[2]],
    ]
}

/// Which pass draws a mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    Opaque,
    /// Triangulated facet lattice.
    Shell,
    Translucent,
    Wireframe,
    Points,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub kind: MaterialKind,
    pub colour: [f32; 4],
}

impl Material {
    pub fn new(kind: MaterialKind, colour: [f32; 4]) -> Self {
        Self { kind, colour }
    }
}

/**
 * The vertex as uploaded to the GPU: position plus the material colour.
 */
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub colour: [f32; 4],
}

impl MeshVertex {
    pub fn bake(mesh: &Mesh, material: &Material) -> Vec<MeshVertex> {
        mesh.positions
            .iter()
            .map(|&position| MeshVertex {
                position,
                colour: material.colour,
            })
            .collect()
    }
}

impl Vertex for MeshVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_rebases_indices() {
        let mut a = Mesh::quad([0.0, 0.0], [1.0, 1.0], 0.0);
        let b = Mesh::quad([2.0, 0.0], [3.0, 1.0], 0.0);
        a.append(&b);
        assert_eq!(a.positions.len(), 8);
        assert_eq!(&a.indices[6..], &[4, 5, 6, 4, 6, 7]);
        assert_eq!(a.primitive_count(), 4);
    }

    #[test]
    fn cuboid_bounds_match_corners() {
        let mesh = Mesh::cuboid([-1.0, -2.0, -3.0], [1.0, 2.0, 3.0]);
        assert_eq!(mesh.bounds(), Some(([-1.0, -2.0, -3.0], [1.0, 2.0, 3.0])));
        assert_eq!(mesh.primitive_count(), 12);
        assert_eq!(Mesh::cuboid_edges([0.0; 3], [1.0; 3]).primitive_count(), 12);
    }

    #[test]
    fn empty_mesh_has_no_bounds() {
        assert!(Mesh::empty(Topology::Triangles).bounds().is_none());
        assert!(Mesh::points(Vec::new()).is_empty());
    }
}
