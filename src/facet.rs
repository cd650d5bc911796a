//! Facet meshes: the six triangulated faces of a building box.
//!
//! Each face is sampled as a regular grid whose density follows the face's
//! in-plane extent (`ceil(extent * points_per_unit)` subdivisions per axis).
//! The grid is triangulated in its own 2D plane and the triangle indices are
//! mapped back onto the 3D sample points. All coordinates are local to the box
//! centre.

use crate::{
    data_structures::mesh::{Mesh, Topology},
    triangulate::triangulate,
};

/// Width (x), height (y) and depth (z) of a box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxDims {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl BoxDims {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn half_extents(&self) -> [f32; 3] {
        [self.width / 2.0, self.height / 2.0, self.depth / 2.0]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
        Face::Top,
        Face::Bottom,
    ];

    /// The two in-plane extents `(u, v)` of this face.
    pub fn in_plane(self, dims: BoxDims) -> (f32, f32) {
        match self {
            Face::Front | Face::Back => (dims.width, dims.height),
            Face::Left | Face::Right => (dims.depth, dims.height),
            Face::Top | Face::Bottom => (dims.width, dims.depth),
        }
    }

    /// Maps in-plane offsets (`0..=u`, `0..=v`) onto the face plane.
    fn place(self, dims: BoxDims, u: f32, v: f32) -> [f32; 3] {
        let [hw, hh, hd] = dims.half_extents();
        match self {
            Face::Front => [u - hw, v - hh, hd],
            Face::Back => [u - hw, v - hh, -hd],
            Face::Left => [-hw, v - hh, u - hd],
            Face::Right => [hw, v - hh, u - hd],
            Face::Top => [u - hw, hh, v - hd],
            Face::Bottom => [u - hw, -hh, v - hd],
        }
    }

    /// Axis (0 = x, 1 = y, 2 = z) and coordinate of the face plane.
    pub fn plane(self, dims: BoxDims) -> (usize, f32) {
        let [hw, hh, hd] = dims.half_extents();
        match self {
            Face::Front => (2, hd),
            Face::Back => (2, -hd),
            Face::Left => (0, -hw),
            Face::Right => (0, hw),
            Face::Top => (1, hh),
            Face::Bottom => (1, -hh),
        }
    }
}

/// Regular sample grid on one face: `(columns + 1) * (rows + 1)` points.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceGrid {
    pub face: Face,
    pub columns: u32,
    pub rows: u32,
    /// Points on the face plane, column-major.
    pub points: Vec<[f32; 3]>,
    /// The same points in the face's own 2D coordinates.
    pub plane: Vec<[f64; 2]>,
}

fn subdivisions(extent: f32, points_per_unit: f32) -> u32 {
    (extent * points_per_unit).ceil().max(0.0) as u32
}

pub fn sample_face(dims: BoxDims, face: Face, points_per_unit: f32) -> FaceGrid {
    let (u_extent, v_extent) = face.in_plane(dims);
    let columns = subdivisions(u_extent, points_per_unit);
    let rows = subdivisions(v_extent, points_per_unit);
    // A zero subdivision count collapses the axis to its origin.
    let u_step = if columns == 0 { 0.0 } else { u_extent / columns as f32 };
    let v_step = if rows == 0 { 0.0 } else { v_extent / rows as f32 };

    let capacity = ((columns + 1) * (rows + 1)) as usize;
    let mut points = Vec::with_capacity(capacity);
    let mut plane = Vec::with_capacity(capacity);
    for i in 0..=columns {
        for j in 0..=rows {
            let u = i as f32 * u_step;
            let v = j as f32 * v_step;
            points.push(face.place(dims, u, v));
            plane.push([u as f64, v as f64]);
        }
    }

    FaceGrid {
        face,
        columns,
        rows,
        points,
        plane,
    }
}

/// One triangulated face and the grid it was built from.
#[derive(Clone, Debug)]
pub struct Facet {
    pub grid: FaceGrid,
    pub mesh: Mesh,
}

pub fn build_face(dims: BoxDims, face: Face, points_per_unit: f32) -> Facet {
    let grid = sample_face(dims, face, points_per_unit);
    let indices = triangulate(&grid.plane).into_iter().flatten().collect();
    let mesh = Mesh {
        positions: grid.points.clone(),
        indices,
        topology: Topology::Triangles,
    };
    Facet { grid, mesh }
}

/// All six facets in [`Face::ALL`] order.
pub fn build_facets(dims: BoxDims, points_per_unit: f32) -> [Facet; 6] {
    Face::ALL.map(|face| build_face(dims, face, points_per_unit))
}
