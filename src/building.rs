//! Buildings and their co-located twin meshes.
//!
//! A building is one box rendered several times over: six triangulated
//! facets, a translucent solid, a wireframe, a point cloud over the facet
//! sample grids and an optional height label. Every twin is registered with
//! the scene at the same origin; the facet/label geometry carries any offset.

use std::sync::Arc;

use crate::{
    config::CityConfig,
    data_structures::{
        instance::Instance,
        mesh::{Material, MaterialKind, Mesh},
        scene_graph::{MeshId, Scene},
    },
    facet::{BoxDims, build_facets},
    font::{Font, TextStyle},
    recycle::Recyclable,
};

/// Handles of the twins of one building that are still in the scene.
///
/// A slot becomes `None` once the recycling pass retires that mesh; the other
/// twins are unaffected.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildingMeshes {
    /// Indexed like [`crate::facet::Face::ALL`].
    pub facets: [Option<MeshId>; 6],
    pub solid: Option<MeshId>,
    pub wireframe: Option<MeshId>,
    pub points: Option<MeshId>,
    pub label: Option<MeshId>,
}

impl BuildingMeshes {
    pub fn slots_mut(&mut self) -> impl Iterator<Item = &mut Option<MeshId>> {
        self.facets.iter_mut().chain([
            &mut self.solid,
            &mut self.wireframe,
            &mut self.points,
            &mut self.label,
        ])
    }

    pub fn live(&self) -> impl Iterator<Item = MeshId> + '_ {
        self.facets
            .iter()
            .chain([&self.solid, &self.wireframe, &self.points, &self.label])
            .filter_map(|slot| *slot)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Building {
    /// Index of the lane the building was spawned in.
    pub lane: usize,
    /// Spawn position of the box centre; the live x lives on the meshes.
    pub origin: cgmath::Vector3<f32>,
    pub dims: BoxDims,
    pub meshes: BuildingMeshes,
}

impl Building {
    pub fn live_mesh_count(&self) -> usize {
        self.meshes.live().count()
    }
}

impl Recyclable for Building {
    fn mesh_slots(&mut self) -> impl Iterator<Item = &mut Option<MeshId>> {
        self.meshes.slots_mut()
    }
}

/// Label font pixel size relative to the building width.
const LABEL_PIXEL_FRACTION: f32 = 0.08;
/// Gap between the front face and the label.
const LABEL_STANDOFF: f32 = 0.5;

/// Builds every twin of a `dims` box whose base-left spawn point in its lane
/// is `(x, 0, z)` and registers them with `scene`.
pub fn build_building<S: Scene + ?Sized>(
    scene: &mut S,
    config: &CityConfig,
    font: Option<&dyn Font>,
    lane: usize,
    x: f32,
    z: f32,
    dims: BoxDims,
) -> Building {
    let origin = cgmath::Vector3::new(x, dims.height / 2.0, z);
    let palette = &config.palette;
    let mut meshes = BuildingMeshes::default();

    let facets = build_facets(dims, config.points_per_unit);
    let shell = Material::new(MaterialKind::Shell, palette.shell);
    for (slot, facet) in meshes.facets.iter_mut().zip(facets.iter()) {
        *slot = Some(scene.add(Arc::new(facet.mesh.clone()), shell, origin.into()));
    }

    let [hw, hh, hd] = dims.half_extents();
    let (min, max) = ([-hw, -hh, -hd], [hw, hh, hd]);
    meshes.solid = Some(scene.add(
        Arc::new(Mesh::cuboid(min, max)),
        Material::new(MaterialKind::Translucent, palette.solid),
        origin.into(),
    ));
    meshes.wireframe = Some(scene.add(
        Arc::new(Mesh::cuboid_edges(min, max)),
        Material::new(MaterialKind::Wireframe, palette.wireframe),
        origin.into(),
    ));

    let sparkle: Vec<[f32; 3]> = facets
        .iter()
        .flat_map(|facet| facet.grid.points.iter().copied())
        .collect();
    meshes.points = Some(scene.add(
        Arc::new(Mesh::points(sparkle)),
        Material::new(MaterialKind::Points, palette.points),
        origin.into(),
    ));

    if config.labels {
        meshes.label = font
            .and_then(|font| label_mesh(font, dims))
            .map(|mesh| {
                scene.add(
                    Arc::new(mesh),
                    Material::new(MaterialKind::Opaque, palette.label),
                    Instance::from(origin),
                )
            });
    }

    Building {
        lane,
        origin,
        dims,
        meshes,
    }
}

/// The rounded height, centred on the front face just above the base.
fn label_mesh(font: &dyn Font, dims: BoxDims) -> Option<Mesh> {
    let style = TextStyle {
        pixel: dims.width * LABEL_PIXEL_FRACTION,
        depth: LABEL_STANDOFF / 2.0,
        spacing: 1,
    };
    let mut mesh = font.text_mesh(&format!("{:.0}", dims.height), &style);
    let (lo, hi) = mesh.bounds()?;
    let [_, hh, hd] = dims.half_extents();
    mesh.translate([
        -(lo[0] + hi[0]) / 2.0,
        -hh + style.pixel - lo[1],
        hd + LABEL_STANDOFF,
    ]);
    Some(mesh)
}
