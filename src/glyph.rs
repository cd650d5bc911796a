//! The floating glyph backdrop.
//!
//! A fixed string is tiled over the ground plane, one character per grid cell
//! in row-major order. Every cell holds a raised glyph and a flattened shadow
//! of the same character just below it. The grid covers the viewport converted
//! to world units and starts at its top-left corner.

use std::{collections::HashMap, sync::Arc};

use cgmath::{Deg, Quaternion, Rotation3, Vector3};

use crate::{
    config::CityConfig,
    data_structures::{
        instance::Instance,
        mesh::{Material, MaterialKind, Mesh},
        scene_graph::{MeshId, Scene},
    },
    font::{Font, TextStyle},
    layout::Viewport,
    recycle::Recyclable,
};

/// Font pixel edge as a fraction of the world-space cell pitch.
const PIXEL_FRACTION: f32 = 0.1;
/// Height of the glyph above the ground plane.
const LIFT: f32 = 2.0;
const EXTRUSION: f32 = 0.6;
const SHADOW_FLATTEN: f32 = 0.05;
const SHADOW_OFFSET: [f32; 2] = [0.3, 0.3];

#[derive(Clone, Debug, PartialEq)]
pub struct GlyphCell {
    pub row: usize,
    pub column: usize,
    pub ch: char,
    pub glyph: Option<MeshId>,
    pub shadow: Option<MeshId>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphBackdrop {
    pub columns: usize,
    pub rows: usize,
    pub cells: Vec<GlyphCell>,
}

/// Cells needed to cover `extent` at the given pitch.
fn cells_along(extent: f32, pitch: f32) -> usize {
    if extent <= 0.0 || pitch <= 0.0 {
        return 0;
    }
    (extent / pitch).ceil() as usize
}

impl GlyphBackdrop {
    /// Grid dimensions `(columns, rows)` for a viewport.
    pub fn grid(viewport: Viewport, config: &CityConfig) -> (usize, usize) {
        (
            cells_along(viewport.width, config.glyph_pitch),
            cells_along(viewport.height, config.glyph_pitch),
        )
    }

    /// Fills the grid and registers every glyph/shadow pair with `scene`.
    ///
    /// Without a font, or with an empty glyph string, the backdrop is empty.
    pub fn populate<S: Scene + ?Sized>(
        viewport: Viewport,
        config: &CityConfig,
        scene: &mut S,
        font: Option<&dyn Font>,
    ) -> Self {
        let Some(font) = font else {
            return Self::default();
        };
        let characters: Vec<char> = config.glyph_string.chars().collect();
        if characters.is_empty() {
            return Self::default();
        }

        let (columns, rows) = Self::grid(viewport, config);
        let zoom = config.camera_zoom;
        let pitch = config.glyph_pitch * zoom;
        let left = -viewport.width * zoom / 2.0;
        let top = -viewport.height * zoom / 2.0;

        let style = TextStyle {
            pixel: pitch * PIXEL_FRACTION,
            depth: EXTRUSION,
            spacing: 0,
        };
        let flat = Quaternion::from_angle_x(Deg(-90.0));
        let glyph_material = Material::new(MaterialKind::Opaque, config.palette.glyph);
        let shadow_material = Material::new(MaterialKind::Translucent, config.palette.shadow);

        // One mesh per distinct character, shared by every cell showing it.
        let mut meshes: HashMap<char, Option<Arc<Mesh>>> = HashMap::new();
        let mut cells = Vec::with_capacity(columns * rows);
        for row in 0..rows {
            for column in 0..columns {
                let ch = characters[(row * columns + column) % characters.len()];
                let mesh = meshes
                    .entry(ch)
                    .or_insert_with(|| {
                        let mesh = font.text_mesh(&ch.to_string(), &style);
                        (!mesh.is_empty()).then(|| Arc::new(mesh))
                    })
                    .clone();

                let x = left + column as f32 * pitch;
                let z = top + row as f32 * pitch;
                let (glyph, shadow) = match mesh {
                    Some(mesh) => {
                        let raised = Instance::from(Vector3::new(x, LIFT, z)).with_rotation(flat);
                        let flattened = Instance::from(Vector3::new(
                            x + SHADOW_OFFSET[0],
                            0.0,
                            z + SHADOW_OFFSET[1],
                        ))
                        .with_rotation(flat)
                        .with_scale(Vector3::new(1.0, 1.0, SHADOW_FLATTEN));
                        (
                            Some(scene.add(mesh.clone(), glyph_material, raised)),
                            Some(scene.add(mesh, shadow_material, flattened)),
                        )
                    }
                    None => (None, None),
                };
                cells.push(GlyphCell {
                    row,
                    column,
                    ch,
                    glyph,
                    shadow,
                });
            }
        }

        Self {
            columns,
            rows,
            cells,
        }
    }

    pub fn live_mesh_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| cell.glyph.is_some() as usize + cell.shadow.is_some() as usize)
            .sum()
    }
}

impl Recyclable for GlyphBackdrop {
    fn mesh_slots(&mut self) -> impl Iterator<Item = &mut Option<MeshId>> {
        self.cells
            .iter_mut()
            .flat_map(|cell| [&mut cell.glyph, &mut cell.shadow])
    }
}
