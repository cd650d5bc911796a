//! after-dark
//!
//! A continuously scrolling, procedurally generated 3D skyline meant as a
//! decorative page background. Buildings are laid out along lanes, each one
//! drawn as a stack of co-located twin meshes, while a backdrop of glyphs
//! floats over the ground plane. Every frame all meshes drift left and are
//! wrapped around or retired by the recycling pass.
//!
//! High-level modules
//! - `config`: compile-time tunables gathered into [`config::CityConfig`]
//! - `facet`, `triangulate`: per-face sample grids and their triangulation
//! - `building`, `layout`: twin meshes of one box and lane-by-lane placement
//! - `glyph`: the tiled text backdrop
//! - `recycle`: the per-frame scroll/wrap/retire pass
//! - `world`: generation, teardown and advancement of everything above
//! - `data_structures`: meshes, transforms and the retained scene graph
//! - `camera`, `context`, `pipelines`, `render`: the wgpu side
//! - `flow`: the winit application and frame loop
//!

pub mod building;
pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod facet;
pub mod flow;
pub mod font;
pub mod glyph;
pub mod layout;
pub mod pipelines;
pub mod recycle;
pub mod render;
pub mod resources;
pub mod triangulate;
pub mod world;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Web entry point, called once the module is instantiated.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    flow::run().map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
