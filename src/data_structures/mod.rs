//! Engine data structures: meshes, instances, the scene graph and textures.
//!
//! - `mesh` contains CPU geometry, materials and the GPU vertex layout
//! - `instance` holds per-mesh transformation data
//! - `scene_graph` is the retained scene every generator writes into
//! - `texture` wraps the depth attachment

pub mod instance;
pub mod mesh;
pub mod scene_graph;
pub mod texture;
