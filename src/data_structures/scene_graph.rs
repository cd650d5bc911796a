//! The retained scene the skyline is drawn from.
//!
//! Generators and the recycling pass only talk to the [`Scene`] trait: add a
//! mesh with a material and transform, move it, remove it. [`SceneGraph`] is
//! the in-memory implementation the GPU renderer reads every frame.

use std::{collections::BTreeMap, sync::Arc};

use crate::data_structures::{
    instance::Instance,
    mesh::{Material, Mesh},
};

/// Handle of a mesh registered with a [`Scene`]. Ids are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(u32);

impl MeshId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

pub trait Scene {
    /// Registers a mesh and returns its handle.
    fn add(&mut self, mesh: Arc<Mesh>, material: Material, transform: Instance) -> MeshId;

    /// Removes a mesh. Returns `false` if `id` was not in the scene.
    fn remove(&mut self, id: MeshId) -> bool;

    fn transform(&self, id: MeshId) -> Option<&Instance>;

    fn transform_mut(&mut self, id: MeshId) -> Option<&mut Instance>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, id: MeshId) -> bool {
        self.transform(id).is_some()
    }
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub mesh: Arc<Mesh>,
    pub material: Material,
    pub transform: Instance,
}

#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: BTreeMap<MeshId, SceneNode>,
    next_id: u32,
    removed: Vec<MeshId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (MeshId, &SceneNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    /// Ids removed since the last call, so GPU copies can be released.
    pub fn drain_removed(&mut self) -> Vec<MeshId> {
        std::mem::take(&mut self.removed)
    }
}

impl Scene for SceneGraph {
    fn add(&mut self, mesh: Arc<Mesh>, material: Material, transform: Instance) -> MeshId {
        let id = MeshId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            SceneNode {
                mesh,
                material,
                transform,
            },
        );
        id
    }

    fn remove(&mut self, id: MeshId) -> bool {
        let existed = self.nodes.remove(&id).is_some();
        if existed {
            self.removed.push(id);
        }
        existed
    }

    fn transform(&self, id: MeshId) -> Option<&Instance> {
        self.nodes.get(&id).map(|node| &node.transform)
    }

    fn transform_mut(&mut self, id: MeshId) -> Option<&mut Instance> {
        self.nodes.get_mut(&id).map(|node| &mut node.transform)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}
