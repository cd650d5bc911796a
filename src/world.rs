//! The world: everything the frame loop owns between two resizes.
//!
//! A [`World`] is generated from a viewport, advanced once per frame and,
//! when the viewport changes, torn down and generated again from scratch.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    building::Building,
    config::CityConfig,
    data_structures::scene_graph::Scene,
    font::Font,
    glyph::GlyphBackdrop,
    layout::{Lane, Viewport, compute_lanes, layout_buildings},
    recycle::{RecycleStats, recycle},
};

/// Layout RNG: fixed when `seed` is given, drawn from the thread RNG otherwise.
pub fn layout_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub viewport: Viewport,
    pub lanes: Vec<Lane>,
    pub buildings: Vec<Building>,
    pub backdrop: GlyphBackdrop,
}

impl World {
    pub fn generate<S, R>(
        viewport: Viewport,
        config: &CityConfig,
        scene: &mut S,
        font: Option<&dyn Font>,
        rng: &mut R,
    ) -> Self
    where
        S: Scene + ?Sized,
        R: Rng + ?Sized,
    {
        let lanes = compute_lanes(viewport, config);
        let buildings = layout_buildings(&lanes, viewport, config, scene, font, rng);
        let backdrop = GlyphBackdrop::populate(viewport, config, scene, font);
        let world = Self {
            viewport,
            lanes,
            buildings,
            backdrop,
        };
        log::info!(
            "generated {}x{} world: {} lanes, {} buildings, {} glyph cells, {} meshes",
            viewport.width,
            viewport.height,
            world.lanes.len(),
            world.buildings.len(),
            world.backdrop.cells.len(),
            world.live_mesh_count(),
        );
        world
    }

    /// Removes every live mesh from `scene` and empties the world.
    /// Returns how many meshes were removed.
    pub fn teardown<S: Scene + ?Sized>(&mut self, scene: &mut S) -> usize {
        let buildings = self
            .buildings
            .drain(..)
            .flat_map(|building| building.meshes.live().collect::<Vec<_>>());
        let cells = self
            .backdrop
            .cells
            .drain(..)
            .flat_map(|cell| [cell.glyph, cell.shadow].into_iter().flatten());
        let removed = buildings
            .chain(cells)
            .filter(|id| scene.remove(*id))
            .count();
        self.lanes.clear();
        self.backdrop = GlyphBackdrop::default();
        removed
    }

    /// Tears the world down and generates a fresh one for `viewport`.
    pub fn rebuild<S, R>(
        &mut self,
        viewport: Viewport,
        config: &CityConfig,
        scene: &mut S,
        font: Option<&dyn Font>,
        rng: &mut R,
    ) where
        S: Scene + ?Sized,
        R: Rng + ?Sized,
    {
        let removed = self.teardown(scene);
        log::info!(
            "viewport {}x{} -> {}x{}, removed {} meshes",
            self.viewport.width,
            self.viewport.height,
            viewport.width,
            viewport.height,
            removed
        );
        *self = Self::generate(viewport, config, scene, font, rng);
    }

    /// One recycling pass over every building and the backdrop.
    pub fn advance<S: Scene + ?Sized>(&mut self, scene: &mut S, config: &CityConfig) -> RecycleStats {
        let mut stats = RecycleStats::default();
        for building in &mut self.buildings {
            stats += recycle(building, scene, &config.recycle);
        }
        stats += recycle(&mut self.backdrop, scene, &config.recycle);
        if stats.retired > 0 {
            log::debug!("retired {} meshes, {} left", stats.retired, self.live_mesh_count());
        }
        stats
    }

    pub fn live_mesh_count(&self) -> usize {
        self.buildings
            .iter()
            .map(Building::live_mesh_count)
            .sum::<usize>()
            + self.backdrop.live_mesh_count()
    }
}
