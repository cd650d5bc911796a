//! Lane partitioning and lot placement.
//!
//! The viewport height is cut into fixed-height lanes. Each lane is then
//! walked left to right: draw a box and a gap, place the box at the cursor,
//! advance the cursor by `width + gap`, stop once the cursor reaches the
//! right bound. The last box may overhang the bound.

use rand::Rng;

use crate::{
    building::{Building, build_building},
    config::CityConfig,
    data_structures::scene_graph::Scene,
    facet::BoxDims,
    font::Font,
};

/// Logical size of the drawing area in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// One horizontal strip of the city.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lane {
    pub index: usize,
    /// Depth offset every building in this lane is spawned at.
    pub z: f32,
    pub left: f32,
    pub right: f32,
}

impl Lane {
    pub fn span(&self) -> f32 {
        self.right - self.left
    }
}

pub fn lane_count(viewport: Viewport, config: &CityConfig) -> usize {
    if viewport.height <= 0.0 || config.lane_height <= 0.0 {
        return 0;
    }
    (viewport.height / config.lane_height).ceil() as usize
}

pub fn compute_lanes(viewport: Viewport, config: &CityConfig) -> Vec<Lane> {
    let start = -viewport.height * config.lane_start_fraction;
    let half = viewport.width * config.spawn_fraction;
    (0..lane_count(viewport, config))
        .map(|index| Lane {
            index,
            z: start + index as f32 * config.lane_height,
            left: -half,
            right: half,
        })
        .collect()
}

/// A planned building: where it goes, how big it is, and the gap after it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lot {
    pub x: f32,
    pub dims: BoxDims,
    pub gap: f32,
}

impl Lot {
    /// How far the cursor moves past this lot.
    pub fn advance(&self) -> f32 {
        self.dims.width + self.gap
    }
}

/// Walks one lane and returns its lots in placement order.
pub fn plan_lane<R: Rng + ?Sized>(
    lane: &Lane,
    config: &CityConfig,
    viewport_width: f32,
    rng: &mut R,
) -> Vec<Lot> {
    let gap = config.gap(viewport_width);
    let mut lots = Vec::new();
    let mut x = lane.left;
    while x < lane.right {
        let width = config.building_width.sample(rng);
        let height = config.building_height.sample(rng);
        let depth = config.building_depth.sample(rng);
        let lot = Lot {
            x,
            dims: BoxDims::new(width, height, depth),
            gap: gap.sample(rng),
        };
        let advance = lot.advance();
        lots.push(lot);
        if advance <= 0.0 {
            // Only reachable with a misconfigured range.
            log::warn!("lane {} stopped: non-positive advance {}", lane.index, advance);
            break;
        }
        x += advance;
    }
    lots
}

/// Plans and builds every lane, registering all twins with `scene`.
pub fn layout_buildings<S, R>(
    lanes: &[Lane],
    viewport: Viewport,
    config: &CityConfig,
    scene: &mut S,
    font: Option<&dyn Font>,
    rng: &mut R,
) -> Vec<Building>
where
    S: Scene + ?Sized,
    R: Rng + ?Sized,
{
    let mut buildings = Vec::new();
    for lane in lanes {
        for lot in plan_lane(lane, config, viewport.width, rng) {
            buildings.push(build_building(
                scene, config, font, lane.index, lot.x, lane.z, lot.dims,
            ));
        }
    }
    buildings
}
