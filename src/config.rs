//! Compile-time tunables for the skyline.
//!
//! Nothing here is read at runtime: the constants are gathered into a
//! [`CityConfig`] whose `Default` is what [`crate::flow::run`] uses. Tests and
//! embedding binaries may build their own `CityConfig` to pin a seed or shrink
//! the ranges.

use rand::Rng;

use crate::recycle::RecycleWindow;

/// Height of one lane band, in viewport pixels (also its z pitch in world units).
pub const LANE_HEIGHT: f32 = 10.0;
/// The first lane starts this fraction of the viewport height "above" the origin.
pub const LANE_START_FRACTION: f32 = 0.1;
/// Lanes span from `-w * SPAWN_FRACTION` to `+w * SPAWN_FRACTION`.
pub const SPAWN_FRACTION: f32 = 0.25;

pub const BUILDING_WIDTH: Span = Span::new(5.0, 25.0);
pub const BUILDING_HEIGHT: Span = Span::new(20.0, 70.0);
pub const BUILDING_DEPTH: Span = Span::new(10.0, 25.0);
/// The smallest gap equals the widest building so neighbours never touch.
pub const GAP_MIN: f32 = 25.0;
/// The widest gap is this fraction of the viewport width.
pub const GAP_MAX_FRACTION: f32 = 0.25;

/// Facet sample density: grid subdivisions per world unit of face extent.
pub const POINTS_PER_UNIT: f32 = 0.3;

pub const RECYCLE_HALF_WIDTH: f32 = 100.0;
pub const RECYCLE_STEP: f32 = 0.05;

pub const GLYPH_STRING: &str = "SKYLINE";
/// Backdrop cell pitch, in viewport pixels.
pub const GLYPH_PITCH: f32 = 40.0;

/// World units per viewport pixel of the orthographic camera.
pub const CAMERA_ZOOM: f32 = 0.15;

/// Id of the DOM element the canvas is mounted into on the web.
pub const MOUNT_ID: &str = "skyline3DContainer1";
/// Path of the bitmap font relative to the asset root.
pub const FONT_FILE: &str = "font/pixel5x7.txt";

/// A closed range a random value is drawn from.
///
/// `min > max` is tolerated and simply draws from the reversed range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + rng.random::<f32>() * (self.max - self.min)
    }

    pub fn lower(&self) -> f32 {
        self.min.min(self.max)
    }

    pub fn upper(&self) -> f32 {
        self.min.max(self.max)
    }
}

/// RGBA colours for every twin mesh and the background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub clear: [f64; 4],
    pub shell: [f32; 4],
    pub solid: [f32; 4],
    pub wireframe: [f32; 4],
    pub points: [f32; 4],
    pub label: [f32; 4],
    pub glyph: [f32; 4],
    pub shadow: [f32; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            clear: [0.0, 0.0, 0.0, 1.0],
            shell: [0.01, 0.58, 0.57, 0.25],
            solid: [0.01, 0.58, 0.57, 0.35],
            wireframe: [0.0, 0.0, 0.0, 1.0],
            points: [0.0, 1.0, 0.0, 0.5],
            label: [1.0, 1.0, 1.0, 0.9],
            glyph: [1.0, 1.0, 1.0, 0.85],
            shadow: [0.05, 0.05, 0.08, 0.6],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CityConfig {
    pub lane_height: f32,
    pub lane_start_fraction: f32,
    pub spawn_fraction: f32,
    pub building_width: Span,
    pub building_height: Span,
    pub building_depth: Span,
    pub gap_min: f32,
    pub gap_max_fraction: f32,
    pub points_per_unit: f32,
    pub recycle: RecycleWindow,
    pub glyph_string: String,
    pub glyph_pitch: f32,
    pub camera_zoom: f32,
    pub labels: bool,
    pub palette: Palette,
    /// Fixed seed for the layout RNG; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl CityConfig {
    /// The gap range for a viewport of the given width.
    pub fn gap(&self, viewport_width: f32) -> Span {
        Span::new(self.gap_min, viewport_width * self.gap_max_fraction)
    }
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            lane_height: LANE_HEIGHT,
            lane_start_fraction: LANE_START_FRACTION,
            spawn_fraction: SPAWN_FRACTION,
            building_width: BUILDING_WIDTH,
            building_height: BUILDING_HEIGHT,
            building_depth: BUILDING_DEPTH,
            gap_min: GAP_MIN,
            gap_max_fraction: GAP_MAX_FRACTION,
            points_per_unit: POINTS_PER_UNIT,
            recycle: RecycleWindow::new(RECYCLE_HALF_WIDTH, RECYCLE_STEP),
            glyph_string: GLYPH_STRING.to_string(),
            glyph_pitch: GLYPH_PITCH,
            camera_zoom: CAMERA_ZOOM,
            labels: true,
            palette: Palette::default(),
            seed: None,
        }
    }
}
