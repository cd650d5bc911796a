//! The per-frame scroll and recycling pass.
//!
//! Every live mesh moves `step` units towards -x each frame. A mesh that falls
//! off the left edge of the window is wrapped around to the right; a mesh that
//! sits beyond the right edge is retired for good. The edges are asymmetric:
//! nothing ever wraps from right to left.

use std::ops::AddAssign;

use crate::data_structures::scene_graph::{MeshId, Scene};

/// The horizontal band `[-half_width, half_width]` meshes scroll through.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecycleWindow {
    pub half_width: f32,
    /// Distance moved per frame.
    pub step: f32,
}

impl RecycleWindow {
    pub const fn new(half_width: f32, step: f32) -> Self {
        Self { half_width, step }
    }

    /// Where a mesh at `x` goes this frame; `None` means it is retired.
    pub fn next_x(&self, x: f32) -> Option<f32> {
        let x = x - self.step;
        if x < -self.half_width {
            Some(x + 2.0 * self.half_width)
        } else if x > self.half_width {
            None
        } else {
            Some(x)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecycleOutcome {
    Kept,
    Wrapped,
    Retired,
}

/// Tally of one recycling pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecycleStats {
    pub kept: usize,
    pub wrapped: usize,
    pub retired: usize,
}

impl RecycleStats {
    pub fn record(&mut self, outcome: RecycleOutcome) {
        match outcome {
            RecycleOutcome::Kept => self.kept += 1,
            RecycleOutcome::Wrapped => self.wrapped += 1,
            RecycleOutcome::Retired => self.retired += 1,
        }
    }

    pub fn visited(&self) -> usize {
        self.kept + self.wrapped + self.retired
    }
}

impl AddAssign for RecycleStats {
    fn add_assign(&mut self, rhs: Self) {
        self.kept += rhs.kept;
        self.wrapped += rhs.wrapped;
        self.retired += rhs.retired;
    }
}

/// Anything that owns a set of scene handles which scroll together.
pub trait Recyclable {
    fn mesh_slots(&mut self) -> impl Iterator<Item = &mut Option<MeshId>>;
}

/// Advances a single handle. Empty slots are skipped and yield `None`.
///
/// A handle the scene no longer knows about is cleared and counted as retired.
pub fn recycle_slot<S: Scene + ?Sized>(
    slot: &mut Option<MeshId>,
    scene: &mut S,
    window: &RecycleWindow,
) -> Option<RecycleOutcome> {
    let id = (*slot)?;
    let Some(transform) = scene.transform_mut(id) else {
        log::warn!("mesh {} vanished from the scene", id.raw());
        *slot = None;
        return Some(RecycleOutcome::Retired);
    };

    let x = transform.position.x;
    match window.next_x(x) {
        Some(next) => {
            transform.position.x = next;
            if next > x {
                Some(RecycleOutcome::Wrapped)
            } else {
                Some(RecycleOutcome::Kept)
            }
        }
        None => {
            scene.remove(id);
            *slot = None;
            Some(RecycleOutcome::Retired)
        }
    }
}

pub fn recycle<R, S>(entity: &mut R, scene: &mut S, window: &RecycleWindow) -> RecycleStats
where
    R: Recyclable + ?Sized,
    S: Scene + ?Sized,
{
    let mut stats = RecycleStats::default();
    for slot in entity.mesh_slots() {
        if let Some(outcome) = recycle_slot(slot, scene, window) {
            stats.record(outcome);
        }
    }
    stats
}
