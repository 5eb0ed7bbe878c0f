//! The boundary between generated stars and whatever scene consumes them.

use glam::DVec3;

use crate::appearance::AppearanceId;
use crate::sampler::StarRecord;

/// Receives placed stars. Implemented by a scene graph, a GPU instance
/// buffer, or a test collector.
pub trait StarSink {
    /// Handle the sink returns for each placed primitive.
    type Handle;

    /// Place one primitive of footprint `size` at `position`, shaded by the
    /// shared `appearance` with per-instance input `random_factor`.
    fn place(
        &mut self,
        position: DVec3,
        size: f64,
        appearance: AppearanceId,
        random_factor: f64,
    ) -> Self::Handle;
}

/// Feed every record to `sink` in star-index order, all referencing `appearance`.
pub fn assemble<S: StarSink>(
    records: &[StarRecord],
    appearance: AppearanceId,
    sink: &mut S,
) -> Vec<S::Handle> {
    records
        .iter()
        .map(|r| sink.place(r.position, r.size, appearance, r.random_factor))
        .collect()
}

/// A star as received by [`CollectingSink`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedStar {
    pub position: DVec3,
    pub size: f64,
    pub appearance: AppearanceId,
    pub random_factor: f64,
}

/// In-memory sink that keeps every placement; handles are indices.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub placed: Vec<PlacedStar>,
}

impl StarSink for CollectingSink {
    type Handle = usize;

    fn place(
        &mut self,
        position: DVec3,
        size: f64,
        appearance: AppearanceId,
        random_factor: f64,
    ) -> usize {
        self.placed.push(PlacedStar {
            position,
            size,
            appearance,
            random_factor,
        });
        self.placed.len() - 1
    }
}
