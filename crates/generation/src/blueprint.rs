use serde::{Deserialize, Serialize};
use xxhash_rust::xxh32::xxh32;

use crate::buildings::Building;
use crate::error::GenerationError;
use crate::landmarks::Landmark;
use crate::parks::Park;
use crate::roads::{RoadClass, RoadSegment};
use crate::stats::{CityDetails, CityStatistics};
use crate::water::WaterBody;

const FINGERPRINT_SEED: u32 = 0;

/// Everything one generation run produced, in renderer-agnostic form.
///
/// Built only by [`crate::pipeline::generate_city`]; callers receive it
/// complete and treat it as an immutable snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityBlueprint {
    pub seed: u64,
    pub width: f32,
    pub height: f32,
    pub roads: Vec<RoadSegment>,
    pub water_bodies: Vec<WaterBody>,
    pub buildings: Vec<Building>,
    pub parks: Vec<Park>,
    pub landmarks: Vec<Landmark>,
    pub statistics: CityStatistics,
    pub details: CityDetails,
}

impl CityBlueprint {
    pub fn road_count(&self, class: RoadClass) -> usize {
        self.roads.iter().filter(|r| r.class == class).count()
    }

    /// xxh32 of the bitcode encoding. Equal blueprints always share a
    /// fingerprint; the determinism tests compare these.
    pub fn fingerprint(&self) -> Result<u32, GenerationError> {
        let bytes = bitcode::serialize(self)?;
        Ok(xxh32(&bytes, FINGERPRINT_SEED))
    }
}
