//! The generation pipeline: configuration in, [`CityBlueprint`] out.
//!
//! Stages run strictly in order, each consuming the complete output of the
//! previous ones:
//!
//! terrain -> water -> roads -> planarize -> buildings -> parks ->
//! landmarks -> statistics
//!
//! All randomness comes from one [`CityRng`] seeded by the validated
//! configuration, so a seed fully determines the blueprint.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bevy::log::info;
use bevy::math::Rect;

use crate::blueprint::CityBlueprint;
use crate::buildings::place_buildings;
use crate::city_config::ValidatedConfig;
use crate::city_rng::CityRng;
use crate::error::GenerationError;
use crate::landmarks::place_landmarks;
use crate::parks::place_parks;
use crate::placement::PlacementValidator;
use crate::planarizer::planarize;
use crate::road_layout::{build_road_network, RoadLayoutContext};
use crate::stats::{CityDetails, CityStatistics};
use crate::terrain::TerrainModel;
use crate::water::generate_water_bodies;

/// Shared cancellation flag. Cloning yields a handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// `Err(Cancelled)` naming the stage that was about to start.
    fn checkpoint(&self, stage: &'static str) -> Result<(), GenerationError> {
        if self.is_cancelled() {
            return Err(GenerationError::Cancelled { stage });
        }
        Ok(())
    }
}

/// Run every stage for `config`.
///
/// Only cancellation aborts a run; geometric dead ends (failed routes,
/// unplaceable footprints) shrink the result instead.
pub fn generate_city(
    config: &ValidatedConfig,
    cancel: &CancelToken,
) -> Result<CityBlueprint, GenerationError> {
    let profile = config.profile();
    let bounds = Rect::new(0.0, 0.0, config.width, config.height);
    let mut rng = CityRng::from_seed_u64(config.seed());

    info!(
        "Generating {:?} {:?} city (seed {})",
        config.city_size,
        config.road_pattern,
        config.seed()
    );

    cancel.checkpoint("terrain")?;
    let terrain = TerrainModel::generate(config.width, config.height, rng.noise_seed());

    cancel.checkpoint("water")?;
    let water_bodies = generate_water_bodies(
        &mut rng.0,
        config.water_body_count as usize,
        profile.water_base_size,
        config.width,
        config.height,
    );

    cancel.checkpoint("roads")?;
    let field_seed = rng.noise_seed();
    let ctx = RoadLayoutContext {
        bounds,
        profile,
        terrain: &terrain,
        water: &water_bodies,
        cancel,
    };
    let mut roads = build_road_network(&mut rng.0, &ctx, config.road_pattern, field_seed);
    info!("Laid out {} roads", roads.len());

    cancel.checkpoint("planarize")?;
    let report = planarize(&mut roads);
    info!(
        "Planarized network: {} duplicates, {} stubs removed, {} roads smoothed",
        report.duplicates_removed, report.stubs_removed, report.smoothed
    );

    cancel.checkpoint("buildings")?;
    let mut validator = PlacementValidator::new(bounds, &roads, &water_bodies);
    let buildings = place_buildings(
        &mut rng.0,
        &mut validator,
        bounds,
        profile,
        config.building_style,
        config.requested_buildings(),
    );

    cancel.checkpoint("parks")?;
    let parks = place_parks(
        &mut rng.0,
        &mut validator,
        bounds,
        profile.park_base_size,
        config.requested_parks(),
    );

    cancel.checkpoint("landmarks")?;
    let landmarks = place_landmarks(
        &mut rng.0,
        &mut validator,
        bounds,
        config.building_style,
        profile.landmarks as usize,
    );

    cancel.checkpoint("statistics")?;
    let statistics =
        CityStatistics::compute(&mut rng.0, &buildings, parks.len(), water_bodies.len());
    let details = CityDetails::roll(
        &mut rng.0,
        config.city_size,
        config.road_pattern,
        config.building_style,
    );

    info!(
        "Generated {}: {} roads, {} buildings, {} parks, {} water bodies, population {}",
        details.name,
        roads.len(),
        buildings.len(),
        parks.len(),
        water_bodies.len(),
        statistics.population
    );

    Ok(CityBlueprint {
        seed: config.seed(),
        width: config.width,
        height: config.height,
        roads,
        water_bodies,
        buildings,
        parks,
        landmarks,
        statistics,
        details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city_config::{CityConfig, RoadPattern};

    fn config(seed: u64) -> ValidatedConfig {
        CityConfig {
            rng_seed: Some(seed),
            ..Default::default()
        }
        .validate()
        .expect("valid config")
    }

    #[test]
    fn test_cancel_token_is_shared() {
        let token = CancelToken::new();
        let handle = token.clone();
        assert!(!token.is_cancelled());
        handle.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancelled_before_start() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = generate_city(&config(1), &cancel);
        assert!(matches!(
            result,
            Err(GenerationError::Cancelled { stage: "terrain" })
        ));
    }

    #[test]
    fn test_default_city_generates() {
        let blueprint = generate_city(&config(2), &CancelToken::new()).expect("generation");
        assert!(!blueprint.roads.is_empty());
        assert_eq!(blueprint.water_bodies.len(), 1);
        assert_eq!(blueprint.seed, 2);
        assert_eq!(blueprint.details.road_pattern, RoadPattern::Grid);
    }

    #[test]
    fn test_same_seed_same_blueprint() {
        let a = generate_city(&config(7), &CancelToken::new()).expect("generation");
        let b = generate_city(&config(7), &CancelToken::new()).expect("generation");
        assert_eq!(a, b);
    }
}
