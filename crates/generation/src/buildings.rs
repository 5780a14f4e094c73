use bevy::log::debug;
use bevy::math::{Rect, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::city_config::{BuildingStyle, SizeProfile};
use crate::city_rng::uniform;
use crate::config::SPECIAL_BUILDING_CHANCE;
use crate::placement::PlacementValidator;
use crate::poisson_disc::PoissonDiscSampler;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub footprint: Rect,
    pub floors: u8,
    /// Always a concrete style; a mixed city resolves it per building.
    pub style: BuildingStyle,
    pub special: bool,
}

impl Building {
    pub fn area(&self) -> f32 {
        self.footprint.width() * self.footprint.height()
    }
}

fn concrete_style<R: Rng>(rng: &mut R, style: BuildingStyle) -> BuildingStyle {
    match style {
        BuildingStyle::Mixed => {
            BuildingStyle::CONCRETE[rng.gen_range(0..BuildingStyle::CONCRETE.len())]
        }
        s => s,
    }
}

/// Place up to `requested` buildings on blue-noise candidates.
///
/// Candidates that collide with a road buffer, water, or an earlier
/// footprint are skipped, so a crowded map yields fewer buildings than
/// requested.
pub fn place_buildings<R: Rng>(
    rng: &mut R,
    validator: &mut PlacementValidator,
    bounds: Rect,
    profile: &SizeProfile,
    style: BuildingStyle,
    requested: usize,
) -> Vec<Building> {
    if requested == 0 {
        return Vec::new();
    }

    let sampler = PoissonDiscSampler::new(bounds, profile.building_max * 1.2);
    let candidates = sampler.sample(rng, requested.saturating_mul(4));

    let mut buildings = Vec::with_capacity(requested);
    let mut rejected = 0usize;
    for center in candidates {
        if buildings.len() >= requested {
            break;
        }
        let size = Vec2::new(
            uniform(rng, profile.building_min, profile.building_max),
            uniform(rng, profile.building_min, profile.building_max),
        );
        let Some(footprint) = validator.try_place(Rect::from_center_size(center, size)) else {
            rejected += 1;
            continue;
        };
        validator.occupy(footprint);

        let style = concrete_style(rng, style);
        let (lo, hi) = style.floor_range();
        buildings.push(Building {
            footprint,
            floors: rng.gen_range(lo..=hi),
            style,
            special: rng.gen_bool(SPECIAL_BUILDING_CHANCE),
        });
    }

    if buildings.len() < requested {
        debug!(
            "Placed {}/{} buildings ({} candidates rejected)",
            buildings.len(),
            requested,
            rejected
        );
    }
    buildings
}
