//! Derived figures and flavor text for a finished city.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::buildings::Building;
use crate::city_config::{BuildingStyle, CitySize, RoadPattern};

pub const CITY_NAMES: [&str; 16] = [
    "Aurora Falls",
    "Crystal Bay",
    "Emerald Heights",
    "Golden Valley",
    "Silver Springs",
    "Azure Harbor",
    "Crimson Peak",
    "Verdant Grove",
    "Sapphire Ridge",
    "Amber Cove",
    "Jade Valley",
    "Ruby Harbor",
    "Pearl Bay",
    "Onyx Heights",
    "Topaz Springs",
    "Diamond Ridge",
];

pub const CLIMATES: [&str; 5] = [
    "Temperate",
    "Mediterranean",
    "Tropical",
    "Continental",
    "Oceanic",
];

pub const ECONOMIES: [&str; 6] = [
    "Technology",
    "Tourism",
    "Manufacturing",
    "Finance",
    "Education",
    "Mixed",
];

/// Residents per unit of floor area.
const FLOOR_AREA_PER_RESIDENT: f32 = 8.0;
const RESIDENTS_PER_PARK: u64 = 50;
const RESIDENTS_PER_WATER_BODY: u64 = 200;
const POPULATION_JITTER: u64 = 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityStatistics {
    pub population: u64,
    /// Built-up area in thousands of square units.
    pub area: u64,
}

impl CityStatistics {
    pub fn compute<R: Rng>(
        rng: &mut R,
        buildings: &[Building],
        park_count: usize,
        water_count: usize,
    ) -> Self {
        let mut population = 0u64;
        let mut area = 0.0f64;
        for b in buildings {
            let a = b.area();
            area += a as f64;
            population += (a / FLOOR_AREA_PER_RESIDENT).floor() as u64 * b.floors as u64;
        }
        population += park_count as u64 * RESIDENTS_PER_PARK;
        population += water_count as u64 * RESIDENTS_PER_WATER_BODY;
        population += rng.gen_range(0..POPULATION_JITTER);

        Self {
            population,
            area: (area / 1000.0).floor() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityDetails {
    pub name: String,
    pub founded: u16,
    pub climate: String,
    pub economy: String,
    pub city_size: CitySize,
    pub road_pattern: RoadPattern,
    pub building_style: BuildingStyle,
}

impl CityDetails {
    pub fn roll<R: Rng>(
        rng: &mut R,
        city_size: CitySize,
        road_pattern: RoadPattern,
        building_style: BuildingStyle,
    ) -> Self {
        Self {
            name: CITY_NAMES[rng.gen_range(0..CITY_NAMES.len())].to_string(),
            founded: rng.gen_range(1800..2000),
            climate: CLIMATES[rng.gen_range(0..CLIMATES.len())].to_string(),
            economy: ECONOMIES[rng.gen_range(0..ECONOMIES.len())].to_string(),
            city_size,
            road_pattern,
            building_style,
        }
    }
}
