//! Generation input: the handful of high-level parameters a city is built
//! from, plus the validation step that runs before the pipeline sees them.
//!
//! The engine trusts a [`ValidatedConfig`] completely; nothing downstream
//! re-checks ranges.

use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::city_rng::random_seed;
use crate::config::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, MAX_CANVAS_EXTENT, MAX_WATER_BODIES,
    MIN_CANVAS_EXTENT,
};
use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Enumerated parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitySize {
    #[default]
    Small,
    Medium,
    Large,
    Xlarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadPattern {
    #[default]
    Grid,
    Organic,
    Radial,
    Spiral,
    Fractal,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingStyle {
    #[default]
    Modern,
    Classical,
    Futuristic,
    Gothic,
    Asian,
    Mixed,
}

impl BuildingStyle {
    /// Concrete styles a `Mixed` city draws from.
    pub const CONCRETE: [BuildingStyle; 5] = [
        BuildingStyle::Modern,
        BuildingStyle::Classical,
        BuildingStyle::Futuristic,
        BuildingStyle::Gothic,
        BuildingStyle::Asian,
    ];

    /// Inclusive floor range for buildings of this style.
    pub fn floor_range(self) -> (u8, u8) {
        match self {
            BuildingStyle::Modern => (2, 8),
            BuildingStyle::Classical => (1, 4),
            BuildingStyle::Futuristic => (4, 12),
            BuildingStyle::Gothic => (2, 5),
            BuildingStyle::Asian => (1, 3),
            BuildingStyle::Mixed => (1, 6),
        }
    }
}

fn parse_variant<T: Copy>(
    field: &'static str,
    value: &str,
    table: &[(&str, T)],
) -> Result<T, ConfigError> {
    let lower = value.trim().to_ascii_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, v)| *v)
        .ok_or_else(|| ConfigError::UnknownVariant {
            field,
            value: value.to_string(),
        })
}

impl FromStr for CitySize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(
            "city size",
            s,
            &[
                ("small", CitySize::Small),
                ("medium", CitySize::Medium),
                ("large", CitySize::Large),
                ("xlarge", CitySize::Xlarge),
            ],
        )
    }
}

impl FromStr for RoadPattern {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(
            "road pattern",
            s,
            &[
                ("grid", RoadPattern::Grid),
                ("organic", RoadPattern::Organic),
                ("radial", RoadPattern::Radial),
                ("spiral", RoadPattern::Spiral),
                ("fractal", RoadPattern::Fractal),
                ("mixed", RoadPattern::Mixed),
            ],
        )
    }
}

impl FromStr for BuildingStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(
            "building style",
            s,
            &[
                ("modern", BuildingStyle::Modern),
                ("classical", BuildingStyle::Classical),
                ("futuristic", BuildingStyle::Futuristic),
                ("gothic", BuildingStyle::Gothic),
                ("asian", BuildingStyle::Asian),
                ("mixed", BuildingStyle::Mixed),
            ],
        )
    }
}

// ---------------------------------------------------------------------------
// Per-size density constants
// ---------------------------------------------------------------------------

/// Density constants scaled by [`CitySize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeProfile {
    /// Lattice spacing for grid cities; also scales node spacing elsewhere.
    pub grid_spacing: f32,
    /// Base road width; each class applies its own multiplier.
    pub road_width: f32,
    pub base_buildings: u32,
    pub building_min: f32,
    pub building_max: f32,
    pub base_parks: u32,
    pub park_base_size: f32,
    pub landmarks: u32,
    pub water_base_size: f32,
    pub interior_highway_nodes: usize,
    pub arterial_nodes: usize,
    pub collector_nodes: usize,
    pub collector_k: usize,
    pub streamline_seeds: usize,
    pub radial_spokes: usize,
}

impl SizeProfile {
    pub fn for_size(size: CitySize) -> Self {
        match size {
            CitySize::Small => Self {
                grid_spacing: 80.0,
                road_width: 6.0,
                base_buildings: 20,
                building_min: 12.0,
                building_max: 30.0,
                base_parks: 2,
                park_base_size: 25.0,
                landmarks: 1,
                water_base_size: 40.0,
                interior_highway_nodes: 2,
                arterial_nodes: 8,
                collector_nodes: 24,
                collector_k: 2,
                streamline_seeds: 12,
                radial_spokes: 6,
            },
            CitySize::Medium => Self {
                grid_spacing: 60.0,
                road_width: 8.0,
                base_buildings: 35,
                building_min: 15.0,
                building_max: 40.0,
                base_parks: 4,
                park_base_size: 35.0,
                landmarks: 2,
                water_base_size: 60.0,
                interior_highway_nodes: 3,
                arterial_nodes: 12,
                collector_nodes: 36,
                collector_k: 2,
                streamline_seeds: 18,
                radial_spokes: 8,
            },
            CitySize::Large => Self {
                grid_spacing: 40.0,
                road_width: 10.0,
                base_buildings: 50,
                building_min: 20.0,
                building_max: 50.0,
                base_parks: 6,
                park_base_size: 45.0,
                landmarks: 3,
                water_base_size: 80.0,
                interior_highway_nodes: 4,
                arterial_nodes: 16,
                collector_nodes: 48,
                collector_k: 3,
                streamline_seeds: 24,
                radial_spokes: 12,
            },
            CitySize::Xlarge => Self {
                grid_spacing: 30.0,
                road_width: 12.0,
                base_buildings: 70,
                building_min: 25.0,
                building_max: 60.0,
                base_parks: 8,
                park_base_size: 55.0,
                landmarks: 4,
                water_base_size: 100.0,
                interior_highway_nodes: 5,
                arterial_nodes: 20,
                collector_nodes: 64,
                collector_k: 3,
                streamline_seeds: 32,
                radial_spokes: 16,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// CityConfig
// ---------------------------------------------------------------------------

/// Raw generation parameters as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    pub city_size: CitySize,
    pub road_pattern: RoadPattern,
    pub building_style: BuildingStyle,
    /// Fraction of the size's base building count to place, `[0, 1]`.
    pub building_density: f32,
    /// Park density, `[0, 1]`.
    pub park_ratio: f32,
    pub water_body_count: u32,
    /// Fixed seed for reproducible runs; drawn from the clock when absent.
    pub rng_seed: Option<u64>,
    pub width: f32,
    pub height: f32,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            city_size: CitySize::Small,
            road_pattern: RoadPattern::Grid,
            building_style: BuildingStyle::Modern,
            building_density: 0.7,
            park_ratio: 0.2,
            water_body_count: 1,
            rng_seed: None,
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl CityConfig {
    /// Reject what cannot be repaired, clamp what can, and fix the seed.
    pub fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        if self.building_density.is_nan() {
            return Err(ConfigError::NotANumber("building_density"));
        }
        if self.park_ratio.is_nan() {
            return Err(ConfigError::NotANumber("park_ratio"));
        }
        for (axis, value) in [("width", self.width), ("height", self.height)] {
            if !(MIN_CANVAS_EXTENT..=MAX_CANVAS_EXTENT).contains(&value) {
                return Err(ConfigError::CanvasExtent { axis, value });
            }
        }

        let mut config = self.clone();
        config.building_density = config.building_density.clamp(0.0, 1.0);
        config.park_ratio = config.park_ratio.clamp(0.0, 1.0);
        config.water_body_count = config.water_body_count.min(MAX_WATER_BODIES);
        let seed = config.rng_seed.unwrap_or_else(random_seed);
        config.rng_seed = Some(seed);

        Ok(ValidatedConfig {
            profile: SizeProfile::for_size(config.city_size),
            seed,
            config,
        })
    }
}

/// A configuration that passed [`CityConfig::validate`]. Derefs to the
/// clamped [`CityConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig {
    config: CityConfig,
    profile: SizeProfile,
    seed: u64,
}

impl ValidatedConfig {
    pub fn profile(&self) -> &SizeProfile {
        &self.profile
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Requested building count: `floor(base * density)`.
    pub fn requested_buildings(&self) -> usize {
        (self.profile.base_buildings as f32 * self.config.building_density).floor() as usize
    }

    /// Requested park count: `floor(base * ratio * 10)`.
    pub fn requested_parks(&self) -> usize {
        (self.profile.base_parks as f32 * self.config.park_ratio * 10.0).floor() as usize
    }
}

impl Deref for ValidatedConfig {
    type Target = CityConfig;

    fn deref(&self) -> &CityConfig {
        &self.config
    }
}
