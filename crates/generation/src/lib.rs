//! Procedural city layout engine.
//!
//! [`generate_city`] turns a validated [`CityConfig`] into a
//! [`CityBlueprint`]: terrain, water, a classed road network, buildings,
//! parks, landmarks and summary statistics. [`GenerationPlugin`] wires the
//! same pipeline into a Bevy app.

pub mod blueprint;
pub mod buildings;
pub mod city_config;
pub mod city_rng;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid_pathfinder;
pub mod hierarchy;
pub mod landmarks;
pub mod parks;
pub mod path_cost;
pub mod pipeline;
pub mod placement;
pub mod planarizer;
pub mod plugin;
pub mod poisson_disc;
pub mod road_index;
pub mod road_layout;
pub mod roads;
pub mod spatial_grid;
pub mod stats;
pub mod streamline;
pub mod tensor_field;
pub mod terrain;
pub mod water;

pub use blueprint::CityBlueprint;
pub use city_config::{BuildingStyle, CityConfig, CitySize, RoadPattern, ValidatedConfig};
pub use error::{ConfigError, GenerationError};
pub use pipeline::{generate_city, CancelToken};
pub use plugin::{
    CityGeneratedEvent, CurrentBlueprint, GenerateCityEvent, GenerationCancel, GenerationPlugin,
    GenerationState,
};
pub use roads::{RoadClass, RoadSegment};
