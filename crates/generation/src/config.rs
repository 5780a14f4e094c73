//! Design constants for the layout engine.
//!
//! User-facing knobs live in [`crate::city_config::CityConfig`]; everything
//! here is tuned by hand and never exposed to callers.

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

pub const DEFAULT_CANVAS_WIDTH: f32 = 800.0;
pub const DEFAULT_CANVAS_HEIGHT: f32 = 600.0;
pub const MIN_CANVAS_EXTENT: f32 = 200.0;
pub const MAX_CANVAS_EXTENT: f32 = 4000.0;
pub const MAX_WATER_BODIES: u32 = 16;

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

/// World units covered by one elevation sample.
pub const ELEVATION_CELL_SIZE: f32 = 10.0;
/// Returned for cell lookups outside the field.
pub const NEUTRAL_ELEVATION: f32 = 0.5;
pub const TERRAIN_BASE_FREQUENCY: f32 = 0.004;
pub const TERRAIN_DETAIL_FREQUENCY: f32 = 0.03;
pub const TERRAIN_MOUNTAIN_FREQUENCY: f32 = 0.0025;
pub const TERRAIN_BASE_WEIGHT: f32 = 0.45;
pub const TERRAIN_DETAIL_WEIGHT: f32 = 0.1;
pub const TERRAIN_MOUNTAIN_WEIGHT: f32 = 0.25;
/// Share of the elevation taken by the central hill.
pub const TERRAIN_RADIAL_WEIGHT: f32 = 0.2;

// ---------------------------------------------------------------------------
// Pathfinding
// ---------------------------------------------------------------------------

/// Weight `k` in `distance + k * slope^2`. Empirical, not derived.
pub const SLOPE_COST_WEIGHT: f32 = 200_000.0;
pub const PATHFINDER_STEP: f32 = 10.0;
pub const PATHFINDER_MAX_EXPANSIONS: usize = 20_000;
/// Fixed-point scale for A* costs (`pathfinding` needs an `Ord` cost).
pub const PATH_COST_SCALE: f32 = 100.0;

// ---------------------------------------------------------------------------
// Streamlines
// ---------------------------------------------------------------------------

pub const STREAMLINE_STEP: f32 = 8.0;
pub const STREAMLINE_MAX_LENGTH: f32 = 320.0;
pub const STREAMLINE_SNAP_EPSILON: f32 = 6.0;
/// Maximum signed turn (radians) between consecutive streamline steps.
pub const STREAMLINE_MAX_TURN: f32 = 0.6;
pub const ORGANIC_FIELD_FREQUENCY: f32 = 0.004;
pub const FRACTAL_FIELD_FREQUENCY: f32 = 0.02;
pub const MIXED_BLEND_FREQUENCY: f32 = 0.003;
/// Distance scale for the logarithmic twist of the spiral field.
pub const SPIRAL_SCALE: f32 = 60.0;
pub const SPIRAL_TWIST: f32 = 0.45;

// ---------------------------------------------------------------------------
// Network cleanup
// ---------------------------------------------------------------------------

/// Roads whose endpoints are closer than this are dropped as stubs.
pub const MIN_STUB_LENGTH: f32 = 12.0;
/// Endpoint quantization used to detect duplicate edges.
pub const ENDPOINT_QUANTUM: f32 = 0.01;
/// Longest straight run covered by a single placement buffer box.
pub const BUFFER_SEGMENT_LENGTH: f32 = 20.0;
pub const SPATIAL_BUCKET_SIZE: f32 = 32.0;

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

pub const POISSON_ATTEMPTS: usize = 30;
pub const PARK_ATTEMPTS: usize = 50;
pub const LANDMARK_ATTEMPTS: usize = 50;
pub const SPECIAL_BUILDING_CHANCE: f64 = 0.05;
pub const FOUNTAIN_CHANCE: f64 = 0.2;
pub const PLAYGROUND_CHANCE: f64 = 0.3;
