//! Layered-noise elevation field.
//!
//! Three OpenSimplex2 layers at different frequencies (base, detail and a
//! ridged mountain layer) are mixed with a radial bias that raises the
//! middle of the map into a gentle central hill. The field is sampled once
//! per [`ELEVATION_CELL_SIZE`] cell; queries use nearest-cell lookup.

use bevy::math::Vec2;
use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};

use crate::config::{
    ELEVATION_CELL_SIZE, NEUTRAL_ELEVATION, TERRAIN_BASE_FREQUENCY, TERRAIN_BASE_WEIGHT,
    TERRAIN_DETAIL_FREQUENCY, TERRAIN_DETAIL_WEIGHT, TERRAIN_MOUNTAIN_FREQUENCY,
    TERRAIN_MOUNTAIN_WEIGHT, TERRAIN_RADIAL_WEIGHT,
};

/// Elevation samples in `[0, 1]`, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainModel {
    cols: usize,
    rows: usize,
    cell_size: f32,
    elevations: Vec<f32>,
}

fn noise_layer(seed: i32, frequency: f32, fractal: Option<(FractalType, i32)>) -> FastNoiseLite {
    let mut noise = FastNoiseLite::with_seed(seed);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(frequency));
    if let Some((kind, octaves)) = fractal {
        noise.set_fractal_type(Some(kind));
        noise.set_fractal_octaves(Some(octaves));
    }
    noise
}

impl TerrainModel {
    /// Build the field for a `width` x `height` canvas.
    ///
    /// Deterministic: the same seed always yields identical samples.
    pub fn generate(width: f32, height: f32, seed: i32) -> Self {
        let cols = (width / ELEVATION_CELL_SIZE).ceil() as usize + 1;
        let rows = (height / ELEVATION_CELL_SIZE).ceil() as usize + 1;

        let base = noise_layer(seed, TERRAIN_BASE_FREQUENCY, Some((FractalType::FBm, 3)));
        let detail = noise_layer(seed.wrapping_add(101), TERRAIN_DETAIL_FREQUENCY, None);
        let mountain = noise_layer(
            seed.wrapping_add(202),
            TERRAIN_MOUNTAIN_FREQUENCY,
            Some((FractalType::Ridged, 2)),
        );

        let center = Vec2::new(width, height) * 0.5;
        let max_dist = center.length().max(1.0);

        let mut elevations = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                let x = col as f32 * ELEVATION_CELL_SIZE;
                let y = row as f32 * ELEVATION_CELL_SIZE;
                // Each layer outputs roughly [-1, 1]; normalize to [0, 1]
                let b = (base.get_noise_2d(x, y) + 1.0) * 0.5;
                let d = (detail.get_noise_2d(x, y) + 1.0) * 0.5;
                let m = (mountain.get_noise_2d(x, y) + 1.0) * 0.5;
                let radial = 1.0 - (Vec2::new(x, y).distance(center) / max_dist).min(1.0);

                let e = b * TERRAIN_BASE_WEIGHT
                    + d * TERRAIN_DETAIL_WEIGHT
                    + m * m * TERRAIN_MOUNTAIN_WEIGHT
                    + radial * TERRAIN_RADIAL_WEIGHT;
                elevations.push(e.clamp(0.0, 1.0));
            }
        }

        Self {
            cols,
            rows,
            cell_size: ELEVATION_CELL_SIZE,
            elevations,
        }
    }

    /// A constant field, handy for tests and flat-terrain baselines.
    pub fn flat(width: f32, height: f32, value: f32) -> Self {
        let cols = (width / ELEVATION_CELL_SIZE).ceil() as usize + 1;
        let rows = (height / ELEVATION_CELL_SIZE).ceil() as usize + 1;
        Self {
            cols,
            rows,
            cell_size: ELEVATION_CELL_SIZE,
            elevations: vec![value.clamp(0.0, 1.0); cols * rows],
        }
    }

    /// Build a field from a closure over each sample's world position.
    pub fn from_fn(width: f32, height: f32, f: impl Fn(Vec2) -> f32) -> Self {
        let mut model = Self::flat(width, height, 0.0);
        for row in 0..model.rows {
            for col in 0..model.cols {
                let p = Vec2::new(col as f32, row as f32) * model.cell_size;
                model.elevations[row * model.cols + col] = f(p).clamp(0.0, 1.0);
            }
        }
        model
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Raw cell lookup. Indices outside the field read as
    /// [`NEUTRAL_ELEVATION`].
    pub fn cell(&self, col: i64, row: i64) -> f32 {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return NEUTRAL_ELEVATION;
        }
        self.elevations[row as usize * self.cols + col as usize]
    }

    /// Elevation at a world position, from the nearest cell. Positions off
    /// the map clamp to the closest edge cell.
    pub fn elevation_at(&self, p: Vec2) -> f32 {
        let col = ((p.x / self.cell_size).round().max(0.0) as usize).min(self.cols - 1);
        let row = ((p.y / self.cell_size).round().max(0.0) as usize).min(self.rows - 1);
        self.elevations[row * self.cols + col]
    }
}
