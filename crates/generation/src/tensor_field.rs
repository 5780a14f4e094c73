//! Orientation fields that steer streamline roads.
//!
//! Every position gets a pair of orthonormal directions: `major` and
//! `minor = major.perp()`. Each road pattern has its own field; the tracer
//! only ever sees [`TensorField::orientation_at`].

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::math::Vec2;
use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};

use crate::city_config::RoadPattern;
use crate::config::{
    FRACTAL_FIELD_FREQUENCY, MIXED_BLEND_FREQUENCY, ORGANIC_FIELD_FREQUENCY, SPIRAL_SCALE,
    SPIRAL_TWIST,
};

/// Orthonormal direction pair at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tensor {
    pub major: Vec2,
    pub minor: Vec2,
}

impl Tensor {
    pub fn from_angle(theta: f32) -> Self {
        Self::from_major(Vec2::from_angle(theta))
    }

    /// Degenerate input falls back to the x axis.
    pub fn from_major(major: Vec2) -> Self {
        let major = major.try_normalize().unwrap_or(Vec2::X);
        Self {
            major,
            minor: major.perp(),
        }
    }
}

pub enum TensorField {
    /// Constant axis-aligned directions.
    Grid,
    Organic { noise: FastNoiseLite },
    /// Major axis points away from the center.
    Radial { center: Vec2 },
    /// Major axis angle grows logarithmically with distance from the center.
    Spiral { center: Vec2 },
    Fractal { noise: FastNoiseLite },
    /// Grid blended toward organic by a slow noise factor.
    Mixed {
        noise: FastNoiseLite,
        blend: FastNoiseLite,
    },
}

fn angle_noise(seed: i32, frequency: f32) -> FastNoiseLite {
    let mut noise = FastNoiseLite::with_seed(seed);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(frequency));
    noise
}

impl TensorField {
    pub fn for_pattern(pattern: RoadPattern, center: Vec2, seed: i32) -> Self {
        match pattern {
            RoadPattern::Grid => TensorField::Grid,
            RoadPattern::Organic => TensorField::Organic {
                noise: angle_noise(seed, ORGANIC_FIELD_FREQUENCY),
            },
            RoadPattern::Radial => TensorField::Radial { center },
            RoadPattern::Spiral => TensorField::Spiral { center },
            RoadPattern::Fractal => {
                let mut noise = angle_noise(seed, FRACTAL_FIELD_FREQUENCY);
                noise.set_fractal_type(Some(FractalType::FBm));
                noise.set_fractal_octaves(Some(3));
                TensorField::Fractal { noise }
            }
            RoadPattern::Mixed => TensorField::Mixed {
                noise: angle_noise(seed, ORGANIC_FIELD_FREQUENCY),
                blend: angle_noise(seed.wrapping_add(1), MIXED_BLEND_FREQUENCY),
            },
        }
    }

    pub fn orientation_at(&self, p: Vec2) -> Tensor {
        match self {
            TensorField::Grid => Tensor::from_major(Vec2::X),
            TensorField::Organic { noise } | TensorField::Fractal { noise } => {
                Tensor::from_angle(noise.get_noise_2d(p.x, p.y) * PI)
            }
            TensorField::Radial { center } => Tensor::from_major(p - *center),
            TensorField::Spiral { center } => {
                let offset = p - *center;
                let r = offset.length();
                let theta = offset.y.atan2(offset.x);
                Tensor::from_angle(theta + FRAC_PI_2 + (1.0 + r / SPIRAL_SCALE).ln() * SPIRAL_TWIST)
            }
            TensorField::Mixed { noise, blend } => {
                let mut organic = Vec2::from_angle(noise.get_noise_2d(p.x, p.y) * PI);
                // Directions are sign-free; keep both on the same side so the
                // blend never passes through zero.
                if organic.dot(Vec2::X) < 0.0 {
                    organic = -organic;
                }
                let t = (blend.get_noise_2d(p.x, p.y) + 1.0) * 0.5;
                Tensor::from_major(Vec2::X.lerp(organic, t.clamp(0.0, 1.0)))
            }
        }
    }
}
