//! Bridson's blue-noise sampler.
//!
//! Accepted points are at least `radius` apart. A background grid with
//! cells of `radius / sqrt(2)` holds at most one point per cell, so a
//! candidate only needs checking against the 5x5 block of cells around it.

use std::f32::consts::TAU;

use bevy::math::{Rect, Vec2};
use rand::Rng;

use crate::config::POISSON_ATTEMPTS;

pub struct PoissonDiscSampler {
    bounds: Rect,
    radius: f32,
    attempts: usize,
}

impl PoissonDiscSampler {
    pub fn new(bounds: Rect, radius: f32) -> Self {
        Self::with_attempts(bounds, radius, POISSON_ATTEMPTS)
    }

    pub fn with_attempts(bounds: Rect, radius: f32, attempts: usize) -> Self {
        Self {
            bounds,
            radius,
            attempts,
        }
    }

    /// Sample up to `max_points` points. Stops early once the active list
    /// runs dry.
    pub fn sample<R: Rng>(&self, rng: &mut R, max_points: usize) -> Vec<Vec2> {
        let size = self.bounds.size();
        if max_points == 0 || self.radius <= 0.0 || size.x <= 0.0 || size.y <= 0.0 {
            return Vec::new();
        }

        let cell = self.radius / std::f32::consts::SQRT_2;
        let cols = (size.x / cell).ceil() as usize + 1;
        let rows = (size.y / cell).ceil() as usize + 1;
        let mut grid: Vec<Option<usize>> = vec![None; cols * rows];
        let cell_of = |p: Vec2| -> (usize, usize) {
            let local = p - self.bounds.min;
            (
                ((local.x / cell) as usize).min(cols - 1),
                ((local.y / cell) as usize).min(rows - 1),
            )
        };

        let mut points = Vec::new();
        let mut active = Vec::new();

        let first = Vec2::new(
            rng.gen_range(self.bounds.min.x..self.bounds.max.x),
            rng.gen_range(self.bounds.min.y..self.bounds.max.y),
        );
        let (cx, cy) = cell_of(first);
        grid[cy * cols + cx] = Some(0);
        points.push(first);
        active.push(0);

        let r2 = self.radius * self.radius;
        while !active.is_empty() && points.len() < max_points {
            let slot = rng.gen_range(0..active.len());
            let origin = points[active[slot]];
            let mut found = false;

            for _ in 0..self.attempts {
                let angle = rng.gen_range(0.0..TAU);
                let dist = rng.gen_range(self.radius..self.radius * 2.0);
                let candidate = origin + Vec2::from_angle(angle) * dist;
                if !self.bounds.contains(candidate) {
                    continue;
                }

                let (gx, gy) = cell_of(candidate);
                let clear = (gy.saturating_sub(2)..=(gy + 2).min(rows - 1)).all(|y| {
                    (gx.saturating_sub(2)..=(gx + 2).min(cols - 1)).all(|x| {
                        grid[y * cols + x].map_or(true, |i| points[i].distance_squared(candidate) >= r2)
                    })
                });
                if clear {
                    let index = points.len();
                    grid[gy * cols + gx] = Some(index);
                    points.push(candidate);
                    active.push(index);
                    found = true;
                    break;
                }
            }

            if !found {
                active.swap_remove(slot);
            }
        }

        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city_rng::CityRng;

    #[test]
    fn test_min_distance_holds() {
        for (seed, radius) in [(1u64, 20.0f32), (2, 35.0), (3, 8.0)] {
            let mut rng = CityRng::from_seed_u64(seed);
            let sampler = PoissonDiscSampler::new(Rect::new(0.0, 0.0, 400.0, 300.0), radius);
            let pts = sampler.sample(&mut rng.0, usize::MAX);
            assert!(pts.len() > 10);
            for i in 0..pts.len() {
                for j in (i + 1)..pts.len() {
                    let d = pts[i].distance(pts[j]);
                    assert!(d >= radius - 1e-3, "points {i} and {j} only {d} apart");
                }
            }
        }
    }

    #[test]
    fn test_respects_max_points_and_bounds() {
        let mut rng = CityRng::from_seed_u64(10);
        let bounds = Rect::new(100.0, 50.0, 500.0, 450.0);
        let pts = PoissonDiscSampler::new(bounds, 15.0).sample(&mut rng.0, 25);
        assert_eq!(pts.len(), 25);
        assert!(pts.iter().all(|p| bounds.contains(*p)));
    }

    #[test]
    fn test_fills_the_area() {
        // Bridson saturates the domain: no point of the canvas is far from every sample.
        let mut rng = CityRng::from_seed_u64(77);
        let bounds = Rect::new(0.0, 0.0, 300.0, 300.0);
        let radius = 25.0;
        let pts = PoissonDiscSampler::new(bounds, radius).sample(&mut rng.0, usize::MAX);
        for x in (10..300).step_by(40) {
            for y in (10..300).step_by(40) {
                let query = Vec2::new(x as f32, y as f32);
                let nearest = pts
                    .iter()
                    .map(|p| p.distance(query))
                    .fold(f32::MAX, f32::min);
                assert!(nearest < 3.0 * radius, "gap at {query:?}");
            }
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        let mut rng = CityRng::from_seed_u64(1);
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(PoissonDiscSampler::new(bounds, 10.0).sample(&mut rng.0, 0).is_empty());
        assert!(PoissonDiscSampler::new(bounds, 0.0).sample(&mut rng.0, 10).is_empty());
    }
}
