use bevy::math::Vec2;

use crate::config::SLOPE_COST_WEIGHT;
use crate::terrain::TerrainModel;

/// Traversal cost between two points on the terrain:
/// `distance + k * slope^2`, with `slope = |dz| / distance`.
///
/// The squared slope term makes steep climbs disproportionately expensive,
/// so routed roads bend along contours instead of climbing straight over
/// hills.
#[derive(Debug, Clone, Copy)]
pub struct PathCostModel<'a> {
    terrain: &'a TerrainModel,
    slope_weight: f32,
}

impl<'a> PathCostModel<'a> {
    pub fn new(terrain: &'a TerrainModel) -> Self {
        Self::with_slope_weight(terrain, SLOPE_COST_WEIGHT)
    }

    pub fn with_slope_weight(terrain: &'a TerrainModel, slope_weight: f32) -> Self {
        Self {
            terrain,
            slope_weight,
        }
    }

    /// Cost of the direct hop `a -> b`. Always `>= 0`; zero for coincident
    /// points.
    pub fn cost(&self, a: Vec2, b: Vec2) -> f32 {
        let d = a.distance(b);
        if d <= f32::EPSILON {
            return 0.0;
        }
        let dz = (self.terrain.elevation_at(b) - self.terrain.elevation_at(a)).abs();
        let slope = dz / d;
        d + self.slope_weight * slope * slope
    }

    /// Sum of hop costs along a polyline.
    pub fn route_cost(&self, points: &[Vec2]) -> f32 {
        points.windows(2).map(|w| self.cost(w[0], w[1])).sum()
    }

    /// Cost of the straight segment `a -> b` walked in hops of at most
    /// `step`, the same resolution the grid pathfinder moves at.
    pub fn straight_route_cost(&self, a: Vec2, b: Vec2, step: f32) -> f32 {
        let pieces = ((a.distance(b) / step).ceil() as usize).max(1);
        (0..pieces)
            .map(|i| {
                let p0 = a.lerp(b, i as f32 / pieces as f32);
                let p1 = a.lerp(b, (i + 1) as f32 / pieces as f32);
                self.cost(p0, p1)
            })
            .sum()
    }
}
