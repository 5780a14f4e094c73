use bevy::math::{Rect, Vec2};

use crate::config::SPATIAL_BUCKET_SIZE;
use crate::geometry::{closest_point_on_segment, segment_bounds};
use crate::spatial_grid::SpatialGrid;

/// Bucketed index over the straight pieces of every road traced so far.
///
/// Answers "is there a road within `eps` of this point, and where" without
/// scanning the whole network.
#[derive(Debug, Clone)]
pub struct RoadIndex {
    grid: SpatialGrid,
    pieces: Vec<(Vec2, Vec2)>,
}

impl RoadIndex {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            grid: SpatialGrid::new(width, height, SPATIAL_BUCKET_SIZE),
            pieces: Vec::new(),
        }
    }

    pub fn insert_polyline(&mut self, points: &[Vec2]) {
        for w in points.windows(2) {
            let id = self.pieces.len() as u32;
            self.pieces.push((w[0], w[1]));
            self.grid.insert(id, segment_bounds(w[0], w[1]));
        }
    }

    /// Closest road point within `eps` of `p`, if any.
    pub fn nearest_within(&self, p: Vec2, eps: f32) -> Option<Vec2> {
        let area = Rect::from_center_half_size(p, Vec2::splat(eps));
        let mut best: Option<(Vec2, f32)> = None;
        for id in self.grid.query_rect(area) {
            let (a, b) = self.pieces[id as usize];
            let q = closest_point_on_segment(p, a, b);
            let d = q.distance(p);
            if d <= eps && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((q, d));
            }
        }
        best.map(|(q, _)| q)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}
