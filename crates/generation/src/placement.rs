use bevy::math::Rect;
use rand::Rng;

use crate::config::SPATIAL_BUCKET_SIZE;
use crate::geometry::{rect_contains_rect, rects_overlap};
use crate::roads::RoadSegment;
use crate::spatial_grid::SpatialGrid;
use crate::water::WaterBody;

/// Accepts or rejects candidate footprints against everything already on
/// the map: road buffers, water bounds, and previously accepted
/// footprints.
///
/// A footprint is only checked when it is placed; nothing is re-validated
/// afterwards.
pub struct PlacementValidator {
    bounds: Rect,
    grid: SpatialGrid,
    obstacles: Vec<Rect>,
}

impl PlacementValidator {
    pub fn new(bounds: Rect, roads: &[RoadSegment], water: &[WaterBody]) -> Self {
        let size = bounds.size();
        let mut validator = Self {
            bounds,
            grid: SpatialGrid::new(size.x, size.y, SPATIAL_BUCKET_SIZE),
            obstacles: Vec::new(),
        };
        for road in roads {
            for b in road.buffered_boxes() {
                validator.add_obstacle(b);
            }
        }
        for body in water {
            validator.add_obstacle(body.bounds());
        }
        validator
    }

    fn add_obstacle(&mut self, r: Rect) {
        let id = self.obstacles.len() as u32;
        self.obstacles.push(r);
        self.grid.insert(id, r);
    }

    /// `Some(footprint)` if it lies on the canvas and overlaps nothing.
    pub fn try_place(&self, footprint: Rect) -> Option<Rect> {
        if !rect_contains_rect(&self.bounds, &footprint) {
            return None;
        }
        let blocked = self
            .grid
            .query_rect(footprint)
            .into_iter()
            .any(|id| rects_overlap(&self.obstacles[id as usize], &footprint));
        (!blocked).then_some(footprint)
    }

    /// Reserve an accepted footprint so later candidates avoid it.
    pub fn occupy(&mut self, footprint: Rect) {
        self.add_obstacle(footprint);
    }

    /// Draw up to `attempts` candidates from `make`; the first accepted one
    /// is occupied and returned. `None` once the budget is spent.
    pub fn place_with_retries<R, F>(
        &mut self,
        rng: &mut R,
        attempts: usize,
        mut make: F,
    ) -> Option<Rect>
    where
        R: Rng,
        F: FnMut(&mut R) -> Rect,
    {
        for _ in 0..attempts {
            if let Some(footprint) = self.try_place(make(rng)) {
                self.occupy(footprint);
                return Some(footprint);
            }
        }
        None
    }
}
