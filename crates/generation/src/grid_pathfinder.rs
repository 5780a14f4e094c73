//! Terrain-aware A* over an implicit 8-connected lattice.
//!
//! Lattice nodes sit every `step` world units. Edge costs come from
//! [`PathCostModel`] and are scaled into fixed-point `u32` because
//! `pathfinding::astar` needs an `Ord` cost. The heuristic is Manhattan
//! distance, which is not admissible for diagonal moves or the slope term;
//! routes only need to look plausible.
//!
//! Failure is never fatal: an exhausted frontier, a blown expansion budget,
//! a cancelled run, or a route that costs more than going straight all
//! yield the two-point fallback `[from, to]`.

use std::cell::Cell;

use bevy::log::debug;
use bevy::math::{Rect, Vec2};
use pathfinding::prelude::astar;

use crate::config::{PATHFINDER_MAX_EXPANSIONS, PATHFINDER_STEP, PATH_COST_SCALE};
use crate::path_cost::PathCostModel;
use crate::pipeline::CancelToken;

type LatticeCell = (i32, i32);

const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub struct GridPathfinder<'a> {
    cost: PathCostModel<'a>,
    step: f32,
    max_expansions: usize,
    min_cell: LatticeCell,
    max_cell: LatticeCell,
}

impl<'a> GridPathfinder<'a> {
    pub fn new(cost: PathCostModel<'a>, bounds: Rect) -> Self {
        Self::with_params(cost, bounds, PATHFINDER_STEP, PATHFINDER_MAX_EXPANSIONS)
    }

    pub fn with_params(
        cost: PathCostModel<'a>,
        bounds: Rect,
        step: f32,
        max_expansions: usize,
    ) -> Self {
        Self {
            cost,
            step,
            max_expansions,
            min_cell: (
                (bounds.min.x / step).ceil() as i32,
                (bounds.min.y / step).ceil() as i32,
            ),
            max_cell: (
                (bounds.max.x / step).floor() as i32,
                (bounds.max.y / step).floor() as i32,
            ),
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Route from `from` to `to`. The result always starts at `from` and
    /// ends at `to` exactly, and its cost never exceeds the straight route
    /// sampled at the lattice step.
    pub fn find_path(&self, from: Vec2, to: Vec2, cancel: &CancelToken) -> Vec<Vec2> {
        let fallback = vec![from, to];
        let start = self.cell_of(from);
        let goal = self.cell_of(to);
        if start == goal || cancel.is_cancelled() {
            return fallback;
        }

        let expansions = Cell::new(0usize);
        let result = astar(
            &start,
            |&cell| {
                let n = expansions.get() + 1;
                expansions.set(n);
                if n > self.max_expansions || cancel.is_cancelled() {
                    // Starve the frontier so the search winds down
                    return Vec::new();
                }
                self.successors(cell)
            },
            |&cell| self.heuristic(cell, goal),
            |&cell| cell == goal,
        );

        let Some((cells, _)) = result else {
            debug!(
                "A* found no route after {} expansions, using straight fallback",
                expansions.get()
            );
            return fallback;
        };

        let mut points: Vec<Vec2> = cells.into_iter().map(|c| self.world_of(c)).collect();
        if let Some(first) = points.first_mut() {
            *first = from;
        }
        if let Some(last) = points.last_mut() {
            *last = to;
        }

        let routed = self.cost.route_cost(&points);
        let straight = self.cost.straight_route_cost(from, to, self.step);
        if routed > straight {
            return fallback;
        }
        points
    }

    fn successors(&self, cell: LatticeCell) -> Vec<(LatticeCell, u32)> {
        let here = self.world_of(cell);
        NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dx, dy)| (cell.0 + dx, cell.1 + dy))
            .filter(|&n| self.in_lattice(n))
            .map(|n| {
                let c = self.cost.cost(here, self.world_of(n));
                (n, (c * PATH_COST_SCALE).round() as u32)
            })
            .collect()
    }

    fn heuristic(&self, a: LatticeCell, b: LatticeCell) -> u32 {
        let dx = (a.0 - b.0).unsigned_abs();
        let dy = (a.1 - b.1).unsigned_abs();
        ((dx + dy) as f32 * self.step * PATH_COST_SCALE).round() as u32
    }

    fn in_lattice(&self, c: LatticeCell) -> bool {
        c.0 >= self.min_cell.0
            && c.0 <= self.max_cell.0
            && c.1 >= self.min_cell.1
            && c.1 <= self.max_cell.1
    }

    fn cell_of(&self, p: Vec2) -> LatticeCell {
        (
            ((p.x / self.step).round() as i32).clamp(self.min_cell.0, self.max_cell.0),
            ((p.y / self.step).round() as i32).clamp(self.min_cell.1, self.max_cell.1),
        )
    }

    fn world_of(&self, c: LatticeCell) -> Vec2 {
        Vec2::new(c.0 as f32, c.1 as f32) * self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::TerrainModel;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 400.0, 300.0)
    }

    /// Flat ground with a sheer plateau centered at (200, 150).
    fn plateau() -> TerrainModel {
        TerrainModel::from_fn(400.0, 300.0, |p| {
            if p.distance(Vec2::new(200.0, 150.0)) < 40.0 {
                1.0
            } else {
                0.0
            }
        })
    }

    #[test]
    fn test_routes_around_steep_plateau() {
        let terrain = plateau();
        let cost = PathCostModel::new(&terrain);
        let finder = GridPathfinder::new(cost, bounds());
        let from = Vec2::new(100.0, 150.0);
        let to = Vec2::new(300.0, 150.0);

        let path = finder.find_path(from, to, &CancelToken::new());
        assert!(path.len() > 2, "expected a routed path, got fallback");
        assert_eq!(path.first(), Some(&from));
        assert_eq!(path.last(), Some(&to));
        assert!(path.iter().all(|p| terrain.elevation_at(*p) == 0.0));
        assert!(cost.route_cost(&path) < cost.straight_route_cost(from, to, finder.step()));
    }

    #[test]
    fn test_cost_never_exceeds_straight_route() {
        let terrain = TerrainModel::generate(400.0, 300.0, 17);
        let cost = PathCostModel::new(&terrain);
        let finder = GridPathfinder::new(cost, bounds());
        let pairs = [
            (Vec2::new(0.0, 0.0), Vec2::new(400.0, 300.0)),
            (Vec2::new(20.0, 280.0), Vec2::new(390.0, 40.0)),
            (Vec2::new(200.0, 0.0), Vec2::new(200.0, 300.0)),
        ];
        for (from, to) in pairs {
            let path = finder.find_path(from, to, &CancelToken::new());
            let is_fallback = path == vec![from, to];
            assert!(
                is_fallback
                    || cost.route_cost(&path) <= cost.straight_route_cost(from, to, finder.step()),
                "route {from:?} -> {to:?} costs more than going straight"
            );
        }
    }

    #[test]
    fn test_exhausted_budget_falls_back() {
        let terrain = plateau();
        let cost = PathCostModel::new(&terrain);
        let finder = GridPathfinder::with_params(cost, bounds(), PATHFINDER_STEP, 3);
        let from = Vec2::new(100.0, 150.0);
        let to = Vec2::new(300.0, 150.0);
        assert_eq!(finder.find_path(from, to, &CancelToken::new()), vec![from, to]);
    }

    #[test]
    fn test_cancelled_search_falls_back() {
        let terrain = plateau();
        let finder = GridPathfinder::new(PathCostModel::new(&terrain), bounds());
        let cancel = CancelToken::new();
        cancel.cancel();
        let from = Vec2::new(100.0, 150.0);
        let to = Vec2::new(300.0, 150.0);
        assert_eq!(finder.find_path(from, to, &cancel), vec![from, to]);
    }

    #[test]
    fn test_same_cell_is_two_point_segment() {
        let terrain = TerrainModel::flat(400.0, 300.0, 0.5);
        let finder = GridPathfinder::new(PathCostModel::new(&terrain), bounds());
        let from = Vec2::new(50.0, 50.0);
        let to = Vec2::new(52.0, 51.0);
        assert_eq!(finder.find_path(from, to, &CancelToken::new()), vec![from, to]);
    }
}
