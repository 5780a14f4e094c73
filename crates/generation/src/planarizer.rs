//! Road network cleanup, run once after every class has been laid down.
//!
//! Three passes, each idempotent:
//!
//! 1. drop duplicate roads (same endpoint pair in either direction),
//!    keeping the first, which is the higher class since roads are added
//!    highest class first
//! 2. drop stubs whose polyline is shorter than [`MIN_STUB_LENGTH`], and
//!    collapse repeated consecutive points
//! 3. smooth interior points with a 1-2-1 kernel; endpoints never move
//!
//! Smoothing shortens zig-zag roads, so the stub pass runs again after it.

use std::collections::HashSet;

use bevy::math::Vec2;

use crate::config::{ENDPOINT_QUANTUM, MIN_STUB_LENGTH};
use crate::roads::RoadSegment;

/// What one planarizer run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanarizeReport {
    pub duplicates_removed: usize,
    pub stubs_removed: usize,
    pub points_collapsed: usize,
    pub smoothed: usize,
}

impl PlanarizeReport {
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

type QuantizedPoint = (i64, i64);

fn quantize(p: Vec2) -> QuantizedPoint {
    (
        (p.x / ENDPOINT_QUANTUM).round() as i64,
        (p.y / ENDPOINT_QUANTUM).round() as i64,
    )
}

fn endpoint_key(road: &RoadSegment) -> (QuantizedPoint, QuantizedPoint) {
    let a = quantize(road.start());
    let b = quantize(road.end());
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Pass 1. Returns how many roads were removed.
pub fn remove_duplicates(roads: &mut Vec<RoadSegment>) -> usize {
    let before = roads.len();
    let mut seen = HashSet::with_capacity(roads.len());
    roads.retain(|r| seen.insert(endpoint_key(r)));
    before - roads.len()
}

/// Pass 2. Returns `(roads removed, points collapsed)`.
pub fn remove_stubs(roads: &mut Vec<RoadSegment>) -> (usize, usize) {
    let mut collapsed = 0;
    for road in roads.iter_mut() {
        let n = road.polyline.len();
        road.polyline.dedup();
        collapsed += n - road.polyline.len();
    }
    let before = roads.len();
    roads.retain(|r| r.polyline.len() >= 2 && r.length() >= MIN_STUB_LENGTH);
    (before - roads.len(), collapsed)
}

/// Weighted average of each interior point with its neighbors
/// (0.25 / 0.5 / 0.25).
pub fn smooth_polyline(points: &[Vec2]) -> Vec<Vec2> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut out = Vec::with_capacity(points.len());
    out.push(points[0]);
    for w in points.windows(3) {
        out.push(w[0] * 0.25 + w[1] * 0.5 + w[2] * 0.25);
    }
    out.push(points[points.len() - 1]);
    out
}

/// Pass 3. Each road is smoothed at most once. Returns how many roads were
/// smoothed.
pub fn smooth_roads(roads: &mut [RoadSegment]) -> usize {
    let mut count = 0;
    for road in roads.iter_mut().filter(|r| !r.smoothed) {
        road.smoothed = true;
        if road.polyline.len() < 3 {
            continue;
        }
        road.polyline = smooth_polyline(&road.polyline);
        road.polyline.dedup();
        count += 1;
    }
    count
}

/// Run all three passes in order, then the stub pass once more.
pub fn planarize(roads: &mut Vec<RoadSegment>) -> PlanarizeReport {
    let duplicates_removed = remove_duplicates(roads);
    let (stubs_removed, points_collapsed) = remove_stubs(roads);
    let smoothed = smooth_roads(roads);
    let (late_stubs, late_collapsed) = remove_stubs(roads);
    PlanarizeReport {
        duplicates_removed,
        stubs_removed: stubs_removed + late_stubs,
        points_collapsed: points_collapsed + late_collapsed,
        smoothed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roads::RoadClass;

    fn road(class: RoadClass, pts: &[(f32, f32)]) -> RoadSegment {
        RoadSegment::new(
            class,
            pts.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
            6.0,
        )
        .expect("at least two points")
    }

    fn messy_network() -> Vec<RoadSegment> {
        vec![
            road(RoadClass::Highway, &[(0.0, 0.0), (50.0, 20.0), (100.0, 0.0)]),
            road(RoadClass::Arterial, &[(100.0, 0.0), (0.0, 0.0)]),
            road(RoadClass::Collector, &[(200.0, 200.0), (205.0, 203.0)]),
            road(
                RoadClass::Local,
                &[(10.0, 300.0), (10.0, 300.0), (60.0, 340.0), (120.0, 310.0), (180.0, 360.0)],
            ),
            road(RoadClass::Local, &[(400.0, 400.0), (400.0, 400.0)]),
        ]
    }

    #[test]
    fn test_reverse_duplicate_keeps_higher_class() {
        let mut roads = messy_network();
        let removed = remove_duplicates(&mut roads);
        assert_eq!(removed, 1);
        assert_eq!(roads[0].class, RoadClass::Highway);
        assert!(roads.iter().all(|r| r.class != RoadClass::Arterial));
    }

    #[test]
    fn test_stubs_removed() {
        let mut roads = messy_network();
        let (removed, collapsed) = remove_stubs(&mut roads);
        assert_eq!(removed, 2); // the 5.8-unit collector and the zero-length local
        assert_eq!(collapsed, 2);
        assert!(roads.iter().all(|r| r.length() >= MIN_STUB_LENGTH));
    }

    #[test]
    fn test_long_curved_road_with_close_ends_survives() {
        // U-turn: 210 units of road, endpoints only 10 apart.
        let u_turn = road(
            RoadClass::Local,
            &[(0.0, 0.0), (0.0, 100.0), (10.0, 100.0), (10.0, 0.0)],
        );
        assert!(u_turn.start().distance(u_turn.end()) < MIN_STUB_LENGTH);

        let mut roads = vec![u_turn.clone()];
        assert_eq!(remove_stubs(&mut roads), (0, 0));
        assert_eq!(roads.len(), 1);

        let report = planarize(&mut roads);
        assert_eq!(report.stubs_removed, 0);
        assert_eq!(roads.len(), 1);
        assert_eq!(roads[0].start(), u_turn.start());
        assert_eq!(roads[0].end(), u_turn.end());
    }

    #[test]
    fn test_road_shortened_by_smoothing_is_removed() {
        // Zig-zag of length ~14.4 smooths down to length 9.
        let mut roads = vec![road(
            RoadClass::Local,
            &[(0.0, 0.0), (2.0, 3.0), (4.0, 0.0), (6.0, 3.0), (8.0, 0.0)],
        )];
        assert!(roads[0].length() >= MIN_STUB_LENGTH);

        let first = planarize(&mut roads);
        assert_eq!(first.smoothed, 1);
        assert_eq!(first.stubs_removed, 1);
        assert!(roads.is_empty());
        assert!(planarize(&mut roads).is_noop());
    }

    #[test]
    fn test_smoothing_preserves_endpoints() {
        let original = road(
            RoadClass::Local,
            &[(0.0, 0.0), (10.0, 40.0), (20.0, 0.0), (30.0, 40.0)],
        );
        let mut roads = vec![original.clone()];
        assert_eq!(smooth_roads(&mut roads), 1);
        let smoothed = &roads[0];
        assert_eq!(smoothed.start(), original.start());
        assert_eq!(smoothed.end(), original.end());
        assert_eq!(smoothed.polyline[1], Vec2::new(10.0, 20.0));
        assert!(smoothed.smoothed);
    }

    #[test]
    fn test_planarize_is_idempotent() {
        let mut roads = messy_network();
        let first = planarize(&mut roads);
        assert!(!first.is_noop());
        let snapshot = roads.clone();

        let second = planarize(&mut roads);
        assert!(second.is_noop(), "second run changed something: {second:?}");
        assert_eq!(roads, snapshot);
    }

    #[test]
    fn test_empty_network() {
        let mut roads = Vec::new();
        assert!(planarize(&mut roads).is_noop());
    }
}
