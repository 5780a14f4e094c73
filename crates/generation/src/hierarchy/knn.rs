use std::collections::BTreeSet;

use bevy::math::Vec2;

use super::Edge;

/// Link every point to its `k` nearest peers within `max_dist`.
///
/// Edges are undirected: a mutual nearest-neighbor pair yields one edge.
/// Ties on distance go to the lower index.
pub fn k_nearest_edges(points: &[Vec2], k: usize, max_dist: f32) -> Vec<Edge> {
    let max_d2 = max_dist * max_dist;
    let mut edges = BTreeSet::new();
    let mut near: Vec<(f32, usize)> = Vec::new();

    for (i, p) in points.iter().enumerate() {
        near.clear();
        near.extend(
            points
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(j, q)| (p.distance_squared(*q), j))
                .filter(|&(d2, _)| d2 <= max_d2),
        );
        near.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        for &(_, j) in near.iter().take(k) {
            edges.insert(Edge::new(i, j));
        }
    }

    edges.into_iter().collect()
}
