//! Road skeleton: which nodes connect, per road class.
//!
//! - highways: Delaunay triangulation over the four canvas-edge midpoints
//!   plus a few interior nodes
//! - arterials: minimum spanning tree over random nodes
//! - collectors: bounded k-nearest-neighbor graph over denser random nodes
//!
//! Only topology is decided here; edge shapes (straight, routed or traced)
//! are chosen by the road layout.

mod delaunay;
mod knn;
mod spanning_tree;

pub use delaunay::{triangle_edges, triangulate};
pub use knn::k_nearest_edges;
pub use spanning_tree::{minimum_spanning_tree, UnionFind};

use bevy::math::{Rect, Vec2};
use rand::Rng;

use crate::city_config::SizeProfile;
use crate::city_rng::uniform;

/// Undirected edge between two node indices, stored low index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge(pub usize, pub usize);

impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Edge(a, b)
        } else {
            Edge(b, a)
        }
    }
}

/// Nodes plus the edges joining them for one road class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassGraph {
    pub nodes: Vec<Vec2>,
    pub edges: Vec<Edge>,
}

impl ClassGraph {
    /// Endpoint pairs of every edge.
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.edges
            .iter()
            .map(|e| (self.nodes[e.0], self.nodes[e.1]))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skeleton {
    pub highways: ClassGraph,
    pub arterials: ClassGraph,
    pub collectors: ClassGraph,
}

/// Four canvas-edge midpoints followed by `interior` random nodes.
pub fn highway_nodes<R: Rng>(rng: &mut R, bounds: Rect, interior: usize) -> Vec<Vec2> {
    let c = bounds.center();
    let mut nodes = vec![
        Vec2::new(c.x, bounds.min.y),
        Vec2::new(bounds.max.x, c.y),
        Vec2::new(c.x, bounds.max.y),
        Vec2::new(bounds.min.x, c.y),
    ];
    nodes.extend(random_nodes(rng, bounds.inflate(-bounds.size().min_element() * 0.15), interior));
    nodes
}

/// `count` nodes uniform in `area`.
pub fn random_nodes<R: Rng>(rng: &mut R, area: Rect, count: usize) -> Vec<Vec2> {
    (0..count)
        .map(|_| {
            Vec2::new(
                uniform(rng, area.min.x, area.max.x),
                uniform(rng, area.min.y, area.max.y),
            )
        })
        .collect()
}

/// Build all three graph-based classes for a canvas.
pub fn build_skeleton<R: Rng>(rng: &mut R, bounds: Rect, profile: &SizeProfile) -> Skeleton {
    let inner = bounds.inflate(-profile.grid_spacing * 0.25);

    let nodes = highway_nodes(rng, bounds, profile.interior_highway_nodes);
    let highways = ClassGraph {
        edges: triangle_edges(&triangulate(&nodes)),
        nodes,
    };

    let nodes = random_nodes(rng, inner, profile.arterial_nodes);
    let arterials = ClassGraph {
        edges: minimum_spanning_tree(&nodes),
        nodes,
    };

    let nodes = random_nodes(rng, inner, profile.collector_nodes);
    let collectors = ClassGraph {
        edges: k_nearest_edges(&nodes, profile.collector_k, profile.grid_spacing * 2.5),
        nodes,
    };

    Skeleton {
        highways,
        arterials,
        collectors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city_config::CitySize;
    use crate::city_rng::CityRng;

    #[test]
    fn test_edge_is_normalized() {
        assert_eq!(Edge::new(5, 2), Edge(2, 5));
        assert_eq!(Edge::new(2, 5), Edge::new(5, 2));
    }

    #[test]
    fn test_highway_nodes_start_with_edge_midpoints() {
        let mut rng = CityRng::from_seed_u64(1);
        let bounds = Rect::new(0.0, 0.0, 800.0, 600.0);
        let nodes = highway_nodes(&mut rng.0, bounds, 3);
        assert_eq!(nodes.len(), 7);
        assert_eq!(nodes[0], Vec2::new(400.0, 0.0));
        assert_eq!(nodes[1], Vec2::new(800.0, 300.0));
        assert_eq!(nodes[2], Vec2::new(400.0, 600.0));
        assert_eq!(nodes[3], Vec2::new(0.0, 300.0));
        assert!(nodes[4..].iter().all(|p| bounds.contains(*p)));
    }

    #[test]
    fn test_skeleton_class_sizes() {
        let mut rng = CityRng::from_seed_u64(12);
        let profile = SizeProfile::for_size(CitySize::Medium);
        let skeleton = build_skeleton(&mut rng.0, Rect::new(0.0, 0.0, 800.0, 600.0), &profile);

        assert_eq!(skeleton.highways.nodes.len(), 4 + profile.interior_highway_nodes);
        assert!(skeleton.highways.edges.len() >= skeleton.highways.nodes.len() - 1);
        assert_eq!(skeleton.arterials.edges.len(), profile.arterial_nodes - 1);
        assert_eq!(skeleton.collectors.nodes.len(), profile.collector_nodes);
        assert!(!skeleton.collectors.edges.is_empty());
        let cutoff = profile.grid_spacing * 2.5;
        assert!(skeleton.collectors.segments().all(|(a, b)| a.distance(b) <= cutoff + 1e-3));
    }

    #[test]
    fn test_skeleton_is_deterministic() {
        let bounds = Rect::new(0.0, 0.0, 800.0, 600.0);
        let profile = SizeProfile::for_size(CitySize::Large);
        let a = build_skeleton(&mut CityRng::from_seed_u64(3).0, bounds, &profile);
        let b = build_skeleton(&mut CityRng::from_seed_u64(3).0, bounds, &profile);
        assert_eq!(a, b);
    }
}
