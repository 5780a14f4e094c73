use bevy::math::Vec2;

use super::Edge;

/// Disjoint-set forest with union by rank and path halving.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets holding `a` and `b`. Returns `false` if they were
    /// already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] = self.rank[ra].saturating_add(1);
            }
        }
        true
    }
}

/// Kruskal's algorithm over the complete Euclidean graph.
///
/// Returns exactly `n - 1` edges for `n >= 1` points (none for `n < 2`).
/// Equal-length candidates are taken in index order, so the result is
/// deterministic.
pub fn minimum_spanning_tree(points: &[Vec2]) -> Vec<Edge> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let mut candidates: Vec<(f32, Edge)> = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            candidates.push((points[i].distance_squared(points[j]), Edge(i, j)));
        }
    }
    candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut sets = UnionFind::new(n);
    let mut tree = Vec::with_capacity(n - 1);
    for (_, edge) in candidates {
        if sets.union(edge.0, edge.1) {
            tree.push(edge);
            if tree.len() == n - 1 {
                break;
            }
        }
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city_rng::CityRng;
    use rand::Rng;

    #[test]
    fn test_mst_has_n_minus_one_edges_and_spans() {
        let mut rng = CityRng::from_seed_u64(4);
        for n in [2usize, 3, 8, 20] {
            let pts: Vec<Vec2> = (0..n)
                .map(|_| Vec2::new(rng.0.gen_range(0.0..800.0), rng.0.gen_range(0.0..600.0)))
                .collect();
            let tree = minimum_spanning_tree(&pts);
            assert_eq!(tree.len(), n - 1);

            // n - 1 edges that join n nodes into one set form a tree:
            // connected, and hence acyclic.
            let mut sets = UnionFind::new(n);
            for e in &tree {
                assert!(sets.union(e.0, e.1), "cycle through {e:?}");
            }
            let root = sets.find(0);
            assert!((0..n).all(|i| sets.find(i) == root));
        }
    }

    #[test]
    fn test_mst_picks_short_edges() {
        // Two tight pairs far apart: the tree joins each pair, then bridges
        // them once.
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(101.0, 0.0),
        ];
        let tree = minimum_spanning_tree(&pts);
        assert!(tree.contains(&Edge(0, 1)));
        assert!(tree.contains(&Edge(2, 3)));
        assert!(tree.contains(&Edge(1, 2)));
    }

    #[test]
    fn test_mst_degenerate_inputs() {
        assert!(minimum_spanning_tree(&[]).is_empty());
        assert!(minimum_spanning_tree(&[Vec2::ONE]).is_empty());
        let same = [Vec2::ONE; 3];
        assert_eq!(minimum_spanning_tree(&same).len(), 2);
    }

    #[test]
    fn test_union_find() {
        let mut uf = UnionFind::new(5);
        assert!(uf.union(0, 1));
        assert!(uf.union(3, 4));
        assert!(!uf.union(1, 0));
        assert_ne!(uf.find(0), uf.find(3));
        assert!(uf.union(1, 4));
        assert_eq!(uf.find(0), uf.find(3));
    }
}
