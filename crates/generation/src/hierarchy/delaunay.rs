//! Incremental (Bowyer-Watson) Delaunay triangulation.
//!
//! Arithmetic runs in `f64`; the super-triangle spans twenty times the
//! input extent so hull edges survive its removal in practice.

use bevy::math::Vec2;

use super::Edge;

#[derive(Debug, Clone, Copy)]
struct Circumcircle {
    cx: f64,
    cy: f64,
    r2: f64,
}

impl Circumcircle {
    fn of(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Option<Self> {
        let d = 2.0 * (a.0 * (b.1 - c.1) + b.0 * (c.1 - a.1) + c.0 * (a.1 - b.1));
        if d.abs() < 1e-12 {
            return None;
        }
        let a2 = a.0 * a.0 + a.1 * a.1;
        let b2 = b.0 * b.0 + b.1 * b.1;
        let c2 = c.0 * c.0 + c.1 * c.1;
        let cx = (a2 * (b.1 - c.1) + b2 * (c.1 - a.1) + c2 * (a.1 - b.1)) / d;
        let cy = (a2 * (c.0 - b.0) + b2 * (a.0 - c.0) + c2 * (b.0 - a.0)) / d;
        let r2 = (a.0 - cx).powi(2) + (a.1 - cy).powi(2);
        Some(Self { cx, cy, r2 })
    }

    fn strictly_contains(&self, p: (f64, f64)) -> bool {
        let d2 = (p.0 - self.cx).powi(2) + (p.1 - self.cy).powi(2);
        d2 < self.r2
    }
}

#[derive(Debug, Clone, Copy)]
struct Working {
    v: [usize; 3],
    // `None` for a degenerate (collinear) triangle, which every later
    // point treats as containing it so it gets replaced.
    circle: Option<Circumcircle>,
}

impl Working {
    fn new(v: [usize; 3], verts: &[(f64, f64)]) -> Self {
        Self {
            v,
            circle: Circumcircle::of(verts[v[0]], verts[v[1]], verts[v[2]]),
        }
    }

    fn contains(&self, p: (f64, f64)) -> bool {
        self.circle.map_or(true, |c| c.strictly_contains(p))
    }
}

/// Triangulate `points`, returning index triples into `points`.
///
/// Exact duplicate points are ignored (only the first copy is used).
/// Fewer than three distinct points, or an all-collinear input, yields an
/// empty result.
pub fn triangulate(points: &[Vec2]) -> Vec<[usize; 3]> {
    let mut original: Vec<usize> = Vec::with_capacity(points.len());
    let mut verts: Vec<(f64, f64)> = Vec::with_capacity(points.len() + 3);
    for (i, p) in points.iter().enumerate() {
        let v = (p.x as f64, p.y as f64);
        if verts.iter().any(|q| *q == v) {
            continue;
        }
        original.push(i);
        verts.push(v);
    }
    let n = verts.len();
    if n < 3 {
        return Vec::new();
    }

    let (mut min_x, mut min_y) = (f64::MAX, f64::MAX);
    let (mut max_x, mut max_y) = (f64::MIN, f64::MIN);
    for &(x, y) in &verts {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    let d = (max_x - min_x).max(max_y - min_y).max(1.0);
    let (mx, my) = ((min_x + max_x) * 0.5, (min_y + max_y) * 0.5);
    verts.push((mx - 20.0 * d, my - d));
    verts.push((mx, my + 20.0 * d));
    verts.push((mx + 20.0 * d, my - d));

    let mut triangles = vec![Working::new([n, n + 1, n + 2], &verts)];

    for i in 0..n {
        let p = verts[i];
        let (bad, good): (Vec<Working>, Vec<Working>) =
            triangles.into_iter().partition(|t| t.contains(p));
        triangles = good;

        // Cavity boundary: edges belonging to exactly one removed triangle.
        let mut edges: Vec<Edge> = bad
            .iter()
            .flat_map(|t| {
                [
                    Edge::new(t.v[0], t.v[1]),
                    Edge::new(t.v[1], t.v[2]),
                    Edge::new(t.v[2], t.v[0]),
                ]
            })
            .collect();
        edges.sort_unstable();
        let mut boundary = Vec::new();
        let mut k = 0;
        while k < edges.len() {
            let mut run = 1;
            while k + run < edges.len() && edges[k + run] == edges[k] {
                run += 1;
            }
            if run == 1 {
                boundary.push(edges[k]);
            }
            k += run;
        }

        for e in boundary {
            triangles.push(Working::new([e.0, e.1, i], &verts));
        }
    }

    triangles
        .into_iter()
        .filter(|t| t.circle.is_some() && t.v.iter().all(|&v| v < n))
        .map(|t| [original[t.v[0]], original[t.v[1]], original[t.v[2]]])
        .collect()
}

/// Unique edges of a triangle list, sorted.
pub fn triangle_edges(triangles: &[[usize; 3]]) -> Vec<Edge> {
    let mut edges: Vec<Edge> = triangles
        .iter()
        .flat_map(|t| [Edge::new(t[0], t[1]), Edge::new(t[1], t[2]), Edge::new(t[2], t[0])])
        .collect();
    edges.sort_unstable();
    edges.dedup();
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city_rng::CityRng;
    use rand::Rng;

    fn random_points(seed: u64, n: usize) -> Vec<Vec2> {
        let mut rng = CityRng::from_seed_u64(seed);
        (0..n)
            .map(|_| Vec2::new(rng.0.gen_range(0.0..800.0), rng.0.gen_range(0.0..600.0)))
            .collect()
    }

    #[test]
    fn test_square_gives_two_triangles() {
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 90.0),
            Vec2::new(0.0, 100.0),
        ];
        let tris = triangulate(&pts);
        assert_eq!(tris.len(), 2);
        assert_eq!(triangle_edges(&tris).len(), 5);
    }

    #[test]
    fn test_empty_circumcircle_property() {
        for seed in [1, 2, 3] {
            let pts = random_points(seed, 40);
            let tris = triangulate(&pts);
            assert!(!tris.is_empty());
            for t in &tris {
                let v = |i: usize| (pts[i].x as f64, pts[i].y as f64);
                let Some(c) = Circumcircle::of(v(t[0]), v(t[1]), v(t[2])) else {
                    panic!("degenerate triangle survived: {t:?}");
                };
                for (j, p) in pts.iter().enumerate() {
                    if t.contains(&j) {
                        continue;
                    }
                    let d2 = (p.x as f64 - c.cx).powi(2) + (p.y as f64 - c.cy).powi(2);
                    assert!(
                        d2 >= c.r2 * (1.0 - 1e-9),
                        "point {j} inside circumcircle of {t:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_edges_connect_all_points() {
        let pts = random_points(9, 12);
        let edges = triangle_edges(&triangulate(&pts));
        for i in 0..pts.len() {
            assert!(edges.iter().any(|e| e.0 == i || e.1 == i), "point {i} isolated");
        }
    }

    #[test]
    fn test_duplicates_and_degenerate_input() {
        assert!(triangulate(&[]).is_empty());
        assert!(triangulate(&[Vec2::ZERO, Vec2::ONE]).is_empty());
        let collinear = [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(20.0, 0.0)];
        assert!(triangulate(&collinear).is_empty());

        let dup = [
            Vec2::new(0.0, 0.0),
            Vec2::new(50.0, 0.0),
            Vec2::new(50.0, 0.0),
            Vec2::new(25.0, 40.0),
        ];
        let tris = triangulate(&dup);
        assert_eq!(tris.len(), 1);
        assert!(!tris[0].contains(&2));
    }
}
