//! Small 2D helpers shared by the road and placement stages.

use bevy::math::{Rect, Vec2};

/// Strict overlap test: rectangles that only touch along an edge do not
/// overlap.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

/// Whether `inner` lies entirely inside `outer` (edges may touch).
pub fn rect_contains_rect(outer: &Rect, inner: &Rect) -> bool {
    inner.min.x >= outer.min.x
        && inner.min.y >= outer.min.y
        && inner.max.x <= outer.max.x
        && inner.max.y <= outer.max.y
}

/// Total arc length of a polyline.
pub fn polyline_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Closest point to `p` on the segment `a..b`.
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < f32::EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Signed turn angle at `b` when walking `a -> b -> c`, in `(-PI, PI]`.
/// Zero for degenerate legs.
pub fn turn_angle(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    let u = b - a;
    let v = c - b;
    if u.length_squared() < f32::EPSILON || v.length_squared() < f32::EPSILON {
        return 0.0;
    }
    u.perp_dot(v).atan2(u.dot(v))
}

/// Axis-aligned bounds of a segment.
pub fn segment_bounds(a: Vec2, b: Vec2) -> Rect {
    Rect::from_corners(a, b)
}

/// Split `a..b` into runs no longer than `max_len` and return their
/// bounds, each inflated by `margin`.
pub fn buffered_segment_boxes(a: Vec2, b: Vec2, max_len: f32, margin: f32) -> Vec<Rect> {
    let len = a.distance(b);
    let pieces = ((len / max_len).ceil() as usize).max(1);
    (0..pieces)
        .map(|i| {
            let p0 = a.lerp(b, i as f32 / pieces as f32);
            let p1 = a.lerp(b, (i + 1) as f32 / pieces as f32);
            segment_bounds(p0, p1).inflate(margin)
        })
        .collect()
}

/// Where a ray from `origin` (inside `bounds`) along `dir` leaves `bounds`.
pub fn ray_exit(origin: Vec2, dir: Vec2, bounds: &Rect) -> Vec2 {
    let mut t = f32::INFINITY;
    if dir.x > f32::EPSILON {
        t = t.min((bounds.max.x - origin.x) / dir.x);
    } else if dir.x < -f32::EPSILON {
        t = t.min((bounds.min.x - origin.x) / dir.x);
    }
    if dir.y > f32::EPSILON {
        t = t.min((bounds.max.y - origin.y) / dir.y);
    } else if dir.y < -f32::EPSILON {
        t = t.min((bounds.min.y - origin.y) / dir.y);
    }
    if !t.is_finite() {
        return origin;
    }
    origin + dir * t.max(0.0)
}
