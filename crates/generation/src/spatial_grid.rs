use bevy::math::Rect;

/// Uniform bucket grid over the canvas, keyed by item bounds.
///
/// Items are plain `u32` ids owned by whoever built the grid; an item is
/// stored in every bucket its bounds touch. Bounds hanging off the canvas
/// are clamped into the edge buckets.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    bucket_size: f32,
    cols: usize,
    rows: usize,
    buckets: Vec<Vec<u32>>,
}

impl SpatialGrid {
    pub fn new(width: f32, height: f32, bucket_size: f32) -> Self {
        let cols = (width / bucket_size).ceil().max(1.0) as usize;
        let rows = (height / bucket_size).ceil().max(1.0) as usize;
        Self {
            bucket_size,
            cols,
            rows,
            buckets: (0..cols * rows).map(|_| Vec::new()).collect(),
        }
    }

    pub fn insert(&mut self, id: u32, bounds: Rect) {
        let (min_bx, min_by, max_bx, max_by) = self.bucket_span(&bounds);
        for by in min_by..=max_by {
            for bx in min_bx..=max_bx {
                self.buckets[by * self.cols + bx].push(id);
            }
        }
    }

    /// Ids whose buckets intersect `area`, sorted and deduplicated. This is
    /// a broad phase: callers still test the exact geometry.
    pub fn query_rect(&self, area: Rect) -> Vec<u32> {
        let (min_bx, min_by, max_bx, max_by) = self.bucket_span(&area);
        let mut result = Vec::new();
        for by in min_by..=max_by {
            for bx in min_bx..=max_bx {
                result.extend_from_slice(&self.buckets[by * self.cols + bx]);
            }
        }
        result.sort_unstable();
        result.dedup();
        result
    }

    pub fn item_count(&self) -> usize {
        self.buckets.iter().map(|v| v.len()).sum()
    }

    #[inline]
    fn bucket_span(&self, r: &Rect) -> (usize, usize, usize, usize) {
        let clamp_x = |v: f32| ((v / self.bucket_size).floor().max(0.0) as usize).min(self.cols - 1);
        let clamp_y = |v: f32| ((v / self.bucket_size).floor().max(0.0) as usize).min(self.rows - 1);
        (
            clamp_x(r.min.x),
            clamp_y(r.min.y),
            clamp_x(r.max.x),
            clamp_y(r.max.y),
        )
    }
}
