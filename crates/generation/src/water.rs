//! Lakes, rivers, ponds and bays.
//!
//! Water is laid down before any road so that streamlines and placement
//! can treat it as a hard obstacle. Every shape lies fully inside the
//! canvas.

use bevy::math::{Rect, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::city_rng::uniform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterKind {
    Lake,
    River,
    Pond,
    Bay,
}

impl WaterKind {
    pub const ALL: [WaterKind; 4] = [
        WaterKind::Lake,
        WaterKind::River,
        WaterKind::Pond,
        WaterKind::Bay,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterShape {
    Rectangle(Rect),
    Ellipse { center: Vec2, radii: Vec2 },
}

impl WaterShape {
    fn ellipse_in(origin: Vec2, size: Vec2) -> Self {
        let radii = size * 0.5;
        WaterShape::Ellipse {
            center: origin + radii,
            radii,
        }
    }

    /// Axis-aligned bounding box; this is the region placement avoids.
    pub fn bounds(&self) -> Rect {
        match *self {
            WaterShape::Rectangle(r) => r,
            WaterShape::Ellipse { center, radii } => Rect::from_center_half_size(center, radii),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        match *self {
            WaterShape::Rectangle(r) => r.contains(p),
            WaterShape::Ellipse { center, radii } => {
                if radii.x <= 0.0 || radii.y <= 0.0 {
                    return false;
                }
                let d = (p - center) / radii;
                d.length_squared() <= 1.0
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterBody {
    pub kind: WaterKind,
    pub shape: WaterShape,
}

impl WaterBody {
    pub fn bounds(&self) -> Rect {
        self.shape.bounds()
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.shape.contains(p)
    }
}

/// Lay down `count` water bodies on a `width` x `height` canvas.
/// `base` is the size-dependent base extent.
pub fn generate_water_bodies<R: Rng>(
    rng: &mut R,
    count: usize,
    base: f32,
    width: f32,
    height: f32,
) -> Vec<WaterBody> {
    (0..count)
        .map(|_| {
            let kind = WaterKind::ALL[rng.gen_range(0..WaterKind::ALL.len())];
            let shape = match kind {
                WaterKind::Lake => {
                    let size = Vec2::new(
                        uniform(rng, base, base * 2.0).min(width),
                        uniform(rng, base, base * 2.0).min(height),
                    );
                    WaterShape::ellipse_in(random_origin(rng, size, width, height), size)
                }
                WaterKind::River => {
                    let h = uniform(rng, 15.0, 25.0).min(height);
                    let y = uniform(rng, 0.0, height - h);
                    WaterShape::Rectangle(Rect::new(0.0, y, width, y + h))
                }
                WaterKind::Pond => {
                    let size = Vec2::splat(base * 0.5).min(Vec2::new(width, height));
                    WaterShape::ellipse_in(random_origin(rng, size, width, height), size)
                }
                WaterKind::Bay => {
                    let size = Vec2::new(
                        uniform(rng, base, base * 2.0).min(width),
                        base.min(height),
                    );
                    let x = uniform(rng, 0.0, width - size.x);
                    WaterShape::ellipse_in(Vec2::new(x, height - size.y), size)
                }
            };
            WaterBody { kind, shape }
        })
        .collect()
}

fn random_origin<R: Rng>(rng: &mut R, size: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        uniform(rng, 0.0, width - size.x),
        uniform(rng, 0.0, height - size.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city_rng::CityRng;
    use crate::geometry::rect_contains_rect;

    #[test]
    fn test_requested_count() {
        let mut rng = CityRng::from_seed_u64(3);
        let water = generate_water_bodies(&mut rng.0, 5, 40.0, 800.0, 600.0);
        assert_eq!(water.len(), 5);
        assert!(generate_water_bodies(&mut rng.0, 0, 40.0, 800.0, 600.0).is_empty());
    }

    #[test]
    fn test_water_stays_on_canvas() {
        let canvas = Rect::new(0.0, 0.0, 800.0, 600.0);
        let mut rng = CityRng::from_seed_u64(99);
        for body in generate_water_bodies(&mut rng.0, 64, 100.0, 800.0, 600.0) {
            let b = body.bounds();
            assert!(
                rect_contains_rect(&canvas.inflate(1e-3), &b),
                "{:?} leaves the canvas: {b:?}",
                body.kind
            );
        }
    }

    #[test]
    fn test_all_kinds_appear() {
        let mut rng = CityRng::from_seed_u64(5);
        let water = generate_water_bodies(&mut rng.0, 64, 40.0, 800.0, 600.0);
        for kind in WaterKind::ALL {
            assert!(water.iter().any(|w| w.kind == kind), "{kind:?} never drawn");
        }
    }

    #[test]
    fn test_river_spans_width() {
        let mut rng = CityRng::from_seed_u64(8);
        let rivers: Vec<_> = generate_water_bodies(&mut rng.0, 64, 40.0, 800.0, 600.0)
            .into_iter()
            .filter(|w| w.kind == WaterKind::River)
            .collect();
        assert!(!rivers.is_empty());
        for river in rivers {
            let b = river.bounds();
            assert_eq!(b.min.x, 0.0);
            assert_eq!(b.max.x, 800.0);
            assert!((15.0..=25.0).contains(&b.height()));
        }
    }

    #[test]
    fn test_ellipse_contains() {
        let shape = WaterShape::Ellipse {
            center: Vec2::new(100.0, 100.0),
            radii: Vec2::new(50.0, 20.0),
        };
        assert!(shape.contains(Vec2::new(140.0, 100.0)));
        assert!(!shape.contains(Vec2::new(100.0, 125.0)));
        // Inside the bounding box but outside the ellipse.
        assert!(!shape.contains(Vec2::new(145.0, 118.0)));
        assert!(shape.bounds().contains(Vec2::new(145.0, 118.0)));
    }
}
