use bevy::log::debug;
use bevy::math::Rect;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::city_rng::uniform;
use crate::config::{FOUNTAIN_CHANCE, PARK_ATTEMPTS, PLAYGROUND_CHANCE};
use crate::placement::PlacementValidator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkAmenities {
    pub fountain: bool,
    pub playground: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Park {
    /// Always square.
    pub footprint: Rect,
    pub tree_count: u8,
    pub amenities: ParkAmenities,
}

/// Random-retry placement of up to `requested` square parks with sides in
/// `base..1.5 * base`. A park whose retry budget runs out is skipped.
pub fn place_parks<R: Rng>(
    rng: &mut R,
    validator: &mut PlacementValidator,
    bounds: Rect,
    base: f32,
    requested: usize,
) -> Vec<Park> {
    let mut parks = Vec::with_capacity(requested);
    for _ in 0..requested {
        let side = uniform(rng, base, base * 1.5);
        let placed = validator.place_with_retries(rng, PARK_ATTEMPTS, |r| {
            let x = uniform(r, bounds.min.x, bounds.max.x - side);
            let y = uniform(r, bounds.min.y, bounds.max.y - side);
            Rect::new(x, y, x + side, y + side)
        });
        let Some(footprint) = placed else {
            continue;
        };
        parks.push(Park {
            footprint,
            tree_count: rng.gen_range(3..=7),
            amenities: ParkAmenities {
                fountain: rng.gen_bool(FOUNTAIN_CHANCE),
                playground: rng.gen_bool(PLAYGROUND_CHANCE),
            },
        });
    }

    if parks.len() < requested {
        debug!("Placed {}/{} parks", parks.len(), requested);
    }
    parks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city_rng::CityRng;

    #[test]
    fn test_parks_are_square_and_sized() {
        let bounds = Rect::new(0.0, 0.0, 800.0, 600.0);
        let mut validator = PlacementValidator::new(bounds, &[], &[]);
        let mut rng = CityRng::from_seed_u64(4);
        let parks = place_parks(&mut rng.0, &mut validator, bounds, 25.0, 6);
        assert_eq!(parks.len(), 6);
        for p in &parks {
            let (w, h) = (p.footprint.width(), p.footprint.height());
            assert!((w - h).abs() < 1e-3);
            assert!((25.0..=37.5).contains(&w));
            assert!((3..=7).contains(&p.tree_count));
        }
    }

    #[test]
    fn test_full_canvas_skips_parks() {
        let bounds = Rect::new(0.0, 0.0, 300.0, 300.0);
        let mut validator = PlacementValidator::new(bounds, &[], &[]);
        validator.occupy(bounds);
        let mut rng = CityRng::from_seed_u64(4);
        assert!(place_parks(&mut rng.0, &mut validator, bounds, 25.0, 5).is_empty());
    }
}
