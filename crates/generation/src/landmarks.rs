use bevy::math::Rect;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::city_config::BuildingStyle;
use crate::city_rng::uniform;
use crate::config::LANDMARK_ATTEMPTS;
use crate::placement::PlacementValidator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandmarkKind {
    Tower,
    Museum,
    Spire,
    Cathedral,
    Pagoda,
}

impl LandmarkKind {
    pub const ALL: [LandmarkKind; 5] = [
        LandmarkKind::Tower,
        LandmarkKind::Museum,
        LandmarkKind::Spire,
        LandmarkKind::Cathedral,
        LandmarkKind::Pagoda,
    ];

    /// The landmark a city of this style builds; a mixed city picks one.
    pub fn for_style<R: Rng>(rng: &mut R, style: BuildingStyle) -> Self {
        match style {
            BuildingStyle::Modern => LandmarkKind::Tower,
            BuildingStyle::Classical => LandmarkKind::Museum,
            BuildingStyle::Futuristic => LandmarkKind::Spire,
            BuildingStyle::Gothic => LandmarkKind::Cathedral,
            BuildingStyle::Asian => LandmarkKind::Pagoda,
            BuildingStyle::Mixed => Self::ALL[rng.gen_range(0..Self::ALL.len())],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub kind: LandmarkKind,
    pub footprint: Rect,
}

pub fn place_landmarks<R: Rng>(
    rng: &mut R,
    validator: &mut PlacementValidator,
    bounds: Rect,
    style: BuildingStyle,
    count: usize,
) -> Vec<Landmark> {
    let mut landmarks = Vec::with_capacity(count);
    for _ in 0..count {
        let w = uniform(rng, 30.0, 50.0);
        let h = uniform(rng, 40.0, 70.0);
        let placed = validator.place_with_retries(rng, LANDMARK_ATTEMPTS, |r| {
            let x = uniform(r, bounds.min.x, bounds.max.x - w);
            let y = uniform(r, bounds.min.y, bounds.max.y - h);
            Rect::new(x, y, x + w, y + h)
        });
        if let Some(footprint) = placed {
            landmarks.push(Landmark {
                kind: LandmarkKind::for_style(rng, style),
                footprint,
            });
        }
    }
    landmarks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city_rng::CityRng;

    #[test]
    fn test_kind_follows_style() {
        let mut rng = CityRng::from_seed_u64(1);
        assert_eq!(LandmarkKind::for_style(&mut rng.0, BuildingStyle::Gothic), LandmarkKind::Cathedral);
        assert_eq!(LandmarkKind::for_style(&mut rng.0, BuildingStyle::Asian), LandmarkKind::Pagoda);
    }

    #[test]
    fn test_landmarks_sized_and_placed() {
        let bounds = Rect::new(0.0, 0.0, 800.0, 600.0);
        let mut validator = PlacementValidator::new(bounds, &[], &[]);
        let mut rng = CityRng::from_seed_u64(2);
        let landmarks = place_landmarks(&mut rng.0, &mut validator, bounds, BuildingStyle::Modern, 4);
        assert_eq!(landmarks.len(), 4);
        for l in &landmarks {
            assert_eq!(l.kind, LandmarkKind::Tower);
            assert!((30.0..=50.0).contains(&l.footprint.width()));
            assert!((40.0..=70.0).contains(&l.footprint.height()));
        }
    }
}
