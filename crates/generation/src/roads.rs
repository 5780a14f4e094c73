use bevy::math::{Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::BUFFER_SEGMENT_LENGTH;
use crate::geometry::{buffered_segment_boxes, polyline_length};

// ---------------------------------------------------------------------------
// Road classes
// ---------------------------------------------------------------------------

/// Functional class of a road, highest capacity first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RoadClass {
    Highway,
    Arterial,
    Collector,
    Local,
}

impl RoadClass {
    pub const ALL: [RoadClass; 4] = [
        RoadClass::Highway,
        RoadClass::Arterial,
        RoadClass::Collector,
        RoadClass::Local,
    ];

    pub fn lane_count(self) -> u8 {
        match self {
            RoadClass::Highway => 6,
            RoadClass::Arterial => 4,
            RoadClass::Collector => 2,
            RoadClass::Local => 2,
        }
    }

    /// Multiplier on the size-dependent base road width.
    pub fn width_factor(self) -> f32 {
        match self {
            RoadClass::Highway => 2.0,
            RoadClass::Arterial => 1.5,
            RoadClass::Collector => 1.0,
            RoadClass::Local => 0.75,
        }
    }

    /// Clearance kept free of buildings and parks on each side.
    pub fn placement_buffer(self) -> f32 {
        match self {
            RoadClass::Highway => 16.0,
            RoadClass::Arterial => 14.0,
            RoadClass::Collector => 12.0,
            RoadClass::Local => 10.0,
        }
    }
}

// ---------------------------------------------------------------------------
// RoadSegment
// ---------------------------------------------------------------------------

/// One road: a classed polyline of at least two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    pub class: RoadClass,
    pub polyline: Vec<Vec2>,
    pub lane_count: u8,
    pub width: f32,
    /// Set once the planarizer has smoothed the interior points. Internal
    /// bookkeeping, not part of the blueprint output.
    #[serde(skip)]
    pub smoothed: bool,
}

impl RoadSegment {
    /// `None` unless the polyline has at least two points.
    pub fn new(class: RoadClass, polyline: Vec<Vec2>, base_width: f32) -> Option<Self> {
        if polyline.len() < 2 {
            return None;
        }
        Some(Self {
            class,
            polyline,
            lane_count: class.lane_count(),
            width: base_width * class.width_factor(),
            smoothed: false,
        })
    }

    pub fn start(&self) -> Vec2 {
        self.polyline[0]
    }

    pub fn end(&self) -> Vec2 {
        self.polyline[self.polyline.len() - 1]
    }

    pub fn length(&self) -> f32 {
        polyline_length(&self.polyline)
    }

    /// Placement exclusion zone: small boxes along the polyline, inflated by
    /// the class buffer.
    pub fn buffered_boxes(&self) -> Vec<Rect> {
        let margin = self.class.placement_buffer();
        self.polyline
            .windows(2)
            .flat_map(|w| buffered_segment_boxes(w[0], w[1], BUFFER_SEGMENT_LENGTH, margin))
            .collect()
    }
}
