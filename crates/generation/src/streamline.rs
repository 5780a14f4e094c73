//! Streamline tracing through a [`TensorField`].
//!
//! A trace walks a cursor from a seed in fixed steps along the field's
//! major or minor direction. Each step is checked, in order, for:
//!
//! 1. blocked: the next point leaves the canvas or lands in water
//! 2. snap: the next point is within `snap_epsilon` of an existing road,
//!    in which case the trace ends exactly on that road
//! 3. length: the walk would exceed `max_length`
//! 4. curvature: the turn over the last three points exceeds `max_turn`
//!
//! The walk is bounded by `floor(max_length / step)` steps whatever the
//! field does.

use bevy::math::{Rect, Vec2};

use crate::geometry::turn_angle;
use crate::road_index::RoadIndex;
use crate::tensor_field::{Tensor, TensorField};
use crate::water::WaterBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAxis {
    Major,
    Minor,
}

/// Which field direction a trace follows, and which way along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionSelector {
    pub axis: FieldAxis,
    pub reversed: bool,
}

impl DirectionSelector {
    pub fn new(axis: FieldAxis, reversed: bool) -> Self {
        Self { axis, reversed }
    }

    pub fn pick(&self, tensor: Tensor) -> Vec2 {
        let dir = match self.axis {
            FieldAxis::Major => tensor.major,
            FieldAxis::Minor => tensor.minor,
        };
        if self.reversed {
            -dir
        } else {
            dir
        }
    }
}

pub struct StreamlineTracer<'a> {
    pub field: &'a TensorField,
    pub bounds: Rect,
    pub water: &'a [WaterBody],
    pub roads: &'a RoadIndex,
    pub snap_epsilon: f32,
    pub max_turn: f32,
}

impl StreamlineTracer<'_> {
    fn is_blocked(&self, p: Vec2) -> bool {
        !self.bounds.contains(p) || self.water.iter().any(|w| w.contains(p))
    }

    /// Trace from `seed`. Returns `None` when fewer than two points were
    /// produced.
    pub fn trace(
        &self,
        seed: Vec2,
        selector: DirectionSelector,
        max_length: f32,
        step: f32,
    ) -> Option<Vec<Vec2>> {
        if step <= 0.0 {
            return None;
        }
        let max_steps = (max_length / step).floor() as usize;
        let mut points = vec![seed];
        let mut travelled = 0.0;
        let mut heading: Option<Vec2> = None;

        for _ in 0..max_steps {
            let Some(&cursor) = points.last() else {
                break;
            };
            let mut dir = selector.pick(self.field.orientation_at(cursor));
            // Field directions are sign-free; stay continuous with the
            // previous step instead of doubling back.
            if let Some(prev) = heading {
                if dir.dot(prev) < 0.0 {
                    dir = -dir;
                }
            }
            let next = cursor + dir * step;

            if self.is_blocked(next) {
                break;
            }
            if let Some(snapped) = self.roads.nearest_within(next, self.snap_epsilon) {
                points.push(snapped);
                break;
            }
            if travelled + step > max_length {
                break;
            }
            if points.len() >= 2 {
                let before = points[points.len() - 2];
                if turn_angle(before, cursor, next).abs() > self.max_turn {
                    break;
                }
            }

            points.push(next);
            travelled += step;
            heading = Some(dir);
        }

        (points.len() >= 2).then_some(points)
    }
}
