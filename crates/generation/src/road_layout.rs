//! Road network assembly, one strategy per [`RoadPattern`].
//!
//! Grid cities use a plain spacing lattice. Every other pattern builds the
//! graph skeleton (Delaunay highways, MST arterials, KNN collectors),
//! shapes each skeleton edge straight or with terrain-aware A*, adds its
//! pattern extras (radial spokes, fractal branches) and finally traces
//! local streets through the pattern's tensor field.
//!
//! Roads come out sorted highest class first.

use std::f32::consts::{FRAC_PI_4, TAU};

use bevy::log::debug;
use bevy::math::{Rect, Vec2};
use rand::Rng;

use crate::city_config::{RoadPattern, SizeProfile};
use crate::config::{
    STREAMLINE_MAX_LENGTH, STREAMLINE_MAX_TURN, STREAMLINE_SNAP_EPSILON, STREAMLINE_STEP,
};
use crate::geometry::ray_exit;
use crate::grid_pathfinder::GridPathfinder;
use crate::hierarchy::{build_skeleton, ClassGraph};
use crate::path_cost::PathCostModel;
use crate::pipeline::CancelToken;
use crate::poisson_disc::PoissonDiscSampler;
use crate::road_index::RoadIndex;
use crate::roads::{RoadClass, RoadSegment};
use crate::streamline::{DirectionSelector, FieldAxis, StreamlineTracer};
use crate::tensor_field::TensorField;
use crate::terrain::TerrainModel;
use crate::water::WaterBody;

const FRACTAL_DEPTH: u32 = 3;
const FRACTAL_LENGTH_DECAY: f32 = 0.7;

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// How a skeleton edge is turned into a polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeShape {
    Straight,
    /// Terrain-aware A* between the endpoints.
    Routed,
}

/// Pattern-specific choices for the shared road pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternStrategy {
    pub pattern: RoadPattern,
}

impl PatternStrategy {
    pub fn new(pattern: RoadPattern) -> Self {
        Self { pattern }
    }

    pub fn uses_lattice(&self) -> bool {
        self.pattern == RoadPattern::Grid
    }

    pub fn edge_shape(&self, class: RoadClass) -> EdgeShape {
        let routed = match self.pattern {
            RoadPattern::Grid => false,
            RoadPattern::Organic => class != RoadClass::Local,
            RoadPattern::Spiral | RoadPattern::Fractal => {
                matches!(class, RoadClass::Highway | RoadClass::Arterial)
            }
            RoadPattern::Radial | RoadPattern::Mixed => class == RoadClass::Highway,
        };
        if routed {
            EdgeShape::Routed
        } else {
            EdgeShape::Straight
        }
    }

    pub fn has_radial_spokes(&self) -> bool {
        self.pattern == RoadPattern::Radial
    }

    pub fn has_fractal_branches(&self) -> bool {
        self.pattern == RoadPattern::Fractal
    }
}

// ---------------------------------------------------------------------------
// Grid lattice
// ---------------------------------------------------------------------------

/// Class of the `k`-th (1-based) of `n` parallel lattice lines: the middle
/// line is a highway, every fourth an arterial, every other a collector.
pub fn lattice_class(k: usize, n: usize) -> RoadClass {
    if k == (n + 1) / 2 {
        RoadClass::Highway
    } else if k % 4 == 0 {
        RoadClass::Arterial
    } else if k % 2 == 0 {
        RoadClass::Collector
    } else {
        RoadClass::Local
    }
}

/// Positions `s, 2s, ...` strictly below `extent`.
fn lattice_offsets(origin: f32, extent: f32, spacing: f32) -> Vec<f32> {
    let mut out = Vec::new();
    if spacing <= 0.0 {
        return out;
    }
    let mut k = 1;
    loop {
        let v = origin + k as f32 * spacing;
        if v >= origin + extent {
            break;
        }
        out.push(v);
        k += 1;
    }
    out
}

/// Full-span vertical and horizontal lines every `spacing` units.
pub fn lattice_roads(bounds: Rect, spacing: f32, base_width: f32) -> Vec<RoadSegment> {
    let size = bounds.size();
    let xs = lattice_offsets(bounds.min.x, size.x, spacing);
    let ys = lattice_offsets(bounds.min.y, size.y, spacing);

    let vertical = xs.iter().enumerate().filter_map(|(i, &x)| {
        RoadSegment::new(
            lattice_class(i + 1, xs.len()),
            vec![Vec2::new(x, bounds.min.y), Vec2::new(x, bounds.max.y)],
            base_width,
        )
    });
    let horizontal = ys.iter().enumerate().filter_map(|(i, &y)| {
        RoadSegment::new(
            lattice_class(i + 1, ys.len()),
            vec![Vec2::new(bounds.min.x, y), Vec2::new(bounds.max.x, y)],
            base_width,
        )
    });
    vertical.chain(horizontal).collect()
}

// ---------------------------------------------------------------------------
// Pattern extras
// ---------------------------------------------------------------------------

/// `count` evenly spaced straight spokes from `center` to the canvas edge.
pub fn radial_spokes(center: Vec2, bounds: Rect, count: usize) -> Vec<(Vec2, Vec2)> {
    (0..count)
        .map(|i| {
            let dir = Vec2::from_angle(i as f32 / count as f32 * TAU);
            (center, ray_exit(center, dir, &bounds))
        })
        .collect()
}

/// Binary branch tree grown from `root` with an explicit worklist: each
/// branch spawns two children at +-45 degrees, 0.7 times as long, until
/// `depth` levels exist. Branches are clipped to the canvas.
pub fn fractal_branches(root: Vec2, bounds: Rect, length: f32, depth: u32) -> Vec<(Vec2, Vec2)> {
    let mut branches = Vec::new();
    let mut work = vec![(root, 0.0f32, length, depth)];
    while let Some((start, angle, len, level)) = work.pop() {
        if level == 0 || !bounds.contains(start) {
            continue;
        }
        let dir = Vec2::from_angle(angle);
        let mut end = start + dir * len;
        if !bounds.contains(end) {
            end = ray_exit(start, dir, &bounds);
        }
        branches.push((start, end));
        let next = len * FRACTAL_LENGTH_DECAY;
        work.push((end, angle - FRAC_PI_4, next, level - 1));
        work.push((end, angle + FRAC_PI_4, next, level - 1));
    }
    branches
}

// ---------------------------------------------------------------------------
// Network assembly
// ---------------------------------------------------------------------------

/// Read-only inputs shared by every road stage.
pub struct RoadLayoutContext<'a> {
    pub bounds: Rect,
    pub profile: &'a SizeProfile,
    pub terrain: &'a TerrainModel,
    pub water: &'a [WaterBody],
    pub cancel: &'a CancelToken,
}

/// Build the complete (not yet planarized) road list for `pattern`.
pub fn build_road_network<R: Rng>(
    rng: &mut R,
    ctx: &RoadLayoutContext,
    pattern: RoadPattern,
    field_seed: i32,
) -> Vec<RoadSegment> {
    let strategy = PatternStrategy::new(pattern);
    let base_width = ctx.profile.road_width;

    if strategy.uses_lattice() {
        let mut roads = lattice_roads(ctx.bounds, ctx.profile.grid_spacing, base_width);
        roads.sort_by_key(|r| r.class);
        return roads;
    }

    let pathfinder = GridPathfinder::new(PathCostModel::new(ctx.terrain), ctx.bounds);
    let skeleton = build_skeleton(rng, ctx.bounds, ctx.profile);
    let center = ctx.bounds.center();

    let mut roads = Vec::new();
    let shape_class = |graph: &ClassGraph, class: RoadClass, roads: &mut Vec<RoadSegment>| {
        for (a, b) in graph.segments() {
            let polyline = match strategy.edge_shape(class) {
                EdgeShape::Straight => vec![a, b],
                EdgeShape::Routed => pathfinder.find_path(a, b, ctx.cancel),
            };
            roads.extend(RoadSegment::new(class, polyline, base_width));
        }
    };
    shape_class(&skeleton.highways, RoadClass::Highway, &mut roads);
    shape_class(&skeleton.arterials, RoadClass::Arterial, &mut roads);
    shape_class(&skeleton.collectors, RoadClass::Collector, &mut roads);

    if strategy.has_radial_spokes() {
        for (a, b) in radial_spokes(center, ctx.bounds, ctx.profile.radial_spokes) {
            roads.extend(RoadSegment::new(RoadClass::Arterial, vec![a, b], base_width));
        }
    }
    if strategy.has_fractal_branches() {
        let size = ctx.bounds.size();
        let length = size.x.min(size.y) / 3.0;
        for (a, b) in fractal_branches(center, ctx.bounds, length, FRACTAL_DEPTH) {
            roads.extend(RoadSegment::new(RoadClass::Collector, vec![a, b], base_width));
        }
    }

    let field = TensorField::for_pattern(pattern, center, field_seed);
    let locals = trace_local_streets(rng, ctx, &field, &roads);
    debug!("Traced {} local streets", locals.len());
    roads.extend(locals);

    roads.sort_by_key(|r| r.class);
    roads
}

/// Seed streamlines on a blue-noise set of points and trace each one both
/// ways. Even seeds follow the major direction, odd seeds the minor one.
/// Seeds in water or already on a road are skipped.
pub fn trace_local_streets<R: Rng>(
    rng: &mut R,
    ctx: &RoadLayoutContext,
    field: &TensorField,
    existing: &[RoadSegment],
) -> Vec<RoadSegment> {
    let mut index = RoadIndex::new(ctx.bounds.width(), ctx.bounds.height());
    for road in existing {
        index.insert_polyline(&road.polyline);
    }

    let seeds = PoissonDiscSampler::new(ctx.bounds, ctx.profile.grid_spacing * 1.5)
        .sample(rng, ctx.profile.streamline_seeds);

    let mut locals = Vec::new();
    for (i, seed) in seeds.into_iter().enumerate() {
        if ctx.water.iter().any(|w| w.contains(seed))
            || index.nearest_within(seed, STREAMLINE_SNAP_EPSILON).is_some()
        {
            continue;
        }
        let axis = if i % 2 == 0 {
            FieldAxis::Major
        } else {
            FieldAxis::Minor
        };

        let tracer = StreamlineTracer {
            field,
            bounds: ctx.bounds,
            water: ctx.water,
            roads: &index,
            snap_epsilon: STREAMLINE_SNAP_EPSILON,
            max_turn: STREAMLINE_MAX_TURN,
        };
        let trace = |reversed| {
            tracer.trace(
                seed,
                DirectionSelector::new(axis, reversed),
                STREAMLINE_MAX_LENGTH,
                STREAMLINE_STEP,
            )
        };
        let forward = trace(false);
        let backward = trace(true);

        let mut polyline: Vec<Vec2> = match backward {
            Some(mut b) => {
                b.reverse();
                b
            }
            None => vec![seed],
        };
        if let Some(f) = forward {
            polyline.extend_from_slice(&f[1..]);
        }

        if let Some(road) = RoadSegment::new(RoadClass::Local, polyline, ctx.profile.road_width) {
            index.insert_polyline(&road.polyline);
            locals.push(road);
        }
    }
    locals
}
