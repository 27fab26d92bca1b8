use math::math::vector::Vector3;

use crate::brush::Brush;
use crate::tuning::TRACE_EPSILON;
use crate::world::CollisionWorld;

/// Result of sweeping a box from `start` to `end` against a brush or world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceResult {
    pub fraction: f32,
    pub end_pos: Vector3,
    pub hit_normal: Vector3,
    pub hit_dist: f32,
    pub start_solid: bool,
    pub all_solid: bool,
    pub brush_index: i32,
}

impl TraceResult {
    fn no_hit(end: Vector3) -> Self {
        Self {
            fraction: 1.0,
            end_pos: end,
            hit_normal: Vector3::default(),
            hit_dist: 0.0,
            start_solid: false,
            all_solid: false,
            brush_index: -1,
        }
    }
}

fn support_offset(n: &Vector3, mins: &Vector3, maxs: &Vector3) -> f32 {
    n.x * if n.x >= 0.0 { mins.x } else { maxs.x }
        + n.y * if n.y >= 0.0 { mins.y } else { maxs.y }
        + n.z * if n.z >= 0.0 { mins.z } else { maxs.z }
}

/// Swept-AABB-vs-convex-brush trace by Minkowski-expanding each of the
/// brush's planes by the moving box's support distance along that plane's
/// normal, reducing the problem to a swept point-vs-plane test per plane.
pub fn trace_brush(
    brush: &Brush,
    start: Vector3,
    end: Vector3,
    mins: Vector3,
    maxs: Vector3,
) -> TraceResult {
    let mut starts_out = false;
    let mut gets_out = false;
    let mut enter_frac: f32 = -1.0;
    let mut leave_frac: f32 = 1.0;
    let mut clip_normal = Vector3::default();

    for plane in &brush.planes {
        let e = support_offset(&plane.normal, &mins, &maxs);
        let d_expanded = plane.d - e;

        let ds = math::math::dot(&plane.normal, &start) - d_expanded;
        let de = math::math::dot(&plane.normal, &end) - d_expanded;

        if ds > 0.0 {
            starts_out = true;
        }
        if de > 0.0 {
            gets_out = true;
        }

        if ds > 0.0 && de >= ds {
            return TraceResult::no_hit(end);
        }

        if ds <= 0.0 && de <= 0.0 {
            continue;
        }

        if ds > de {
            // entering
            let f = ((ds - TRACE_EPSILON) / (ds - de)).max(0.0);
            if f > enter_frac {
                enter_frac = f;
                clip_normal = plane.normal;
            }
        } else {
            // leaving
            let f = ((ds + TRACE_EPSILON) / (ds - de)).min(1.0);
            if f < leave_frac {
                leave_frac = f;
            }
        }
    }

    if !starts_out {
        if !gets_out {
            return TraceResult {
                fraction: 0.0,
                end_pos: start,
                hit_normal: Vector3::default(),
                hit_dist: 0.0,
                start_solid: true,
                all_solid: true,
                brush_index: -1,
            };
        }
        return TraceResult {
            fraction: 1.0,
            end_pos: end,
            hit_normal: Vector3::default(),
            hit_dist: 0.0,
            start_solid: true,
            all_solid: false,
            brush_index: -1,
        };
    }

    if enter_frac < leave_frac && (0.0..1.0).contains(&enter_frac) {
        let f = enter_frac;
        return TraceResult {
            fraction: f,
            end_pos: math::math::lerp(&start, &end, f),
            hit_normal: clip_normal,
            hit_dist: f,
            start_solid: false,
            all_solid: false,
            brush_index: -1,
        };
    }

    TraceResult::no_hit(end)
}

fn aabb_overlap(a_mins: Vector3, a_maxs: Vector3, b_mins: Vector3, b_maxs: Vector3) -> bool {
    a_mins.x <= b_maxs.x
        && a_maxs.x >= b_mins.x
        && a_mins.y <= b_maxs.y
        && a_maxs.y >= b_mins.y
        && a_mins.z <= b_maxs.z
        && a_maxs.z >= b_mins.z
}

/// Broadphase-then-narrowphase trace of a box sweep against an entire
/// world. Brushes whose AABB doesn't overlap the swept box's AABB are
/// skipped without a per-plane test.
pub fn trace_world(
    world: &CollisionWorld,
    start: Vector3,
    end: Vector3,
    mins: Vector3,
    maxs: Vector3,
) -> TraceResult {
    let swept_mins = Vector3::new(
        (start.x + mins.x).min(end.x + mins.x),
        (start.y + mins.y).min(end.y + mins.y),
        (start.z + mins.z).min(end.z + mins.z),
    );
    let swept_maxs = Vector3::new(
        (start.x + maxs.x).max(end.x + maxs.x),
        (start.y + maxs.y).max(end.y + maxs.y),
        (start.z + maxs.z).max(end.z + maxs.z),
    );

    let mut best = TraceResult::no_hit(end);

    for (index, brush) in world.brushes.iter().enumerate() {
        if !aabb_overlap(swept_mins, swept_maxs, brush.mins, brush.maxs) {
            continue;
        }

        let result = trace_brush(brush, start, end, mins, maxs);

        if result.all_solid {
            let mut r = result;
            r.brush_index = index as i32;
            return r;
        }

        if result.fraction < best.fraction {
            best = result;
            best.brush_index = index as i32;
        }
    }

    best
}
