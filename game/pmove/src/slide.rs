use math::math::vector::Vector3;

use crate::clip::clip_velocity;
use crate::player_state::PlayerState;
use crate::trace::trace_world;
use crate::tuning::{CLIP_EPSILON, MAX_CLIP_PLANES, MIN_WALK_NORMAL, OVERCLIP, STEP_HEIGHT};
use crate::world::CollisionWorld;

const DUPLICATE_PLANE_DOT: f32 = 0.99;
const DEFAULT_MAX_BUMPS: u32 = 4;

/// Multi-bump clip/slide loop: sweeps the player's AABB toward the desired
/// destination, and whenever it hits something, clips velocity against the
/// surface(s) hit and tries again with the remaining time, up to
/// `max_bumps` times. Returns whether anything was hit during the move.
pub fn slide_move(ps: &mut PlayerState, world: &CollisionWorld, dt: f32, max_bumps: u32) -> bool {
    let primal_velocity = ps.velocity;
    let mut planes: Vec<Vector3> = Vec::with_capacity(MAX_CLIP_PLANES);
    let mut time_left = dt;
    let mut hit_something = false;

    for _ in 0..max_bumps {
        if time_left <= 0.0 {
            break;
        }

        let end = ps.origin + ps.velocity * time_left;
        let trace = trace_world(world, ps.origin, end, ps.mins, ps.maxs);

        if trace.all_solid {
            ps.velocity = Vector3::default();
            log::debug!(
                "slide_move: stuck in solid at tick {}",
                ps.command_time
            );
            return true;
        }

        if trace.fraction > 0.0 {
            ps.origin = trace.end_pos;
        }

        if trace.fraction == 1.0 {
            break;
        }

        hit_something = true;
        time_left *= 1.0 - trace.fraction;

        if planes.iter().any(|p| math::math::dot(p, &trace.hit_normal) > DUPLICATE_PLANE_DOT) {
            ps.velocity = clip_velocity(ps.velocity, trace.hit_normal, OVERCLIP);
            continue;
        }

        if planes.len() >= MAX_CLIP_PLANES {
            ps.velocity = Vector3::default();
            return true;
        }

        planes.push(trace.hit_normal);

        let mut resolved = false;
        for i in 0..planes.len() {
            let clipped = clip_velocity(ps.velocity, planes[i], OVERCLIP);
            // CLIP_EPSILON tolerance: float noise from the clip itself can
            // otherwise reject a solution correct to within a ULP or two.
            let consistent = planes
                .iter()
                .enumerate()
                .all(|(j, n)| j == i || math::math::dot(&clipped, n) >= -CLIP_EPSILON);

            if consistent {
                ps.velocity = clipped;
                resolved = true;
                break;
            }
        }

        if !resolved {
            if planes.len() == 2 {
                let dir = math::math::cross(&planes[0], &planes[1]).normalize();
                ps.velocity = dir * math::math::dot(&dir, &ps.velocity);
            } else {
                log::debug!(
                    "slide_move: corner with {} planes at tick {}",
                    planes.len(),
                    ps.command_time
                );
                ps.velocity = Vector3::default();
                return true;
            }
        }

        if math::math::dot(&ps.velocity, &primal_velocity) <= 0.0 {
            ps.velocity = Vector3::default();
            return true;
        }
    }

    hit_something
}

/// Tries a plain `slide_move` first; only if that hit something does it try
/// stepping up by `STEP_HEIGHT`, sliding again, then stepping back down --
/// accepting the stepped path only if it lands on walkable ground. Order
/// matters: stepping up unconditionally would cause vertical oscillation on
/// flat ground.
pub fn step_slide_move(ps: &mut PlayerState, world: &CollisionWorld, dt: f32) {
    let start_origin = ps.origin;
    let start_velocity = ps.velocity;

    let hit = slide_move(ps, world, dt, DEFAULT_MAX_BUMPS);
    if !hit {
        return;
    }

    let down_origin = ps.origin;
    let down_velocity = ps.velocity;

    ps.origin = start_origin;
    ps.velocity = start_velocity;

    let up_target = ps.origin + Vector3::new(0.0, 0.0, STEP_HEIGHT);
    let up_trace = trace_world(world, ps.origin, up_target, ps.mins, ps.maxs);
    if up_trace.all_solid {
        ps.origin = down_origin;
        ps.velocity = down_velocity;
        return;
    }
    ps.origin = up_trace.end_pos;

    slide_move(ps, world, dt, DEFAULT_MAX_BUMPS);

    let down_target = ps.origin - Vector3::new(0.0, 0.0, STEP_HEIGHT);
    let step_down_trace = trace_world(world, ps.origin, down_target, ps.mins, ps.maxs);

    if !step_down_trace.all_solid && step_down_trace.hit_normal.z >= MIN_WALK_NORMAL {
        ps.origin = step_down_trace.end_pos;
    } else {
        ps.origin = down_origin;
        ps.velocity = down_velocity;
    }
}
