use math::math::trig::angle_vectors;
use math::math::vector::Vector3;

use crate::accel::{accelerate, air_accelerate, apply_friction, cpm_air_control};
use crate::clip::clip_velocity;
use crate::player_state::{PlayerState, UserCommand};
use crate::slide::step_slide_move;
use crate::trace::trace_world;
use crate::tuning::{Tuning, MIN_WALK_NORMAL, OVERCLIP};
use crate::world::CollisionWorld;

const WISH_INPUT_EPSILON: f32 = 0.0001;
const STAIR_GLIDE_NORMAL: f32 = 0.99;
const SKIM_FALL_SPEED: f32 = -50.0;

/// Micro-sweep ground check: traces from slightly above `origin` down a
/// quarter unit. The small lift avoids starting the trace exactly on a
/// Minkowski-expanded surface, which would otherwise report `start_solid`
/// on perfectly flat ground.
pub fn categorize_position(ps: &mut PlayerState, world: &CollisionWorld) {
    let start = ps.origin + Vector3::new(0.0, 0.0, 0.125);
    let end = start - Vector3::new(0.0, 0.0, 0.25);
    let trace = trace_world(world, start, end, ps.mins, ps.maxs);

    if trace.fraction < 1.0 && trace.hit_normal.z >= MIN_WALK_NORMAL {
        ps.on_ground = true;
        ps.ground_normal = trace.hit_normal;
    } else {
        ps.on_ground = false;
        ps.ground_normal = Vector3::default();
    }
}

/// CPM-variant jump handling: buffers a press made in the air, fires on
/// landing (or immediately if already grounded and the button is freshly
/// pressed, or autohop cooldown has elapsed), and stacks a double-jump
/// boost when the previous jump was recent enough.
fn check_jump(ps: &mut PlayerState, cmd: &UserCommand, tuning: &Tuning) {
    let pressed = cmd.jump_pressed();

    if !pressed {
        ps.jump_held = false;
        ps.jump_buffer_ticks = 0;
        ps.autohop_cooldown = 0;
        return;
    }

    let fresh_press = !ps.jump_held;
    ps.jump_held = true;

    if !ps.on_ground {
        if fresh_press {
            ps.jump_buffer_ticks = tuning.jump_buffer_ticks;
        }
        return;
    }

    let can_fire = fresh_press || ps.jump_buffer_ticks > 0 || ps.autohop_cooldown == 0;
    if !can_fire {
        return;
    }

    ps.jump_buffer_ticks = 0;
    ps.on_ground = false;

    let is_double = ps.last_jump_tick > 0
        && ps.command_time.saturating_sub(ps.last_jump_tick) <= tuning.cpm_double_jump_window_ticks;

    let amount = tuning.jump_velocity + if is_double { tuning.cpm_double_jump_boost } else { 0.0 };
    ps.velocity.z = (ps.velocity.z + amount).max(amount);

    log::debug!(
        "jump fired at tick {} (double={is_double}, amount={amount})",
        ps.command_time
    );

    ps.last_jump_tick = ps.command_time;
    ps.autohop_cooldown = tuning.autohop_cooldown_ticks;
}

/// Advances `ps` by one fixed tick against `world`, under the rules in
/// `tuning`. This is the single entry point that sequences ground
/// categorization, jumping, friction, acceleration, gravity, collision
/// response and the post-move fixups; every step below is mandatory and the
/// order is load-bearing.
pub fn pmove(ps: &mut PlayerState, cmd: &UserCommand, world: &CollisionWorld, tuning: &Tuning, dt: f32) {
    ps.command_time += 1;

    let (forward, right, _up) = angle_vectors(0.0, cmd.yaw);
    let mut wish = forward * cmd.forward_move + right * cmd.side_move;
    wish.z = 0.0;
    let wish_len = wish.length();
    let wish_dir = if wish_len > WISH_INPUT_EPSILON {
        wish / wish_len
    } else {
        Vector3::default()
    };
    let has_input = wish_len > WISH_INPUT_EPSILON;
    let wish_speed = if has_input { ps.max_speed } else { 0.0 };
    let air_wish_speed = if has_input { ps.max_speed * tuning.air_speed_frac } else { 0.0 };

    let was_airborne = !ps.on_ground;
    categorize_position(ps, world);

    check_jump(ps, cmd, tuning);

    if !ps.on_ground && ps.jump_buffer_ticks > 0 {
        ps.jump_buffer_ticks -= 1;
    }

    let stair_skimming = ps.skim_ticks > 0;
    if ps.on_ground && ps.splash_slick_ticks == 0 && !stair_skimming {
        apply_friction(ps, tuning, dt);
    }

    if ps.on_ground {
        accelerate(ps, wish_dir, wish_speed, tuning.ground_accel, dt);
    } else if tuning.cpm {
        cpm_air_dispatch(ps, cmd, wish_dir, air_wish_speed, tuning, dt);
    } else {
        air_accelerate(ps, wish_dir, air_wish_speed, tuning.air_accel, dt, tuning.air_wishspeed_cap);
    }

    if !ps.on_ground {
        ps.velocity.z -= ps.gravity * dt;
    }

    let pre_collision_velocity = ps.velocity;
    step_slide_move(ps, world, dt);

    categorize_position(ps, world);

    let skimming = ps.skim_ticks > 0;
    if ps.on_ground && !skimming {
        ps.velocity = clip_velocity(ps.velocity, ps.ground_normal, OVERCLIP);
    }

    if pre_collision_velocity.z > 0.0 && ps.on_ground && ps.ground_normal.z > STAIR_GLIDE_NORMAL {
        ps.on_ground = false;
        ps.velocity.z = pre_collision_velocity.z;
    }

    if was_airborne
        && ps.on_ground
        && pre_collision_velocity.z < SKIM_FALL_SPEED
        && ps.ground_normal.z > STAIR_GLIDE_NORMAL
    {
        ps.skim_ticks = tuning.skim_ticks;
        ps.last_land_tick = ps.command_time;
    }

    if ps.splash_slick_ticks > 0 && ps.velocity.z > 0.0 {
        ps.on_ground = false;
    }

    if ps.splash_slick_ticks > 0 {
        ps.splash_slick_ticks -= 1;
    }
    if ps.skim_ticks > 0 {
        ps.skim_ticks -= 1;
    }
    if ps.autohop_cooldown > 0 {
        ps.autohop_cooldown -= 1;
    }

    log::trace!(
        "tick {}: on_ground={} velocity={:?}",
        ps.command_time,
        ps.on_ground,
        ps.velocity
    );
}

/// Exclusive air-input dispatch table: forward-only W-turns instead
/// of accelerating, side-only gets a ground-style strafe accelerate, both or
/// neither fall back to the classic air-accelerate used by `AIR_SPEED`.
fn cpm_air_dispatch(
    ps: &mut PlayerState,
    cmd: &UserCommand,
    wish_dir: Vector3,
    wish_speed: f32,
    tuning: &Tuning,
    dt: f32,
) {
    let has_forward = cmd.forward_move.abs() > WISH_INPUT_EPSILON;
    let has_side = cmd.side_move.abs() > WISH_INPUT_EPSILON;

    match (has_forward, has_side) {
        (false, false) => {
            air_accelerate(ps, wish_dir, wish_speed, tuning.air_accel, dt, tuning.air_wishspeed_cap);
        }
        (false, true) => {
            accelerate(ps, wish_dir, tuning.cpm_wish_speed, tuning.cpm_strafe_accel, dt);
        }
        (true, false) => {
            cpm_air_control(ps, wish_dir, tuning, dt);
        }
        (true, true) => {
            air_accelerate(ps, wish_dir, wish_speed, tuning.air_accel, dt, tuning.air_wishspeed_cap);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::player_state::player_init;
    use crate::world::world_create_test_room;

    const DT: f32 = 1.0 / 128.0;

    fn empty_cmd() -> UserCommand {
        UserCommand::default()
    }

    /// S1: Falling box hits floor.
    #[test]
    fn falling_box_lands_on_floor() {
        let world = world_create_test_room();
        let tuning = Tuning::vq3();
        let mut ps = PlayerState::default();
        player_init(&mut ps, Vector3::new(0.0, 0.0, 100.0));

        let cmd = empty_cmd();
        for _ in 0..60 {
            pmove(&mut ps, &cmd, &world, &tuning, DT);
        }

        assert!((ps.origin.z - 24.0).abs() < 1.0, "z = {}", ps.origin.z);
        assert!(ps.on_ground);
        assert!(ps.velocity.length() < 1e-3);
    }

    /// S2: Walk into wall.
    #[test]
    fn walking_into_wall_stops_at_the_wall() {
        let world = world_create_test_room();
        let tuning = Tuning::vq3();
        let mut ps = PlayerState::default();
        player_init(&mut ps, Vector3::new(200.0, 0.0, 24.0));
        ps.on_ground = true;

        let mut cmd = empty_cmd();
        cmd.forward_move = 1.0;
        cmd.yaw = 0.0;

        for _ in 0..200 {
            pmove(&mut ps, &cmd, &world, &tuning, DT);
        }

        assert!(ps.origin.x <= 241.0, "x = {}", ps.origin.x);
        assert!(ps.on_ground);
        assert!(ps.velocity.length() < 1.0);
    }

    /// S5: Step over a 16-unit platform.
    #[test]
    fn player_steps_up_onto_platform() {
        let world = world_create_test_room();
        let tuning = Tuning::vq3();
        let mut ps = PlayerState::default();
        player_init(&mut ps, Vector3::new(-80.0, 0.0, 24.0));
        ps.on_ground = true;

        let mut cmd = empty_cmd();
        cmd.forward_move = 1.0;

        for _ in 0..100 {
            pmove(&mut ps, &cmd, &world, &tuning, DT);
        }

        assert!((ps.origin.z - 40.0).abs() < 1.0, "z = {}", ps.origin.z);
    }

    /// Ground ticks at steady-state input converge to max_speed and sit
    /// there.
    #[test]
    fn sustained_forward_input_converges_to_max_speed() {
        let world = world_create_test_room();
        let tuning = Tuning::vq3();
        let mut ps = PlayerState::default();
        player_init(&mut ps, Vector3::new(-200.0, -200.0, 24.0));
        ps.on_ground = true;

        let mut cmd = empty_cmd();
        cmd.forward_move = 1.0;

        for _ in 0..400 {
            pmove(&mut ps, &cmd, &world, &tuning, DT);
        }

        let horizontal_speed = Vector3::new(ps.velocity.x, ps.velocity.y, 0.0).length();
        assert!((horizontal_speed - ps.max_speed).abs() < 0.5, "speed = {horizontal_speed}");
    }

    #[test]
    fn normal_ground_tick_has_exactly_zero_vertical_velocity() {
        let world = world_create_test_room();
        let tuning = Tuning::vq3();
        let mut ps = PlayerState::default();
        player_init(&mut ps, Vector3::new(0.0, 0.0, 24.0));

        let cmd = empty_cmd();
        for _ in 0..10 {
            pmove(&mut ps, &cmd, &world, &tuning, DT);
        }

        assert!(ps.on_ground);
        assert_eq!(ps.velocity.z, 0.0);
    }

    #[test]
    fn jump_sets_velocity_and_clears_ground() {
        let world = world_create_test_room();
        let tuning = Tuning::vq3();
        let mut ps = PlayerState::default();
        player_init(&mut ps, Vector3::new(0.0, 0.0, 24.0));

        let mut cmd = empty_cmd();
        for _ in 0..5 {
            pmove(&mut ps, &cmd, &world, &tuning, DT);
        }
        assert!(ps.on_ground);

        cmd.buttons = crate::player_state::BUTTON_JUMP;
        pmove(&mut ps, &cmd, &world, &tuning, DT);

        assert!(!ps.on_ground);
        assert!(ps.velocity.z > 0.0);
    }

    /// S4: Strafe-jump builds speed above max_speed (Q3 air-accel exploit).
    #[test]
    fn strafe_jumping_exceeds_max_speed() {
        let world = world_create_test_room();
        let tuning = Tuning::vq3();
        let mut ps = PlayerState::default();
        player_init(&mut ps, Vector3::new(-200.0, 0.0, 24.0));
        ps.on_ground = true;
        ps.max_speed = 320.0;

        let mut cmd = empty_cmd();
        cmd.forward_move = 1.0;
        for _ in 0..60 {
            pmove(&mut ps, &cmd, &world, &tuning, DT);
        }

        let mut peak_speed: f32 = 0.0;
        let mut ground_touches = 0u32;
        let mut yaw = 0.0f32;
        let mut was_on_ground = ps.on_ground;

        for _ in 0..500 {
            if ps.velocity.z < -50.0 {
                cmd.buttons = 0;
            } else {
                cmd.buttons = crate::player_state::BUTTON_JUMP;
            }

            if ps.on_ground {
                cmd.forward_move = 1.0;
                cmd.side_move = 0.0;
            } else {
                cmd.forward_move = 1.0;
                cmd.side_move = 1.0;
                yaw -= 0.5;
                cmd.yaw = yaw;
            }

            pmove(&mut ps, &cmd, &world, &tuning, DT);

            let speed = Vector3::new(ps.velocity.x, ps.velocity.y, 0.0).length();
            peak_speed = peak_speed.max(speed);

            if ps.on_ground && !was_on_ground {
                ground_touches += 1;
            }
            was_on_ground = ps.on_ground;
        }

        assert!(peak_speed > 325.0, "peak speed = {peak_speed}");
        assert!(ground_touches >= 1, "ground touches = {ground_touches}");
    }
}
