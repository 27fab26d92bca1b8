use math::math::vector::Vector3;

use crate::player_state::PlayerState;
use crate::tuning::Tuning;

/// Ground-style acceleration: adds velocity toward `wish_dir` up to
/// `wish_speed`, at a rate bounded by `accel` and `dt`.
pub fn accelerate(ps: &mut PlayerState, wish_dir: Vector3, wish_speed: f32, accel: f32, dt: f32) {
    let current_speed = math::math::dot(&ps.velocity, &wish_dir);
    let add_speed = wish_speed - current_speed;
    if add_speed <= 0.0 {
        return;
    }

    let mut accel_speed = accel * wish_speed * dt;
    if accel_speed > add_speed {
        accel_speed = add_speed;
    }

    ps.velocity += wish_dir * accel_speed;
}

/// Air-accelerate variant used for strafe-jumping: `add_speed` is computed
/// against a capped wish-speed so it stays positive at large off-axis
/// angles even once the player is already faster than `wish_speed`, while
/// the actual impulse magnitude still scales with the uncapped speed. This
/// dual-wishspeed split is the entire strafe-jump mechanism.
pub fn air_accelerate(
    ps: &mut PlayerState,
    wish_dir: Vector3,
    wish_speed: f32,
    accel: f32,
    dt: f32,
    wishspeed_cap: f32,
) {
    let capped_wish_speed = wish_speed.min(wishspeed_cap);
    let current_speed = math::math::dot(&ps.velocity, &wish_dir);
    let add_speed = capped_wish_speed - current_speed;
    if add_speed <= 0.0 {
        return;
    }

    let mut accel_speed = accel * wish_speed * dt;
    if accel_speed > add_speed {
        accel_speed = add_speed;
    }

    ps.velocity += wish_dir * accel_speed;
}

/// Ground friction. Below 0.1 u/s the player is considered stopped: XY is
/// zeroed outright rather than asymptotically decayed, so resting players
/// don't jitter at the float-precision floor.
pub fn apply_friction(ps: &mut PlayerState, tuning: &Tuning, dt: f32) {
    let horizontal = Vector3::new(ps.velocity.x, ps.velocity.y, 0.0);
    let speed = horizontal.length();

    if speed < 0.1 {
        ps.velocity.x = 0.0;
        ps.velocity.y = 0.0;
        return;
    }

    let control = speed.max(tuning.stop_speed);
    let drop = control * tuning.ground_friction * dt;
    let new_speed = (speed - drop).max(0.0);
    let scale = new_speed / speed;

    ps.velocity.x *= scale;
    ps.velocity.y *= scale;
}

/// CPM "W-turn" air control: rotates horizontal velocity toward `wish_dir`
/// without changing its magnitude, letting a player holding forward-only
/// air input carve a turn instead of bleeding speed.
pub fn cpm_air_control(ps: &mut PlayerState, wish_dir: Vector3, tuning: &Tuning, dt: f32) {
    let vz = ps.velocity.z;
    let mut horizontal = Vector3::new(ps.velocity.x, ps.velocity.y, 0.0);
    let speed = horizontal.length().max(1.0);
    let vel_dir = horizontal / speed;

    let dot = math::math::dot(&vel_dir, &wish_dir);
    if dot > 0.0 {
        let k = 32.0 * tuning.cpm_air_control_mult * dot * dot * dt;
        let blended = vel_dir * speed + wish_dir * k;
        horizontal = blended.normalize() * speed;
    }

    ps.velocity.x = horizontal.x;
    ps.velocity.y = horizontal.y;
    ps.velocity.z = vz;
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::player_state::player_init;

    fn fresh_ps() -> PlayerState {
        let mut ps = PlayerState::default();
        player_init(&mut ps, Vector3::default());
        ps
    }

    #[test]
    fn accelerate_from_rest_builds_toward_wish_speed() {
        let mut ps = fresh_ps();
        let wish_dir = Vector3::new(1.0, 0.0, 0.0);
        accelerate(&mut ps, wish_dir, 320.0, 10.0, 1.0 / 128.0);
        assert!(ps.velocity.x > 0.0);
        assert!(ps.velocity.x <= 320.0);
    }

    #[test]
    fn accelerate_stops_adding_once_at_wish_speed() {
        let mut ps = fresh_ps();
        ps.velocity = Vector3::new(320.0, 0.0, 0.0);
        let wish_dir = Vector3::new(1.0, 0.0, 0.0);
        accelerate(&mut ps, wish_dir, 320.0, 10.0, 1.0 / 128.0);
        assert_eq!(ps.velocity.x, 320.0);
    }

    #[test]
    fn air_accelerate_still_adds_speed_above_wish_speed_at_shallow_angle() {
        let mut ps = fresh_ps();
        // Already faster than the capped wishspeed but nearly orthogonal to
        // wish_dir, the classic strafe-jump setup.
        ps.velocity = Vector3::new(0.0, 320.0, 0.0);
        let wish_dir = Vector3::new(1.0, 0.001, 0.0).normalize();
        let before = ps.velocity;
        air_accelerate(&mut ps, wish_dir, 320.0, 1.0, 1.0 / 128.0, 30.0);
        assert!(ps.velocity.length() >= before.length());
    }

    #[test]
    fn friction_below_threshold_zeroes_horizontal_velocity() {
        let mut ps = fresh_ps();
        ps.velocity = Vector3::new(0.05, 0.0, -10.0);
        apply_friction(&mut ps, &Tuning::vq3(), 1.0 / 128.0);
        assert_eq!(ps.velocity.x, 0.0);
        assert_eq!(ps.velocity.z, -10.0);
    }

    #[test]
    fn friction_preserves_vertical_velocity() {
        let mut ps = fresh_ps();
        ps.velocity = Vector3::new(200.0, 0.0, -33.0);
        apply_friction(&mut ps, &Tuning::vq3(), 1.0 / 128.0);
        assert_eq!(ps.velocity.z, -33.0);
    }

    #[test]
    fn cpm_air_control_preserves_speed_magnitude() {
        let mut ps = fresh_ps();
        ps.velocity = Vector3::new(300.0, 0.0, -50.0);
        let wish_dir = Vector3::new(0.7, 0.7, 0.0).normalize();
        let before_speed = Vector3::new(ps.velocity.x, ps.velocity.y, 0.0).length();
        cpm_air_control(&mut ps, wish_dir, &Tuning::cpm(), 1.0 / 128.0);
        let after_speed = Vector3::new(ps.velocity.x, ps.velocity.y, 0.0).length();
        assert!((before_speed - after_speed).abs() < 1e-2);
        assert_eq!(ps.velocity.z, -50.0);
    }
}
