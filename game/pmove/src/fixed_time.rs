use crate::player_state::{PlayerState, UserCommand};
use crate::pmove::pmove;
use crate::tuning::{Tuning, TICK_DT};
use crate::world::CollisionWorld;

const MAX_FRAME_DT: f32 = 0.25;

/// Real-time accumulator driving zero or more fixed-`TICK_DT` `pmove` calls
/// per rendered frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTimeState {
    pub accumulator: f32,
    pub tick_count: u64,
}

/// Clamps `frame_dt` against the spiral-of-death case (a debugger pause or a
/// huge frame hitch), then drains the accumulator in `TICK_DT` steps,
/// calling `pmove` once per step with the same command -- callers resample
/// input once per frame, not once per tick.
pub fn fixed_update(
    ts: &mut FixedTimeState,
    frame_dt: f32,
    ps: &mut PlayerState,
    cmd: &UserCommand,
    world: &CollisionWorld,
    tuning: &Tuning,
) {
    ts.accumulator += frame_dt.min(MAX_FRAME_DT);

    while ts.accumulator >= TICK_DT {
        pmove(ps, cmd, world, tuning, TICK_DT);
        ts.accumulator -= TICK_DT;
        ts.tick_count += 1;
    }
}

/// Fraction of a tick remaining in the accumulator, for render interpolation
/// between the last simulated tick and the next one.
pub fn get_alpha(ts: &FixedTimeState) -> f32 {
    ts.accumulator / TICK_DT
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::player_state::player_init;
    use crate::world::world_create_test_room;
    use math::math::vector::Vector3;

    #[test]
    fn huge_frame_dt_is_clamped_to_avoid_spiral_of_death() {
        let world = world_create_test_room();
        let tuning = Tuning::vq3();
        let mut ps = PlayerState::default();
        player_init(&mut ps, Vector3::new(0.0, 0.0, 24.0));
        let cmd = UserCommand::default();

        let mut ts = FixedTimeState::default();
        fixed_update(&mut ts, 10.0, &mut ps, &cmd, &world, &tuning);

        assert!(ts.tick_count <= (MAX_FRAME_DT / TICK_DT) as u64 + 1);
    }

    #[test]
    fn accumulator_drains_to_less_than_one_tick() {
        let world = world_create_test_room();
        let tuning = Tuning::vq3();
        let mut ps = PlayerState::default();
        player_init(&mut ps, Vector3::new(0.0, 0.0, 24.0));
        let cmd = UserCommand::default();

        let mut ts = FixedTimeState::default();
        fixed_update(&mut ts, 0.1, &mut ps, &cmd, &world, &tuning);

        assert!(ts.accumulator < TICK_DT);
        assert!(get_alpha(&ts) < 1.0);
    }

    #[test]
    fn repeated_frames_accumulate_tick_count() {
        let world = world_create_test_room();
        let tuning = Tuning::vq3();
        let mut ps = PlayerState::default();
        player_init(&mut ps, Vector3::new(0.0, 0.0, 24.0));
        let cmd = UserCommand::default();

        let mut ts = FixedTimeState::default();
        for _ in 0..128 {
            fixed_update(&mut ts, 1.0 / 60.0, &mut ps, &cmd, &world, &tuning);
        }

        assert!(ts.tick_count > 0);
    }
}
