use math::math::vector::Vector3;

/// Player-visible simulation state. Owned by the gameplay layer; the core
/// borrows it mutably for the duration of a single `pmove` call and must
/// not be aliased during it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerState {
    pub origin: Vector3,
    pub velocity: Vector3,

    pub mins: Vector3,
    pub maxs: Vector3,

    pub on_ground: bool,
    pub ground_normal: Vector3,

    pub max_speed: f32,
    pub gravity: f32,

    pub jump_held: bool,
    pub jump_buffer_ticks: u32,

    pub splash_slick_ticks: u32,
    pub skim_ticks: u32,

    pub last_land_tick: u32,
    pub last_jump_tick: u32,
    pub command_time: u32,

    pub autohop_cooldown: u32,
}

/// A single tick's worth of input. Move axes are conventionally in
/// `[-1, 1]`; `buttons` is a bitfield, with [`BUTTON_JUMP`] the only bit the
/// core observes.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserCommand {
    pub forward_move: f32,
    pub side_move: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub buttons: u32,
}

pub const BUTTON_JUMP: u32 = 1 << 0;

impl UserCommand {
    pub fn jump_pressed(&self) -> bool {
        self.buttons & BUTTON_JUMP != 0
    }
}

/// Resets a player to a fresh spawn at `spawn_origin` with the engine's
/// standard collision box and movement constants. Does not touch timers
/// that outlive a single life beyond their zero defaults.
pub fn player_init(ps: &mut PlayerState, spawn_origin: Vector3) {
    *ps = PlayerState {
        origin: spawn_origin,
        velocity: Vector3::default(),
        mins: Vector3::new(-15.0, -15.0, -24.0),
        maxs: Vector3::new(15.0, 15.0, 32.0),
        on_ground: false,
        ground_normal: Vector3::default(),
        max_speed: 320.0,
        gravity: 800.0,
        jump_held: false,
        jump_buffer_ticks: 0,
        splash_slick_ticks: 0,
        skim_ticks: 0,
        last_land_tick: 0,
        last_jump_tick: 0,
        command_time: 0,
        autohop_cooldown: 0,
    };
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn player_init_sets_spawn_box_and_constants() {
        let mut ps = PlayerState::default();
        player_init(&mut ps, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(ps.origin, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(ps.mins, Vector3::new(-15.0, -15.0, -24.0));
        assert_eq!(ps.maxs, Vector3::new(15.0, 15.0, 32.0));
        assert_eq!(ps.max_speed, 320.0);
        assert_eq!(ps.gravity, 800.0);
        assert!(!ps.on_ground);
    }

    #[test]
    fn jump_pressed_reads_the_jump_bit_only() {
        let mut cmd = UserCommand::default();
        assert!(!cmd.jump_pressed());
        cmd.buttons = BUTTON_JUMP;
        assert!(cmd.jump_pressed());
    }
}
