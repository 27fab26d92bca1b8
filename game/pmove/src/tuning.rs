use serde::{Deserialize, Serialize};

use crate::error::PMoveError;

pub const TICK_RATE: u32 = 128;
pub const TICK_DT: f32 = 1.0 / TICK_RATE as f32;

pub const MIN_WALK_NORMAL: f32 = 0.7;
pub const STEP_HEIGHT: f32 = 18.0;
pub const OVERCLIP: f32 = 1.001;
pub const TRACE_EPSILON: f32 = 1.0 / 32.0;
pub const CLIP_EPSILON: f32 = 0.001;
pub const MAX_CLIP_PLANES: usize = 5;

/// Movement-constant bundle, threaded by reference into every Accel/PMove
/// function that reads one. Keeping these as fields rather than bare
/// module-level constants is what lets the tick functions be pure in their
/// explicit inputs, so two rulesets (or a future third) can coexist in the
/// same process without global mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub ground_friction: f32,
    pub stop_speed: f32,
    pub ground_accel: f32,
    pub air_accel: f32,
    pub air_wishspeed_cap: f32,
    pub air_speed_frac: f32,
    pub jump_velocity: f32,

    pub jump_buffer_ticks: u32,
    pub skim_ticks: u32,

    pub cpm: bool,
    pub cpm_double_jump_window_ticks: u32,
    pub cpm_double_jump_boost: f32,
    pub cpm_air_control_mult: f32,
    pub cpm_strafe_accel: f32,
    pub cpm_wish_speed: f32,
    pub autohop_cooldown_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::vq3()
    }
}

impl Tuning {
    /// Classic Quake III Arena movement rules: single air-accelerate branch,
    /// no double jump, no W-turn.
    pub fn vq3() -> Self {
        Self {
            ground_friction: 6.0,
            stop_speed: 100.0,
            ground_accel: 10.0,
            air_accel: 1.0,
            air_wishspeed_cap: 30.0,
            air_speed_frac: 0.84,
            jump_velocity: 270.0,
            jump_buffer_ticks: 6,
            skim_ticks: 25,
            cpm: false,
            cpm_double_jump_window_ticks: 51,
            cpm_double_jump_boost: 0.0,
            cpm_air_control_mult: 150.0,
            cpm_strafe_accel: 70.0,
            cpm_wish_speed: 30.0,
            autohop_cooldown_ticks: 8,
        }
    }

    /// CPM movement rules: higher ground accel, double jump, W-turn and the
    /// exclusive air-input dispatch table.
    pub fn cpm() -> Self {
        Self {
            ground_accel: 15.0,
            cpm: true,
            cpm_double_jump_boost: 50.0,
            ..Self::vq3()
        }
    }

    pub fn named(name: &str) -> Result<Self, PMoveError> {
        match name {
            "vq3" => Ok(Self::vq3()),
            "cpm" => Ok(Self::cpm()),
            other => Err(PMoveError::UnknownPreset(other.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_is_vq3() {
        assert_eq!(Tuning::default(), Tuning::vq3());
    }

    #[test]
    fn named_rejects_unknown_preset() {
        assert_eq!(
            Tuning::named("quake2"),
            Err(PMoveError::UnknownPreset("quake2".to_string()))
        );
    }

    #[test]
    fn named_accepts_known_presets() {
        assert_eq!(Tuning::named("vq3").unwrap(), Tuning::vq3());
        assert_eq!(Tuning::named("cpm").unwrap(), Tuning::cpm());
    }
}
