pub mod accel;
pub mod brush;
pub mod clip;
pub mod error;
pub mod fixed_time;
pub mod launch;
pub mod player_state;
pub mod pmove;
pub mod slide;
pub mod trace;
pub mod tuning;
pub mod world;

pub use accel::{accelerate, air_accelerate, apply_friction, cpm_air_control};
pub use brush::{Brush, Plane};
pub use clip::clip_velocity;
pub use error::PMoveError;
pub use fixed_time::{fixed_update, get_alpha, FixedTimeState};
pub use launch::calc_launch_velocity;
pub use player_state::{player_init, PlayerState, UserCommand, BUTTON_JUMP};
pub use pmove::pmove;
pub use slide::{slide_move, step_slide_move};
pub use trace::{trace_world as trace, TraceResult};
pub use tuning::Tuning;
pub use world::{world_create_from_brushes, world_create_test_room, CollisionWorld};
