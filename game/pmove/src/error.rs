use thiserror::Error;

/// Errors for the core's narrow non-hot-path fallible surface.
///
/// Nothing on the per-tick path (`pmove`, `trace_world`, `slide_move`,
/// `accelerate`, ...) returns this; those remain total.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PMoveError {
    #[error("unknown tuning preset `{0}`, expected `vq3` or `cpm`")]
    UnknownPreset(String),
    #[error("cannot build a collision world from zero brushes; use CollisionWorld::empty() if that is intentional")]
    EmptyBrushList,
}
