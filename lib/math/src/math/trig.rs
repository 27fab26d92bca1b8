//! Deterministic trigonometry for the movement core.
//!
//! Ordinary `f32::sin`/`f32::cos` are not guaranteed bit-identical across
//! platforms or even across compiler versions on the same platform: libm
//! implementations differ, and the compiler is free to lower them through a
//! hardware transcendental unit. A replay or a lockstep simulation that
//! depends on two machines reaching exactly the same `PlayerState` cannot
//! tolerate that. Everything here is built from `+`, `-`, `*` and one `/`,
//! all of which IEEE-754 guarantees to be exact to the representable result,
//! so the same inputs always produce the same bits everywhere.

use std::f32::consts::PI;

const HALF_PI: f32 = PI / 2.0;
const TWO_PI: f32 = PI * 2.0;

/// Folds `angle` into `[-PI, PI]` by repeatedly adding or subtracting a full
/// turn. No cast through an integer type is involved, since rounding a huge
/// `f32` to an integer and back is itself a source of platform-dependent
/// behavior at the edges of the representable range; this converges in a
/// bounded number of steps for any finite input actually produced by the
/// movement core (accumulated view angles stay within a handful of turns).
fn wrap_to_pi(mut angle: f32) -> f32 {
    while angle > PI {
        angle -= TWO_PI;
    }
    while angle < -PI {
        angle += TWO_PI;
    }
    angle
}

/// 7th-order odd minimax polynomial approximation of `sin(x)` for `x` in
/// `[-PI/2, PI/2]`. Every coefficient is an exact `f32` literal, so the
/// polynomial evaluates identically regardless of target architecture.
fn sin_poly(x: f32) -> f32 {
    let x2 = x * x;
    x * (1.0 - x2 * (1.0 / 6.0 - x2 * (1.0 / 120.0 - x2 * (1.0 / 5040.0))))
}

/// Deterministic replacement for `f32::sin`.
///
/// Reduces `angle` to `[-PI, PI]`, reflects the far half of that range
/// about `PI/2` (`sin(x) = sin(PI - x)`) so the polynomial only ever sees
/// `[-PI/2, PI/2]` where it is most accurate, then evaluates it.
pub fn det_sin(angle: f32) -> f32 {
    let a = wrap_to_pi(angle);
    let folded = if a > HALF_PI {
        PI - a
    } else if a < -HALF_PI {
        -PI - a
    } else {
        a
    };
    sin_poly(folded)
}

/// Deterministic replacement for `f32::cos`, defined as `sin(x + PI/2)` so
/// it shares the same polynomial and reduction path as [`det_sin`].
pub fn det_cos(angle: f32) -> f32 {
    det_sin(angle + HALF_PI)
}

use super::vector::Vector3;

/// Builds the right-handed forward/right/up basis for a given pitch and yaw,
/// in degrees, matching the convention that yaw rotates about +Z and pitch
/// tilts away from the horizontal plane. Roll never reaches movement code
/// and is not represented.
pub fn angle_vectors(pitch_deg: f32, yaw_deg: f32) -> (Vector3, Vector3, Vector3) {
    let deg2rad = PI / 180.0;
    let pitch = pitch_deg * deg2rad;
    let yaw = yaw_deg * deg2rad;

    let (sp, cp) = (det_sin(pitch), det_cos(pitch));
    let (sy, cy) = (det_sin(yaw), det_cos(yaw));

    let forward = Vector3::new(cp * cy, cp * sy, sp);
    let right = Vector3::new(sy, -cy, 0.0);
    let up = Vector3::new(-sp * cy, -sp * sy, cp);

    (forward, right, up)
}
