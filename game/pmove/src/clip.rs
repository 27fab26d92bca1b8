use math::math::vector::Vector3;

/// Removes the component of `v` along `n`, biased by `overbounce` away from
/// the surface so the next sub-step doesn't immediately re-enter it, then
/// scrubs any residual float error that would still point back into the
/// plane.
pub fn clip_velocity(v: Vector3, n: Vector3, overbounce: f32) -> Vector3 {
    let backoff = math::math::dot(&v, &n) * overbounce;
    let mut r = v - n * backoff;

    if math::math::dot(&r, &n) < 0.0 {
        r -= n * math::math::dot(&r, &n);
    }

    r
}
