use math::math::vector::Vector3;

/// Solves for the launch velocity of a one-shot jump-pad impulse so the
/// player arrives at `target` as the APEX of a ballistic arc (zero vertical
/// velocity there), not merely passing through it. A horizontal-distance/
/// time-based model is not implemented; this is the only variant offered.
pub fn calc_launch_velocity(start: Vector3, target: Vector3, gravity: f32) -> Vector3 {
    let h = (target.z - start.z).max(1.0);
    let t = (2.0 * h / gravity).sqrt();
    let vz = gravity * t;

    let delta_xy = Vector3::new(target.x - start.x, target.y - start.y, 0.0);
    let d_xy = delta_xy.length();

    let (vx, vy) = if d_xy > 1.0 {
        let speed = d_xy / t;
        let dir = delta_xy / d_xy;
        (dir.x * speed, dir.y * speed)
    } else {
        (0.0, 0.0)
    };

    Vector3::new(vx, vy, vz)
}
