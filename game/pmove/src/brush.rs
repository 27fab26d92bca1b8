use math::math::vector::Vector3;

/// Outward-facing half-space boundary. Points `p` with `dot(p, normal) <= d`
/// are on the inside of this plane; a brush's interior is the conjunction of
/// all of its planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3,
    pub d: f32,
}

impl Plane {
    pub fn new(normal: Vector3, d: f32) -> Self {
        Self { normal, d }
    }

    fn signed_distance(&self, p: &Vector3) -> f32 {
        math::math::dot(&self.normal, p) - self.d
    }
}

/// A convex solid: the intersection of its plane list's half-spaces.
/// Immutable once built; `aabb` is derived, not authored.
#[derive(Debug, Clone)]
pub struct Brush {
    pub planes: Vec<Plane>,
    pub mins: Vector3,
    pub maxs: Vector3,
}

const AABB_DETERMINANT_EPSILON: f32 = 1e-6;
const AABB_INSIDE_SLACK: f32 = 0.1;
const AXIAL_ALIGNMENT_EPSILON: f32 = 0.999;

impl Brush {
    /// Builds a brush from a plane list, deriving its AABB by exact
    /// plane-triple vertex enumeration and then closing Minkowski-expansion
    /// gaps with synthetic axial bevel planes.
    pub fn new(planes: Vec<Plane>) -> Self {
        let (mins, maxs) = compute_aabb(&planes);
        let mut brush = Self { planes, mins, maxs };
        add_bevels(&mut brush);
        brush
    }
}

/// Solves the 3x3 system `ni.p = di` for i in {a, b, c} via Cramer's rule.
/// Returns `None` if the planes are coplanar/parallel (determinant too small
/// to trust).
fn solve_vertex(a: &Plane, b: &Plane, c: &Plane) -> Option<Vector3> {
    let row0 = a.normal;
    let row1 = b.normal;
    let row2 = c.normal;

    let det = row0.x * (row1.y * row2.z - row1.z * row2.y)
        - row0.y * (row1.x * row2.z - row1.z * row2.x)
        + row0.z * (row1.x * row2.y - row1.y * row2.x);

    if det.abs() < AABB_DETERMINANT_EPSILON {
        return None;
    }

    let d = Vector3::new(a.d, b.d, c.d);

    // Cramer's rule: replace each column of the normal matrix in turn with
    // the distance vector and divide by the shared determinant.
    let det_x = d.x * (row1.y * row2.z - row1.z * row2.y)
        - row0.y * (d.y * row2.z - row1.z * d.z)
        + row0.z * (d.y * row2.y - row1.y * d.z);

    let det_y = row0.x * (d.y * row2.z - row1.z * d.z)
        - d.x * (row1.x * row2.z - row1.z * row2.x)
        + row0.z * (row1.x * d.z - d.y * row2.x);

    let det_z = row0.x * (row1.y * d.z - d.y * row2.y)
        - row0.y * (row1.x * d.z - d.y * row2.x)
        + d.x * (row1.x * row2.y - row1.y * row2.x);

    Some(Vector3::new(det_x / det, det_y / det, det_z / det))
}

/// Exact AABB derivation by plane-triple vertex enumeration. The alternative
/// per-axis support-projection heuristic is not implemented.
fn compute_aabb(planes: &[Plane]) -> (Vector3, Vector3) {
    let mut mins = Vector3::new(f32::MAX, f32::MAX, f32::MAX);
    let mut maxs = Vector3::new(f32::MIN, f32::MIN, f32::MIN);
    let mut found_any = false;

    for i in 0..planes.len() {
        for j in (i + 1)..planes.len() {
            for k in (j + 1)..planes.len() {
                let Some(p) = solve_vertex(&planes[i], &planes[j], &planes[k]) else {
                    continue;
                };

                let inside = planes.iter().enumerate().all(|(m, plane)| {
                    m == i || m == j || m == k || plane.signed_distance(&p) <= AABB_INSIDE_SLACK
                });

                if !inside {
                    continue;
                }

                found_any = true;
                mins.x = mins.x.min(p.x);
                mins.y = mins.y.min(p.y);
                mins.z = mins.z.min(p.z);
                maxs.x = maxs.x.max(p.x);
                maxs.y = maxs.y.max(p.y);
                maxs.z = maxs.z.max(p.z);
            }
        }
    }

    if found_any {
        (mins, maxs)
    } else {
        (Vector3::default(), Vector3::default())
    }
}

/// Closes Minkowski-expansion gaps at angled edges by ensuring all six axial
/// directions have a supporting plane, synthesizing one from the brush's
/// AABB where the authored plane list doesn't already provide it.
fn add_bevels(brush: &mut Brush) {
    let mut has_axis = [false; 6];
    for plane in &brush.planes {
        let n = plane.normal;
        if n.x > AXIAL_ALIGNMENT_EPSILON {
            has_axis[0] = true;
        } else if n.x < -AXIAL_ALIGNMENT_EPSILON {
            has_axis[1] = true;
        } else if n.y > AXIAL_ALIGNMENT_EPSILON {
            has_axis[2] = true;
        } else if n.y < -AXIAL_ALIGNMENT_EPSILON {
            has_axis[3] = true;
        } else if n.z > AXIAL_ALIGNMENT_EPSILON {
            has_axis[4] = true;
        } else if n.z < -AXIAL_ALIGNMENT_EPSILON {
            has_axis[5] = true;
        }
    }

    let candidates = [
        (Vector3::new(1.0, 0.0, 0.0), brush.maxs.x),
        (Vector3::new(-1.0, 0.0, 0.0), -brush.mins.x),
        (Vector3::new(0.0, 1.0, 0.0), brush.maxs.y),
        (Vector3::new(0.0, -1.0, 0.0), -brush.mins.y),
        (Vector3::new(0.0, 0.0, 1.0), brush.maxs.z),
        (Vector3::new(0.0, 0.0, -1.0), -brush.mins.z),
    ];

    for (axis_idx, (normal, d)) in candidates.into_iter().enumerate() {
        if !has_axis[axis_idx] {
            brush.planes.push(Plane::new(normal, d));
        }
    }
}
