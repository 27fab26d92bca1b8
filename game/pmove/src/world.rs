use math::math::vector::Vector3;

use crate::brush::{Brush, Plane};
use crate::error::PMoveError;

/// Ordered, immutable collection of brushes. No acceleration structure
/// beyond each brush's own AABB is required; `trace_world` does a linear
/// scan with an AABB reject test per brush.
#[derive(Debug, Clone, Default)]
pub struct CollisionWorld {
    pub brushes: Vec<Brush>,
}

impl CollisionWorld {
    /// Explicit constructor for a world with no collision geometry at all.
    /// Prefer this over an empty `brushes` vec reaching
    /// `world_create_from_brushes` by accident.
    pub fn empty() -> Self {
        Self { brushes: Vec::new() }
    }
}

/// Builds a world from caller-supplied brushes. Rejects an empty list: an
/// empty world is almost always a map-load bug, not an intentional
/// voidless arena (see `CollisionWorld::empty` for the intentional case).
pub fn world_create_from_brushes(brushes: Vec<Brush>) -> Result<CollisionWorld, PMoveError> {
    if brushes.is_empty() {
        return Err(PMoveError::EmptyBrushList);
    }
    log::debug!(
        "built collision world: {} brushes, {} planes total",
        brushes.len(),
        brushes.iter().map(|b| b.planes.len()).sum::<usize>()
    );
    Ok(CollisionWorld { brushes })
}

fn box_brush(mins: Vector3, maxs: Vector3) -> Brush {
    Brush::new(vec![
        Plane::new(Vector3::new(1.0, 0.0, 0.0), maxs.x),
        Plane::new(Vector3::new(-1.0, 0.0, 0.0), -mins.x),
        Plane::new(Vector3::new(0.0, 1.0, 0.0), maxs.y),
        Plane::new(Vector3::new(0.0, -1.0, 0.0), -mins.y),
        Plane::new(Vector3::new(0.0, 0.0, 1.0), maxs.z),
        Plane::new(Vector3::new(0.0, 0.0, -1.0), -mins.z),
    ])
}

/// A sealed 512-unit cubic room (floor at z = 0, walls at x,y = +-256,
/// ceiling at z = 512) with one interior 16-unit step platform at the
/// origin, for use by self-tests and by embedders that want a default
/// arena rather than plumbing a real map loader through at prototype time.
pub fn world_create_test_room() -> CollisionWorld {
    let slab = 32.0;
    let brushes = vec![
        // floor
        box_brush(
            Vector3::new(-256.0, -256.0, -slab),
            Vector3::new(256.0, 256.0, 0.0),
        ),
        // ceiling
        box_brush(
            Vector3::new(-256.0, -256.0, 512.0),
            Vector3::new(256.0, 256.0, 512.0 + slab),
        ),
        // +X wall
        box_brush(
            Vector3::new(256.0, -256.0, 0.0),
            Vector3::new(256.0 + slab, 256.0, 512.0),
        ),
        // -X wall
        box_brush(
            Vector3::new(-256.0 - slab, -256.0, 0.0),
            Vector3::new(-256.0, 256.0, 512.0),
        ),
        // +Y wall
        box_brush(
            Vector3::new(-256.0, 256.0, 0.0),
            Vector3::new(256.0, 256.0 + slab, 512.0),
        ),
        // -Y wall
        box_brush(
            Vector3::new(-256.0, -256.0 - slab, 0.0),
            Vector3::new(256.0, -256.0, 512.0),
        ),
        // interior step platform
        box_brush(Vector3::new(-64.0, -64.0, 0.0), Vector3::new(64.0, 64.0, 16.0)),
    ];
    log::debug!("built test room: {} brushes", brushes.len());
    CollisionWorld { brushes }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_brush_list_is_rejected() {
        assert_eq!(
            world_create_from_brushes(Vec::new()).unwrap_err(),
            PMoveError::EmptyBrushList
        );
    }

    #[test]
    fn non_empty_brush_list_builds_world() {
        let b = box_brush(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));
        let world = world_create_from_brushes(vec![b]).unwrap();
        assert_eq!(world.brushes.len(), 1);
    }

    #[test]
    fn test_room_has_seven_brushes() {
        assert_eq!(world_create_test_room().brushes.len(), 7);
    }
}
