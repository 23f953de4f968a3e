//! Collision world and builder.
//!
//! # Data layout
//!
//! Static colliders (floors, walls, crates) are bulk-loaded into an R-tree
//! (via `rstar`) once at build time.  Ray casts query the tree with the
//! ray's bounding box and run an exact slab test on the candidates only.
//!
//! Dynamic colliders (the target marker, moving platforms) change every tick,
//! so they live in a plain `Vec` scanned linearly.  Worlds are expected to
//! hold a handful of them at most.
//!
//! `ColliderId`s are dense: static colliders get `0..static_count`, dynamic
//! colliders continue from `static_count`.

use glam::Vec2;
use rstar::{RTree, RTreeObject, AABB};

use wd_core::ColliderId;

use crate::{Aabb, Layer, LayerMask, PhysicsQuery, RayHit, WorldError, WorldResult};

// ── Collider ──────────────────────────────────────────────────────────────────

/// A box collider on one layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub id:     ColliderId,
    pub bounds: Aabb,
    pub layer:  Layer,
}

impl RTreeObject for Collider {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bounds.min.to_array(), self.bounds.max.to_array())
    }
}

fn envelope_of(a: Vec2, b: Vec2) -> AABB<[f32; 2]> {
    AABB::from_corners(a.min(b).to_array(), a.max(b).to_array())
}

// ── CollisionWorld ────────────────────────────────────────────────────────────

/// Static geometry in an R-tree plus a small list of movable colliders.
///
/// Do not construct directly; use [`CollisionWorldBuilder`].
pub struct CollisionWorld {
    static_idx:   RTree<Collider>,
    static_count: usize,
    dynamic:      Vec<Collider>,
}

impl CollisionWorld {
    /// A world with no colliders.  Every ray misses.
    pub fn empty() -> Self {
        CollisionWorldBuilder::new().build()
    }

    pub fn static_count(&self) -> usize {
        self.static_count
    }

    pub fn dynamic_count(&self) -> usize {
        self.dynamic.len()
    }

    pub fn collider_count(&self) -> usize {
        self.static_count + self.dynamic.len()
    }

    /// Register a movable collider and return its id.
    pub fn insert_dynamic(&mut self, bounds: Aabb, layer: Layer) -> ColliderId {
        let id = ColliderId((self.static_count + self.dynamic.len()) as u32);
        self.dynamic.push(Collider { id, bounds, layer });
        id
    }

    /// Replace the bounds of a dynamic collider.
    pub fn move_dynamic(&mut self, id: ColliderId, bounds: Aabb) -> WorldResult<()> {
        let slot = self.dynamic_slot(id)?;
        self.dynamic[slot].bounds = bounds;
        Ok(())
    }

    /// Current bounds of a dynamic collider.
    pub fn dynamic_bounds(&self, id: ColliderId) -> WorldResult<Aabb> {
        let slot = self.dynamic_slot(id)?;
        Ok(self.dynamic[slot].bounds)
    }

    /// `true` if any collider on a layer in `mask` strictly overlaps `bounds`.
    pub fn overlap_aabb(&self, bounds: &Aabb, mask: LayerMask) -> bool {
        self.candidates(envelope_of(bounds.min, bounds.max))
            .any(|c| mask.contains(c.layer) && c.bounds.overlaps(bounds))
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn dynamic_slot(&self, id: ColliderId) -> WorldResult<usize> {
        if id.index() < self.static_count {
            return Err(WorldError::StaticCollider(id));
        }
        let slot = id.index() - self.static_count;
        if slot >= self.dynamic.len() {
            return Err(WorldError::ColliderNotFound(id));
        }
        Ok(slot)
    }

    /// Static colliders whose envelope intersects `env`, then every dynamic
    /// collider.
    fn candidates(&self, env: AABB<[f32; 2]>) -> impl Iterator<Item = &Collider> + '_ {
        self.static_idx
            .locate_in_envelope_intersecting(&env)
            .chain(self.dynamic.iter())
    }
}

impl PhysicsQuery for CollisionWorld {
    fn raycast(
        &self,
        origin:       Vec2,
        direction:    Vec2,
        max_distance: f32,
        mask:         LayerMask,
    ) -> Option<RayHit> {
        if max_distance <= 0.0 || mask.is_empty() || direction.length_squared() == 0.0 {
            return None;
        }
        let end = origin + direction * max_distance;

        self.candidates(envelope_of(origin, end))
            .filter(|c| mask.contains(c.layer))
            .filter_map(|c| {
                c.bounds
                    .ray_distance(origin, direction, max_distance)
                    .map(|t| (t, c))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(t, c)| RayHit {
                point:    origin + direction * t,
                distance: t,
                layer:    c.layer,
                collider: c.id,
            })
    }

    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> bool {
        let r = Vec2::splat(radius.abs());
        self.candidates(envelope_of(center - r, center + r))
            .any(|c| mask.contains(c.layer) && c.bounds.overlaps_circle(center, radius))
    }
}

// ── CollisionWorldBuilder ─────────────────────────────────────────────────────

/// Construct a [`CollisionWorld`] incrementally, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use glam::Vec2;
/// use wd_world::{CollisionWorldBuilder, Layer, LayerMask, PhysicsQuery};
///
/// let mut b = CollisionWorldBuilder::new();
/// b.add_box(Vec2::new(5.0, 0.0), Vec2::new(6.0, 3.0), Layer::WALL).unwrap();
/// let world = b.build();
/// let hit = world.raycast(Vec2::new(0.0, 1.0), Vec2::X, 10.0, Layer::WALL.into());
/// assert_eq!(hit.map(|h| h.distance), Some(5.0));
/// ```
pub struct CollisionWorldBuilder {
    colliders: Vec<Collider>,
}

impl CollisionWorldBuilder {
    pub fn new() -> Self {
        Self { colliders: Vec::new() }
    }

    /// Add a static box spanning two corners.
    pub fn add_box(&mut self, a: Vec2, b: Vec2, layer: Layer) -> WorldResult<ColliderId> {
        let bounds = Aabb::from_corners(a, b)?;
        Ok(self.add_aabb(bounds, layer))
    }

    /// Add a static box from pre-built bounds.
    pub fn add_aabb(&mut self, bounds: Aabb, layer: Layer) -> ColliderId {
        let id = ColliderId(self.colliders.len() as u32);
        self.colliders.push(Collider { id, bounds, layer });
        id
    }

    /// Bulk-load the R-tree and return the world.
    pub fn build(self) -> CollisionWorld {
        let static_count = self.colliders.len();
        CollisionWorld {
            static_idx: RTree::bulk_load(self.colliders),
            static_count,
            dynamic: Vec::new(),
        }
    }
}

impl Default for CollisionWorldBuilder {
    fn default() -> Self {
        Self::new()
    }
}
