//! Field-of-view polygon generation.
//!
//! A fan of `ray_count + 1` rays sweeps the view cone clockwise, starting at
//! `bearing + fov/2`.  Each ray ends at its first obstruction or at
//! `max_distance`.  The resulting polygon is triangulated as a fan around the
//! origin: vertex 0 is the origin, vertices `1..=ray_count + 1` are the ray
//! ends, and triangle `i` is `(0, i, i + 1)`.

use glam::Vec2;
use wd_core::geo;
use wd_world::{LayerMask, PhysicsQuery};

use crate::{Heading, SightError, SightResult};

/// Parameters of the visualised view cone.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldOfView {
    pub fov_degrees:  f32,
    pub max_distance: f32,
    pub ray_count:    u32,
    /// Layers that clip the polygon.
    pub mask:         LayerMask,
}

impl FieldOfView {
    /// Reject geometry that cannot be generated: zero rays, a non-positive
    /// angle or distance.
    pub fn validate(&self) -> SightResult<()> {
        if self.ray_count == 0 {
            return Err(SightError::ZeroRayCount);
        }
        if !self.fov_degrees.is_finite() || self.fov_degrees <= 0.0 || self.fov_degrees > 360.0 {
            return Err(SightError::InvalidFov(self.fov_degrees));
        }
        if !self.max_distance.is_finite() || self.max_distance <= 0.0 {
            return Err(SightError::InvalidDistance(self.max_distance));
        }
        Ok(())
    }

    /// Build a fresh mesh for a cone at `origin` looking along `heading`.
    pub fn generate<Q>(&self, world: &Q, origin: Vec2, heading: Heading) -> VisibilityMesh
    where
        Q: PhysicsQuery + ?Sized,
    {
        let mut mesh = VisibilityMesh::default();
        self.generate_into(world, origin, heading, &mut mesh);
        mesh
    }

    /// Regenerate `mesh` in place, reusing its buffers.
    ///
    /// With `ray_count == 0` the mesh is left empty.
    pub fn generate_into<Q>(&self, world: &Q, origin: Vec2, heading: Heading, mesh: &mut VisibilityMesh)
    where
        Q: PhysicsQuery + ?Sized,
    {
        mesh.vertices.clear();
        mesh.triangles.clear();
        if self.ray_count == 0 {
            return;
        }

        let n = self.ray_count;
        let fov = self.fov_degrees.to_radians();
        let step = fov / n as f32;
        let start = heading.bearing() + fov * 0.5;

        mesh.vertices.reserve(n as usize + 2);
        mesh.triangles.reserve(n as usize);

        mesh.vertices.push(origin);
        for i in 0..=n {
            let dir = geo::from_bearing(start - i as f32 * step);
            let end = match world.raycast(origin, dir, self.max_distance, self.mask) {
                Some(hit) => hit.point,
                None      => origin + dir * self.max_distance,
            };
            mesh.vertices.push(end);
        }
        for i in 1..=n {
            mesh.triangles.push([0, i, i + 1]);
        }
    }
}

/// Triangulated view polygon.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisibilityMesh {
    /// Origin first, then the ray ends from the counter-clockwise cone edge
    /// to the clockwise one.
    pub vertices:  Vec<Vec2>,
    pub triangles: Vec<[u32; 3]>,
}

impl VisibilityMesh {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn origin(&self) -> Option<Vec2> {
        self.vertices.first().copied()
    }

    /// The ray ends, without the origin.
    #[inline]
    pub fn rim(&self) -> &[Vec2] {
        self.vertices.get(1..).unwrap_or(&[])
    }
}
