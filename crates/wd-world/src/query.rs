//! The query interface consumed by sensors and behavior.

use glam::Vec2;

use wd_core::ColliderId;

use crate::{Layer, LayerMask};

/// The first collider struck by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space impact point.
    pub point: Vec2,
    /// Distance from the ray origin to `point`.
    pub distance: f32,
    /// Layer of the struck collider.
    pub layer: Layer,
    pub collider: ColliderId,
}

/// Spatial queries against the static and dynamic colliders of a world.
///
/// Implemented by [`CollisionWorld`][crate::CollisionWorld]; engines with
/// their own physics can implement it over their native scene instead.
pub trait PhysicsQuery {
    /// Cast a ray from `origin` along the unit vector `direction`, at most
    /// `max_distance` far, against colliders on layers in `mask`.
    ///
    /// Returns the nearest hit, or `None` if the ray hits nothing.
    fn raycast(
        &self,
        origin:       Vec2,
        direction:    Vec2,
        max_distance: f32,
        mask:         LayerMask,
    ) -> Option<RayHit>;

    /// `true` if any collider on a layer in `mask` touches the circle.
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> bool;
}
