//! Unit tests for wd-world.

use glam::Vec2;

use crate::{CollisionWorld, CollisionWorldBuilder, Layer, LayerMask};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Floor along y ∈ [-1, 0], a wall at x ∈ [5, 6], and a crate at x ∈ [10, 11].
fn corridor() -> CollisionWorld {
    let mut b = CollisionWorldBuilder::new();
    b.add_box(Vec2::new(-50.0, -1.0), Vec2::new(50.0, 0.0), Layer::GROUND).unwrap();
    b.add_box(Vec2::new(5.0, 0.0), Vec2::new(6.0, 3.0), Layer::WALL).unwrap();
    b.add_box(Vec2::new(10.0, 0.0), Vec2::new(11.0, 1.0), Layer::DEFAULT).unwrap();
    b.build()
}

// ── Layers ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod layer_tests {
    use super::*;

    #[test]
    fn mask_membership() {
        let mask = LayerMask::from_layers(&[Layer::WALL, Layer::GROUND]);
        assert!(mask.contains(Layer::WALL));
        assert!(mask.contains(Layer::GROUND));
        assert!(!mask.contains(Layer::TARGET_MARKER));
        assert!(!mask.without(Layer::WALL).contains(Layer::WALL));
        assert!(LayerMask::NONE.is_empty());
        assert!(LayerMask::ALL.contains(Layer(31)));
    }

    #[test]
    fn mask_union() {
        let m = LayerMask::from(Layer::WALL) | LayerMask::from(Layer::TARGET_MARKER);
        assert_eq!(m, LayerMask::NONE.with(Layer::WALL).with(Layer::TARGET_MARKER));
    }
}

// ── Aabb ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod shape_tests {
    use crate::Aabb;

    use super::*;

    #[test]
    fn corners_are_normalized() {
        let b = Aabb::from_corners(Vec2::new(2.0, 3.0), Vec2::new(0.0, 1.0)).unwrap();
        assert_eq!(b.min, Vec2::new(0.0, 1.0));
        assert_eq!(b.max, Vec2::new(2.0, 3.0));
        assert_eq!(b.center(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn non_finite_corners_rejected() {
        assert!(Aabb::from_corners(Vec2::new(f32::NAN, 0.0), Vec2::ONE).is_err());
    }

    #[test]
    fn ray_enters_box() {
        let b = Aabb::from_corners(Vec2::new(2.0, -1.0), Vec2::new(3.0, 1.0)).unwrap();
        assert_eq!(b.ray_distance(Vec2::ZERO, Vec2::X, 10.0), Some(2.0));
        assert_eq!(b.ray_distance(Vec2::ZERO, Vec2::NEG_X, 10.0), None);
        // Too short to reach.
        assert_eq!(b.ray_distance(Vec2::ZERO, Vec2::X, 1.5), None);
    }

    #[test]
    fn ray_starting_inside_hits_at_zero() {
        let b = Aabb::from_center(Vec2::ZERO, Vec2::ONE).unwrap();
        assert_eq!(b.ray_distance(Vec2::ZERO, Vec2::Y, 5.0), Some(0.0));
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = Aabb::from_corners(Vec2::ZERO, Vec2::ONE).unwrap();
        let b = Aabb::from_corners(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&a.recentered(Vec2::new(1.0, 0.5))));
    }

    #[test]
    fn circle_overlap() {
        let b = Aabb::from_corners(Vec2::ZERO, Vec2::ONE).unwrap();
        assert!(b.overlaps_circle(Vec2::new(1.25, 0.5), 0.5));
        assert!(!b.overlaps_circle(Vec2::new(1.5, 0.5), 0.25));
    }
}

// ── CollisionWorld ────────────────────────────────────────────────────────────

#[cfg(test)]
mod world_tests {
    use wd_core::ColliderId;

    use crate::{Aabb, PhysicsQuery, WorldError};

    use super::*;

    #[test]
    fn empty_world_misses() {
        let world = CollisionWorld::empty();
        assert!(world.raycast(Vec2::ZERO, Vec2::X, 100.0, LayerMask::ALL).is_none());
        assert!(!world.overlap_circle(Vec2::ZERO, 1.0, LayerMask::ALL));
    }

    #[test]
    fn raycast_returns_nearest_hit() {
        let world = corridor();
        let hit = world
            .raycast(Vec2::new(0.0, 0.5), Vec2::X, 20.0, LayerMask::ALL.without(Layer::GROUND))
            .unwrap();
        assert_eq!(hit.layer, Layer::WALL);
        assert_eq!(hit.distance, 5.0);
        assert_eq!(hit.point, Vec2::new(5.0, 0.5));
    }

    #[test]
    fn raycast_respects_mask() {
        let world = corridor();
        // Wall excluded → the crate behind it is the first hit.
        let hit = world
            .raycast(Vec2::new(0.0, 0.5), Vec2::X, 20.0, Layer::DEFAULT.into())
            .unwrap();
        assert_eq!(hit.distance, 10.0);
        assert!(world.raycast(Vec2::new(0.0, 0.5), Vec2::X, 20.0, LayerMask::NONE).is_none());
    }

    #[test]
    fn raycast_respects_max_distance() {
        let world = corridor();
        assert!(world.raycast(Vec2::new(0.0, 0.5), Vec2::X, 4.9, LayerMask::ALL).is_none());
    }

    #[test]
    fn dynamic_collider_moves() {
        let mut world = corridor();
        let marker = Aabb::from_center(Vec2::new(3.0, 0.5), Vec2::new(0.25, 0.5)).unwrap();
        let id = world.insert_dynamic(marker, Layer::TARGET_MARKER);
        assert_eq!(id, ColliderId(3));
        assert_eq!(world.collider_count(), 4);

        let hit = world.raycast(Vec2::new(0.0, 0.5), Vec2::X, 20.0, LayerMask::ALL).unwrap();
        assert_eq!(hit.collider, id);
        assert_eq!(hit.distance, 2.75);

        // Move the marker behind the wall; the wall now wins.
        world.move_dynamic(id, marker.recentered(Vec2::new(8.0, 0.5))).unwrap();
        let hit = world.raycast(Vec2::new(0.0, 0.5), Vec2::X, 20.0, LayerMask::ALL).unwrap();
        assert_eq!(hit.layer, Layer::WALL);
    }

    #[test]
    fn moving_static_or_unknown_collider_errors() {
        let mut world = corridor();
        let b = Aabb::from_center(Vec2::ZERO, Vec2::ONE).unwrap();
        assert!(matches!(world.move_dynamic(ColliderId(0), b), Err(WorldError::StaticCollider(_))));
        assert!(matches!(world.move_dynamic(ColliderId(9), b), Err(WorldError::ColliderNotFound(_))));
    }

    #[test]
    fn overlap_circle_filters_by_layer() {
        let world = corridor();
        assert!(world.overlap_circle(Vec2::new(4.9, 1.0), 0.2, Layer::WALL.into()));
        assert!(!world.overlap_circle(Vec2::new(4.9, 1.0), 0.2, Layer::DEFAULT.into()));
        assert!(!world.overlap_circle(Vec2::new(4.0, 1.0), 0.2, Layer::WALL.into()));
    }
}

// ── KinematicBody ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod body_tests {
    use crate::{Body, KinematicBody};

    use super::*;

    fn solid() -> LayerMask {
        LayerMask::from_layers(&[Layer::GROUND, Layer::WALL])
    }

    #[test]
    fn resting_body_is_grounded() {
        let world = corridor();
        let mut body = KinematicBody::new(Vec2::new(0.0, 0.5), Vec2::splat(0.5), solid());
        body.integrate(0.1, &world);
        assert!(body.is_grounded());
        assert_eq!(body.position().y, 0.5);
        assert_eq!(body.velocity().y, 0.0);
    }

    #[test]
    fn slides_along_floor() {
        let world = corridor();
        let mut body = KinematicBody::new(Vec2::new(0.0, 0.5), Vec2::splat(0.5), solid());
        body.set_horizontal_velocity(2.0);
        body.integrate(0.5, &world);
        assert_eq!(body.position().x, 1.0);
        assert!(!body.is_blocked());
    }

    #[test]
    fn wall_blocks_horizontal_move() {
        let world = corridor();
        let mut body = KinematicBody::new(Vec2::new(4.45, 0.5), Vec2::splat(0.5), solid());
        body.set_horizontal_velocity(1.0);
        body.integrate(0.25, &world);
        assert!(body.is_blocked());
        assert_eq!(body.position().x, 4.45);
    }

    #[test]
    fn impulse_lifts_body() {
        let world = corridor();
        let mut body = KinematicBody::new(Vec2::new(0.0, 0.5), Vec2::splat(0.5), solid())
            .with_mass(2.0);
        body.apply_impulse(Vec2::new(0.0, 10.0));
        assert_eq!(body.velocity().y, 5.0);
        body.integrate(0.1, &world);
        assert!(body.position().y > 0.5);
        assert!(!body.is_grounded());
    }
}
