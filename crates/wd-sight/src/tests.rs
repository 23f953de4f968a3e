//! Unit tests for wd-sight.

use glam::Vec2;
use wd_core::Facing;
use wd_world::{CollisionWorld, CollisionWorldBuilder, Layer, LayerMask};

use crate::{SightConfig, SightSensor};

// ── Helpers ───────────────────────────────────────────────────────────────────

const HEAD: Vec2 = Vec2::new(3.0, 0.75);
const FEET: Vec2 = Vec2::new(3.0, -0.75);

fn config(fov_degrees: f32) -> SightConfig {
    SightConfig {
        fov_degrees,
        max_distance:     10.0,
        obstruction_mask: LayerMask::from_layers(&[Layer::WALL, Layer::GROUND]),
        target_layer:     Layer::TARGET_MARKER,
        eye_offset:       Vec2::ZERO,
    }
}

/// Sensor at the origin facing right.
fn sensor(fov_degrees: f32) -> SightSensor {
    SightSensor::new(&config(fov_degrees)).unwrap()
}

/// Target marker spanning x ∈ [2.75, 3.25], y ∈ [-1, 1], plus any extra boxes.
fn world_with(extra: &[(Vec2, Vec2, Layer)]) -> CollisionWorld {
    let mut b = CollisionWorldBuilder::new();
    b.add_box(Vec2::new(2.75, -1.0), Vec2::new(3.25, 1.0), Layer::TARGET_MARKER).unwrap();
    for &(lo, hi, layer) in extra {
        b.add_box(lo, hi, layer).unwrap();
    }
    b.build()
}

// ── Heading ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod heading {
    use crate::{Heading, SightError};

    use super::*;

    #[test]
    fn zero_direction_rejected() {
        assert!(matches!(Heading::new(Vec2::ZERO), Err(SightError::ZeroLengthDirection)));
        assert!(Heading::new(Vec2::new(f32::NAN, 1.0)).is_err());
    }

    #[test]
    fn normalizes_input() {
        let h = Heading::new(Vec2::new(0.0, 4.0)).unwrap();
        assert_eq!(h.as_vec(), Vec2::Y);
        assert_eq!(Heading::from_facing(Facing::Left).as_vec(), Vec2::NEG_X);
    }
}

// ── SightSensor ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod sensor {
    use crate::{AimMode, RayOutcome, SightError};

    use super::*;

    #[test]
    fn sees_target_ahead() {
        let world = world_with(&[]);
        assert!(sensor(90.0).can_see_target(&world, Vec2::new(3.0, 0.0), &[HEAD, FEET]));
    }

    #[test]
    fn target_behind_is_outside_cone() {
        let world = world_with(&[]);
        let mut s = sensor(90.0);
        s.set_facing(Facing::Left);
        assert!(!s.can_see_target(&world, Vec2::new(3.0, 0.0), &[HEAD, FEET]));
    }

    #[test]
    fn obstruction_hides_target_regardless_of_angle() {
        // Wall at x ∈ [1, 1.5] fully between eye and target.
        let world = world_with(&[(Vec2::new(1.0, -3.0), Vec2::new(1.5, 3.0), Layer::WALL)]);
        let s = sensor(359.0);
        assert!(!s.can_see_target(&world, Vec2::new(3.0, 0.0), &[HEAD, FEET]));
    }

    #[test]
    fn unblocked_feet_reveal_target() {
        // Wall hangs from y = 0.2 upward, blocking the head ray only.
        let world = world_with(&[(Vec2::new(1.0, 0.2), Vec2::new(1.5, 3.0), Layer::WALL)]);
        let s = sensor(90.0);
        assert!(!s.can_see_target(&world, Vec2::ZERO, &[HEAD]));
        assert!(s.can_see_target(&world, Vec2::ZERO, &[FEET]));
        assert!(s.can_see_target(&world, Vec2::ZERO, &[HEAD, FEET]));
    }

    #[test]
    fn angle_equal_to_half_fov_is_not_visible() {
        // Target straight above the eye; with a 180° cone the angle to it is
        // exactly the half angle.
        let mut b = CollisionWorldBuilder::new();
        b.add_box(Vec2::new(-0.5, 2.5), Vec2::new(0.5, 3.5), Layer::TARGET_MARKER).unwrap();
        let world = b.build();

        let s = sensor(180.0);
        assert!(!s.can_see_target(&world, Vec2::ZERO, &[Vec2::new(0.0, 3.0)]));
        // Leaning slightly forward brings it strictly inside the cone.
        assert!(s.can_see_target(&world, Vec2::ZERO, &[Vec2::new(0.4, 3.0)]));
    }

    #[test]
    fn beyond_max_distance_is_not_visible() {
        let mut b = CollisionWorldBuilder::new();
        b.add_box(Vec2::new(12.0, -1.0), Vec2::new(13.0, 1.0), Layer::TARGET_MARKER).unwrap();
        let world = b.build();
        assert!(!sensor(90.0).can_see_target(&world, Vec2::ZERO, &[Vec2::new(12.5, 0.0)]));
    }

    #[test]
    fn no_probes_sees_nothing() {
        let world = world_with(&[]);
        assert!(!sensor(90.0).can_see_target(&world, Vec2::ZERO, &[]));
    }

    #[test]
    fn pursuit_aim_ignores_facing() {
        let world = world_with(&[]);
        let mut s = sensor(90.0);
        s.set_facing(Facing::Left);
        s.set_aim(AimMode::Pursuit);
        assert!(s.can_see_target(&world, Vec2::new(3.0, 0.0), &[HEAD, FEET]));

        s.set_facing(Facing::Right);
        s.set_aim(AimMode::Alert(Vec2::new(-5.0, 0.0)));
        assert!(!s.can_see_target(&world, Vec2::new(3.0, 0.0), &[HEAD, FEET]));
    }

    #[test]
    fn degenerate_aim_falls_back_to_facing() {
        let mut s = sensor(90.0);
        s.set_origin(Vec2::new(1.0, 1.0));
        s.set_facing(Facing::Left);
        s.set_aim(AimMode::Pursuit);
        assert_eq!(s.aim_heading(Vec2::new(1.0, 1.0)).as_vec(), Vec2::NEG_X);
        s.set_aim(AimMode::Alert(Vec2::new(1.0, 4.0)));
        assert_eq!(s.aim_heading(Vec2::ZERO).as_vec(), Vec2::Y);
    }

    #[test]
    fn track_body_applies_eye_offset() {
        let mut cfg = config(90.0);
        cfg.eye_offset = Vec2::new(0.0, 0.5);
        let mut s = SightSensor::new(&cfg).unwrap();
        s.track_body(Vec2::new(2.0, 1.0));
        assert_eq!(s.origin(), Vec2::new(2.0, 1.5));
    }

    #[test]
    fn sample_records_every_cast() {
        let world = world_with(&[(Vec2::new(1.0, 0.2), Vec2::new(1.5, 3.0), Layer::WALL)]);
        let mut rays = Vec::new();
        let seen = sensor(90.0).sample(&world, Vec2::ZERO, &[HEAD, FEET], &mut rays);
        assert!(seen);

        let outcomes: Vec<RayOutcome> = rays.iter().map(|r| r.outcome).collect();
        assert_eq!(
            outcomes,
            vec![RayOutcome::Boundary, RayOutcome::Boundary, RayOutcome::Blocked, RayOutcome::Seen],
        );
        // Blocked ray stops on the wall face.
        assert!((rays[2].to.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn sample_reports_misses_at_full_length() {
        let world = CollisionWorld::empty();
        let mut rays = Vec::new();
        assert!(!sensor(90.0).sample(&world, Vec2::ZERO, &[Vec2::new(3.0, 0.0)], &mut rays));
        let last = rays.last().unwrap();
        assert_eq!(last.outcome, RayOutcome::Miss);
        assert_eq!(last.to, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn invalid_config_rejected() {
        assert!(matches!(SightSensor::new(&config(0.0)), Err(SightError::InvalidFov(_))));
        assert!(matches!(SightSensor::new(&config(400.0)), Err(SightError::InvalidFov(_))));

        let mut cfg = config(90.0);
        cfg.max_distance = -1.0;
        assert!(matches!(SightSensor::new(&cfg), Err(SightError::InvalidDistance(_))));
    }
}

// ── FieldOfView ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod fov {
    use crate::{FieldOfView, Heading, SightError};

    use super::*;

    fn cone(ray_count: u32) -> FieldOfView {
        FieldOfView {
            fov_degrees:  90.0,
            max_distance: 10.0,
            ray_count,
            mask:         LayerMask::from(Layer::WALL),
        }
    }

    #[test]
    fn mesh_shape_matches_ray_count() {
        let world = CollisionWorld::empty();
        for n in [1, 2, 7, 50] {
            let mesh = cone(n).generate(&world, Vec2::ZERO, Heading::from_facing(Facing::Right));
            assert_eq!(mesh.triangle_count(), n as usize);
            assert_eq!(mesh.vertices.len(), n as usize + 2);
        }
    }

    #[test]
    fn triangles_fan_from_origin() {
        let world = CollisionWorld::empty();
        let mesh = cone(3).generate(&world, Vec2::new(1.0, 2.0), Heading::from_facing(Facing::Right));
        assert_eq!(mesh.triangles, vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);
        assert_eq!(mesh.origin(), Some(Vec2::new(1.0, 2.0)));
        // Sweep runs clockwise: the first rim vertex is the upper edge.
        assert!(mesh.rim()[0].y > 2.0);
        assert!(mesh.rim()[3].y < 2.0);
    }

    #[test]
    fn unobstructed_rays_reach_max_distance() {
        let world = CollisionWorld::empty();
        let mesh = cone(8).generate(&world, Vec2::ZERO, Heading::from_facing(Facing::Left));
        for v in mesh.rim() {
            assert!((v.length() - 10.0).abs() < 1e-4);
            assert!(v.x < 0.0);
        }
    }

    #[test]
    fn obstruction_clips_rim() {
        let mut b = CollisionWorldBuilder::new();
        b.add_box(Vec2::new(5.0, -20.0), Vec2::new(6.0, 20.0), Layer::WALL).unwrap();
        let world = b.build();

        let mesh = cone(2).generate(&world, Vec2::ZERO, Heading::from_facing(Facing::Right));
        // Middle ray points straight along +X.
        assert_eq!(mesh.rim()[1], Vec2::new(5.0, 0.0));
        for v in mesh.rim() {
            assert!((v.x - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn zero_rays_yield_empty_mesh() {
        let world = CollisionWorld::empty();
        let mesh = cone(0).generate(&world, Vec2::ZERO, Heading::from_facing(Facing::Right));
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.rim().is_empty());
        assert!(matches!(cone(0).validate(), Err(SightError::ZeroRayCount)));
        assert!(cone(4).validate().is_ok());
    }

    #[test]
    fn generate_into_reuses_buffers() {
        let world = CollisionWorld::empty();
        let heading = Heading::from_facing(Facing::Right);
        let mut mesh = cone(16).generate(&world, Vec2::ZERO, heading);
        cone(4).generate_into(&world, Vec2::ZERO, heading, &mut mesh);
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.triangle_count(), 4);
    }
}
