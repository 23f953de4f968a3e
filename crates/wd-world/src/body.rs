//! The physics body the behavior controller drives.
//!
//! Real engines own their bodies; the controller only needs the small surface
//! in [`Body`].  [`KinematicBody`] is a minimal gravity-and-boxes
//! implementation used by the simulation driver and tests.

use glam::Vec2;

use crate::{Aabb, CollisionWorld, LayerMask};

/// Movement surface of a physics body.
pub trait Body {
    /// Centre of the body.
    fn position(&self) -> Vec2;

    fn velocity(&self) -> Vec2;

    /// Set the horizontal velocity, leaving the vertical component untouched.
    fn set_horizontal_velocity(&mut self, vx: f32);

    /// Apply an instantaneous impulse (change in momentum).
    fn apply_impulse(&mut self, impulse: Vec2);

    /// `true` while the body rests on something solid.
    fn is_grounded(&self) -> bool;

    /// Advance by `dt` seconds against the static and dynamic colliders in
    /// `world`.
    fn step(&mut self, dt: f32, world: &CollisionWorld);
}

// ── KinematicBody ─────────────────────────────────────────────────────────────

/// A box body with gravity that stops against solid colliders.
///
/// Integration is axis-separated: the horizontal move is attempted first and
/// cancelled if it would overlap a solid collider, then the vertical move.
/// Touching is not overlapping, so a body resting exactly on a floor slides
/// freely along it.
#[derive(Debug, Clone)]
pub struct KinematicBody {
    pub position:     Vec2,
    pub velocity:     Vec2,
    pub half_extents: Vec2,
    pub mass:         f32,
    /// Downward acceleration in units/s².
    pub gravity:      f32,
    /// Layers the body collides with.
    pub solid_mask:   LayerMask,
    grounded:         bool,
    blocked_x:        bool,
}

impl KinematicBody {
    pub fn new(position: Vec2, half_extents: Vec2, solid_mask: LayerMask) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            half_extents: half_extents.abs(),
            mass: 1.0,
            gravity: 9.81,
            solid_mask,
            grounded: false,
            blocked_x: false,
        }
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass.max(f32::EPSILON);
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Bounds of the body if its centre were at `center`.
    pub fn bounds_at(&self, center: Vec2) -> Aabb {
        Aabb { min: center - self.half_extents, max: center + self.half_extents }
    }

    /// `true` if the last horizontal move was stopped by a collider.
    pub fn is_blocked(&self) -> bool {
        self.blocked_x
    }

    /// Advance the body by `dt` seconds against `world`.
    pub fn integrate(&mut self, dt: f32, world: &CollisionWorld) {
        self.velocity.y -= self.gravity * dt;

        let dx = self.velocity.x * dt;
        if dx != 0.0 {
            let moved = self.bounds_at(self.position + Vec2::new(dx, 0.0));
            self.blocked_x = world.overlap_aabb(&moved, self.solid_mask);
            if !self.blocked_x {
                self.position.x += dx;
            }
        }

        let dy = self.velocity.y * dt;
        let moved = self.bounds_at(self.position + Vec2::new(0.0, dy));
        if world.overlap_aabb(&moved, self.solid_mask) {
            self.grounded = self.velocity.y <= 0.0;
            self.velocity.y = 0.0;
        } else {
            self.position.y += dy;
            self.grounded = false;
        }
    }
}

impl Body for KinematicBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_horizontal_velocity(&mut self, vx: f32) {
        self.velocity.x = vx;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse / self.mass;
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn step(&mut self, dt: f32, world: &CollisionWorld) {
        self.integrate(dt, world);
    }
}
