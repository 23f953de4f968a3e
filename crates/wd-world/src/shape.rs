//! Axis-aligned boxes and their intersection tests.

use glam::Vec2;

use crate::{WorldError, WorldResult};

/// Direction components smaller than this are treated as parallel to an axis.
const PARALLEL_EPS: f32 = 1e-8;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box spanning two opposite corners, in any order.
    ///
    /// Fails if either corner has a non-finite coordinate.
    pub fn from_corners(a: Vec2, b: Vec2) -> WorldResult<Self> {
        if !a.is_finite() || !b.is_finite() {
            return Err(WorldError::InvalidBounds(format!("corners {a} and {b}")));
        }
        Ok(Self { min: a.min(b), max: a.max(b) })
    }

    /// Box centred on `center` extending `half_extents` in each direction.
    pub fn from_center(center: Vec2, half_extents: Vec2) -> WorldResult<Self> {
        let half = half_extents.abs();
        Self::from_corners(center - half, center + half)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Same size, moved so its centre is `center`.
    #[inline]
    pub fn recentered(&self, center: Vec2) -> Self {
        let half = self.half_extents();
        Self { min: center - half, max: center + half }
    }

    /// Inclusive point containment.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Strict overlap: boxes that merely touch along an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// `true` if the circle touches or intersects the box.
    #[inline]
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let nearest = center.clamp(self.min, self.max);
        nearest.distance_squared(center) <= radius * radius
    }

    /// Distance along the ray `origin + t * dir` at which it first enters the
    /// box, for `t` in `[0, max_distance]`.
    ///
    /// A ray that starts inside the box hits it at `t = 0`.  `dir` is expected
    /// to be unit length; the returned `t` is then a distance.
    pub fn ray_distance(&self, origin: Vec2, dir: Vec2, max_distance: f32) -> Option<f32> {
        let mut t_min = 0.0f32;
        let mut t_max = max_distance;

        for axis in 0..2 {
            let o = origin[axis];
            let d = dir[axis];
            let lo = self.min[axis];
            let hi = self.max[axis];

            if d.abs() < PARALLEL_EPS {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t1 = (lo - o) * inv;
            let mut t2 = (hi - o) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}
