//! 2-D geometry helpers on top of `glam::Vec2`.
//!
//! Angles are radians.  Range tests compare squared distances against squared
//! thresholds so no square root is taken on the hot path.

use glam::Vec2;

/// Bearing of `dir` in radians, measured counter-clockwise from +X.
#[inline]
pub fn bearing(dir: Vec2) -> f32 {
    dir.y.atan2(dir.x)
}

/// Unit vector for a bearing in radians.
#[inline]
pub fn from_bearing(radians: f32) -> Vec2 {
    Vec2::new(radians.cos(), radians.sin())
}

/// Unsigned angle between two directions, in `[0, π]`.
///
/// Uses `atan2(perp, dot)` rather than `acos(dot)`, which stays accurate near
/// 0 and π and returns exact results for axis-aligned inputs.
#[inline]
pub fn angle_between(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b).atan2(a.dot(b)).abs()
}

/// Sign of the horizontal step from `from_x` towards `to_x`.
///
/// Zero maps to `1.0`, so an agent standing exactly on its goal keeps
/// pushing right rather than stopping.
#[inline]
pub fn horizontal_sign(from_x: f32, to_x: f32) -> f32 {
    if to_x - from_x >= 0.0 { 1.0 } else { -1.0 }
}

/// `true` if `a` and `b` are within `radius` of each other on the X axis.
#[inline]
pub fn within_horizontal(a: Vec2, b: Vec2, radius: f32) -> bool {
    let dx = a.x - b.x;
    dx * dx <= radius * radius
}

/// `true` if `a` and `b` are within `radius` of each other in the plane.
#[inline]
pub fn within_range(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) <= radius * radius
}
