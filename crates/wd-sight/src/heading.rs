//! Validated aim directions.

use glam::Vec2;
use wd_core::{geo, Facing};

use crate::{SightError, SightResult};

/// A unit-length direction.
///
/// Construction rejects zero-length and non-finite vectors, so every
/// `Heading` has a well-defined bearing.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Heading(Vec2);

impl Heading {
    /// Normalize `dir`, failing with [`SightError::ZeroLengthDirection`] if it
    /// cannot be normalized.
    pub fn new(dir: Vec2) -> SightResult<Self> {
        dir.try_normalize().map(Self).ok_or(SightError::ZeroLengthDirection)
    }

    /// Horizontal heading matching a facing.
    #[inline]
    pub fn from_facing(facing: Facing) -> Self {
        Self(facing.as_vec())
    }

    /// Heading for a bearing in radians (counter-clockwise from +X).
    #[inline]
    pub fn from_bearing(radians: f32) -> Self {
        Self(geo::from_bearing(radians))
    }

    #[inline]
    pub fn as_vec(self) -> Vec2 {
        self.0
    }

    /// Bearing in radians, in `(-π, π]`.
    #[inline]
    pub fn bearing(self) -> f32 {
        geo::bearing(self.0)
    }

    /// This heading rotated counter-clockwise by `radians`.
    #[inline]
    pub fn rotated(self, radians: f32) -> Self {
        Self(Vec2::from_angle(radians).rotate(self.0))
    }
}

impl From<Facing> for Heading {
    fn from(facing: Facing) -> Self {
        Self::from_facing(facing)
    }
}
