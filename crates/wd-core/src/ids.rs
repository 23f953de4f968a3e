//! Strongly typed identifiers.

use std::fmt;

/// Handle to a collider registered in a collision world.
///
/// The inner integer is `pub` so worlds can index their own storage with
/// `id.0 as usize`; callers should prefer [`index`](Self::index).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColliderId(pub u32);

impl ColliderId {
    /// Sentinel meaning "no valid collider".
    pub const INVALID: ColliderId = ColliderId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for ColliderId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for ColliderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColliderId({})", self.0)
    }
}
