//! Collision layers and layer masks.
//!
//! Every collider lives on exactly one [`Layer`].  Queries take a
//! [`LayerMask`] naming the layers they can hit; everything else is
//! transparent to that query.

/// A single collision layer, `0..32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layer(pub u8);

impl Layer {
    /// Catch-all layer for untagged geometry.
    pub const DEFAULT: Self = Self(0);

    /// Walkable floors and platforms.
    pub const GROUND: Self = Self(3);

    /// Vertical obstacles the agent has to jump over.
    pub const WALL: Self = Self(6);

    /// Marker volume carried by the pursued entity.
    pub const TARGET_MARKER: Self = Self(7);

    /// Bit for this layer inside a [`LayerMask`].
    #[inline]
    pub fn bit(self) -> u32 {
        1u32 << (self.0 & 31)
    }
}

/// A set of layers a query can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Hits nothing.
    pub const NONE: Self = Self(0);

    /// Hits every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// Build a mask from a list of layers.
    pub fn from_layers(layers: &[Layer]) -> Self {
        layers.iter().fold(Self::NONE, |mask, &l| mask.with(l))
    }

    /// This mask plus `layer`.
    #[inline]
    pub fn with(self, layer: Layer) -> Self {
        Self(self.0 | layer.bit())
    }

    /// This mask minus `layer`.
    #[inline]
    pub fn without(self, layer: Layer) -> Self {
        Self(self.0 & !layer.bit())
    }

    /// Check if `layer` is part of this mask.
    #[inline]
    pub fn contains(self, layer: Layer) -> bool {
        self.0 & layer.bit() != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl From<Layer> for LayerMask {
    fn from(layer: Layer) -> Self {
        Self(layer.bit())
    }
}
