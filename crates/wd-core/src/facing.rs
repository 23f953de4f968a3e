//! Horizontal facing and the facing-toggle rule.

use glam::Vec2;

/// Which way the agent looks along the horizontal axis.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// `-1.0` for `Left`, `1.0` for `Right`.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left  => -1.0,
            Facing::Right => 1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Facing {
        match self {
            Facing::Left  => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Unit vector along the facing direction.
    #[inline]
    pub fn as_vec(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Facing::Left  => "left",
            Facing::Right => "right",
        }
    }
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide whether an agent at `agent_x` facing `current` must turn to look
/// at `target_x`.
///
/// Returns the new facing and whether it changed.  The agent only turns when
/// the target is strictly behind it; a target exactly on the agent's axis
/// never causes a flip.
pub fn toggle_facing(current: Facing, agent_x: f32, target_x: f32) -> (Facing, bool) {
    let behind = match current {
        Facing::Right => target_x < agent_x,
        Facing::Left  => target_x > agent_x,
    };
    if behind {
        (current.flipped(), true)
    } else {
        (current, false)
    }
}
