use std::fmt;

/// The controller's current mode.  Exactly one is active at a time.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviorState {
    /// Walking the route.
    #[default]
    Patrol,
    /// Frozen while the detection animation plays.
    Detect,
    /// Walking to the inspection point.
    Check,
    /// Standing at the inspection point, looking around.
    Search,
    /// Chasing the target.
    Pursue,
    /// In range, attacking on cooldown.
    Attack,
}

impl BehaviorState {
    pub fn as_str(self) -> &'static str {
        match self {
            BehaviorState::Patrol => "patrol",
            BehaviorState::Detect => "detect",
            BehaviorState::Check  => "check",
            BehaviorState::Search => "search",
            BehaviorState::Pursue => "pursue",
            BehaviorState::Attack => "attack",
        }
    }

    /// `true` for states driven by a live sighting of the target.
    #[inline]
    pub fn is_engaged(self) -> bool {
        matches!(self, BehaviorState::Pursue | BehaviorState::Attack)
    }
}

impl fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
