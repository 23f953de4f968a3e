//! Tunable parameters of the behavior controller.

use crate::{BehaviorError, BehaviorResult, BehaviorState};

/// Speeds are in world units per second; times in seconds; radii in world
/// units.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BehaviorConfig {
    pub patrol_speed:    f32,
    pub check_speed:     f32,
    pub pursue_speed:    f32,
    /// Upward impulse applied when the wall probe triggers a jump.
    pub jump_force:      f32,

    /// Search duration before giving up and returning to the route.
    pub max_alert_time:  f64,
    /// Grace period after losing sight of the target during pursuit.
    pub max_pursue_time: f64,
    /// Full 2D distance at which pursuit turns into an attack.
    pub attack_range:    f32,
    pub attack_cooldown: f64,

    /// Horizontal distance at which the inspection point counts as reached
    /// while checking.
    pub arrival_radius:  f32,
    /// Horizontal distance to the inspection point within which a lost
    /// pursuit turns into a search instead of a check.
    pub search_radius:   f32,
    pub jump_cooldown:   f64,

    /// Leave `Detect` on our own after this many seconds if the detection
    /// animation never reports completion.  `None` waits forever.
    pub detect_timeout:  Option<f64>,
    pub initial_state:   BehaviorState,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            patrol_speed:    2.0,
            check_speed:     3.0,
            pursue_speed:    4.5,
            jump_force:      6.0,
            max_alert_time:  3.0,
            max_pursue_time: 2.0,
            attack_range:    1.5,
            attack_cooldown: 1.5,
            arrival_radius:  1.0,
            search_radius:   0.1,
            jump_cooldown:   2.0,
            detect_timeout:  None,
            initial_state:   BehaviorState::Patrol,
        }
    }
}

impl BehaviorConfig {
    /// Reject negative, non-finite or otherwise unusable values.
    pub fn validate(&self) -> BehaviorResult<()> {
        let speeds = [
            ("patrol_speed", self.patrol_speed),
            ("check_speed", self.check_speed),
            ("pursue_speed", self.pursue_speed),
            ("jump_force", self.jump_force),
            ("arrival_radius", self.arrival_radius),
            ("search_radius", self.search_radius),
        ];
        for (name, v) in speeds {
            if !v.is_finite() || v < 0.0 {
                return Err(config_err(name, v as f64));
            }
        }

        let times = [
            ("max_alert_time", self.max_alert_time),
            ("max_pursue_time", self.max_pursue_time),
            ("attack_cooldown", self.attack_cooldown),
            ("jump_cooldown", self.jump_cooldown),
        ];
        for (name, v) in times {
            if !v.is_finite() || v < 0.0 {
                return Err(config_err(name, v));
            }
        }

        if !self.attack_range.is_finite() || self.attack_range <= 0.0 {
            return Err(config_err("attack_range", self.attack_range as f64));
        }
        if let Some(t) = self.detect_timeout {
            if !t.is_finite() || t <= 0.0 {
                return Err(config_err("detect_timeout", t));
            }
        }
        Ok(())
    }
}

fn config_err(field: &str, value: f64) -> BehaviorError {
    BehaviorError::Config(format!("{field} must be finite and non-negative, got {value}"))
}
