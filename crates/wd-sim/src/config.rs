use glam::Vec2;
use wd_world::{Layer, LayerMask};

use crate::{SimError, SimResult};

/// How often the sight sensor is sampled.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "snake_case"))]
pub enum SensorCadence {
    /// Once per physics tick.
    #[default]
    EveryTick,
    /// On visual frames, at most once per `interval_secs`; physics ticks in
    /// between reuse the last result.
    Throttled { interval_secs: f64 },
}

/// Driver configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Fixed physics step (e.g. 0.02 for 50 Hz).
    pub physics_step_secs:       f64,
    pub sensor_cadence:          SensorCadence,
    /// Horizontal half-width of each waypoint's trigger zone.
    pub waypoint_trigger_radius: f32,
    /// Wall probe centre relative to the body, with `x` mirrored by facing.
    pub wall_probe_offset:       Vec2,
    pub wall_probe_radius:       f32,
    pub wall_mask:               LayerMask,
    /// Well-known identifier the target is resolved by.
    pub target_tag:              String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            physics_step_secs:       0.02,
            sensor_cadence:          SensorCadence::EveryTick,
            waypoint_trigger_radius: 0.25,
            wall_probe_offset:       Vec2::new(0.6, 0.0),
            wall_probe_radius:       0.2,
            wall_mask:               Layer::WALL.into(),
            target_tag:              "Player".to_string(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> SimResult<()> {
        if let SensorCadence::Throttled { interval_secs } = self.sensor_cadence {
            if !interval_secs.is_finite() || interval_secs <= 0.0 {
                return Err(SimError::Config(format!(
                    "sensor interval must be positive, got {interval_secs}"
                )));
            }
        }
        if !self.waypoint_trigger_radius.is_finite() || self.waypoint_trigger_radius < 0.0 {
            return Err(SimError::Config(format!(
                "waypoint trigger radius must be non-negative, got {}",
                self.waypoint_trigger_radius
            )));
        }
        if !self.wall_probe_radius.is_finite() || self.wall_probe_radius < 0.0 {
            return Err(SimError::Config(format!(
                "wall probe radius must be non-negative, got {}",
                self.wall_probe_radius
            )));
        }
        Ok(())
    }
}
