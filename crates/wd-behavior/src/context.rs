//! `TickContext`: what the controller is told about the world each tick.

use glam::Vec2;
use wd_core::{SimTime, Tick};

/// Read-only snapshot handed to [`BehaviorController::tick`][crate::BehaviorController::tick].
///
/// The driver fills it from the physics body, the target reference, the
/// sight sensor (or its last throttled sample) and the wall probe.
#[derive(Copy, Clone, Debug)]
pub struct TickContext {
    pub tick:            Tick,
    pub now:             SimTime,
    /// Body centre.
    pub position:        Vec2,
    /// Live target position.
    pub target_position: Vec2,
    /// Sensor result for this tick.
    pub sees_target:     bool,
    /// The forward obstruction probe overlaps a wall.
    pub wall_ahead:      bool,
}
