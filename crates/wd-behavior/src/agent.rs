use glam::Vec2;
use wd_core::Facing;
use wd_schedule::{Cooldown, Stopwatch};

use crate::BehaviorState;

/// Per-agent mutable record.  Owned and mutated only by
/// [`BehaviorController`][crate::BehaviorController]; the physics body is a
/// delegate, not an owner.
#[derive(Clone, Debug)]
pub struct Agent {
    /// Body centre as of the last tick.
    pub position:         Vec2,
    pub facing:           Facing,
    pub state:            BehaviorState,
    pub movement_enabled: bool,
    pub attack_enabled:   bool,
    pub jump_enabled:     bool,
    /// Last place the target was believed to be.  Set in every state but
    /// `Patrol`.
    pub inspection_point: Option<Vec2>,
    /// X coordinate of the patrol goal; the Y of the goal is always the
    /// body's own.
    pub patrol_goal_x:    f32,
    pub alert_timer:      Stopwatch,
    /// Running only while the target is out of sight during pursuit.
    pub pursue_grace:     Stopwatch,
    pub detect_timer:     Stopwatch,
    pub attack_cooldown:  Cooldown,
    pub jump_cooldown:    Cooldown,
}

impl Agent {
    pub fn new(position: Vec2, state: BehaviorState, patrol_goal_x: f32) -> Self {
        Self {
            position,
            facing:           Facing::default(),
            state,
            movement_enabled: true,
            attack_enabled:   true,
            jump_enabled:     true,
            inspection_point: None,
            patrol_goal_x,
            alert_timer:      Stopwatch::new(),
            pursue_grace:     Stopwatch::new(),
            detect_timer:     Stopwatch::new(),
            attack_cooldown:  Cooldown::new(),
            jump_cooldown:    Cooldown::new(),
        }
    }
}
