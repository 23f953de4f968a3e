//! Plain data row types written by trace backends.

use wd_behavior::BehaviorEvent;

/// End-of-tick state of the agent.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRow {
    pub tick:             u64,
    pub time_secs:        f64,
    pub state:            &'static str,
    pub x:                f32,
    pub y:                f32,
    pub vx:               f32,
    pub vy:               f32,
    pub facing:           &'static str,
    pub grounded:         bool,
    pub sees_target:      bool,
    pub movement_enabled: bool,
    pub patrol_index:     u32,
}

/// One behavior event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub tick:   u64,
    /// [`BehaviorEvent::kind`].
    pub kind:   &'static str,
    /// Event payload as text; empty for payload-free events.
    pub detail: String,
}

impl EventRow {
    pub fn from_event(tick: u64, event: &BehaviorEvent) -> Self {
        let detail = match event {
            BehaviorEvent::StateChanged { from, to } => format!("{from}->{to}"),
            BehaviorEvent::TargetSpotted { at }      => format!("{} {}", at.x, at.y),
            BehaviorEvent::WaypointReached { index }
            | BehaviorEvent::PatrolResumed { index }
            | BehaviorEvent::ResumeDiscarded { index } => index.to_string(),
            BehaviorEvent::AttackLaunched
            | BehaviorEvent::Jumped
            | BehaviorEvent::DetectTimedOut => String::new(),
        };
        Self { tick, kind: event.kind(), detail }
    }
}

/// One sensor cast (or cone edge) from a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayRow {
    pub tick:    u64,
    /// Position of the ray within its sample.
    pub index:   u32,
    pub from_x:  f32,
    pub from_y:  f32,
    pub to_x:    f32,
    pub to_y:    f32,
    pub outcome: &'static str,
}
