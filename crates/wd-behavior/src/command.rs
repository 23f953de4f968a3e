//! What the controller asks its collaborators to do.

use glam::Vec2;
use wd_core::Facing;
use wd_sight::AimMode;

use crate::BehaviorState;

/// A request produced by the controller and executed by the driver, in
/// order, against the body, the sensor, the animation sink or the observer.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Set the body's horizontal velocity (units per second).  Vertical
    /// velocity is left alone.
    MoveX(f32),
    /// Add an impulse to the body.
    Impulse(Vec2),
    /// Turn the body and the sensor's default aim.
    Face(Facing),
    /// Switch the sensor's aim mode.
    Aim(AimMode),
    /// Forward a cue to the animation sink.
    Animate(AnimCue),
    /// Report an occurrence to the observer.
    Notify(BehaviorEvent),
}

/// Named animation requests.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum AnimCue {
    /// The "Move" boolean.
    Move(bool),
    Detect,
    Pursue,
    Search,
    Return,
    LostSight,
    StartAttack,
    Attack,
}

impl AnimCue {
    /// Parameter name on the animation side.
    pub fn as_str(self) -> &'static str {
        match self {
            AnimCue::Move(_)     => "Move",
            AnimCue::Detect      => "Detect",
            AnimCue::Pursue      => "Pursue",
            AnimCue::Search      => "Search",
            AnimCue::Return      => "Return",
            AnimCue::LostSight   => "LostSight",
            AnimCue::StartAttack => "StartAttack",
            AnimCue::Attack      => "Attack",
        }
    }
}

/// Callbacks from the animation side into the controller.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum AnimationEvent {
    /// The detection animation finished; `Detect → Check`.
    DetectionFinished,
    MovementOn,
    MovementOff,
}

/// Observable occurrences, delivered through `Command::Notify`.
#[derive(Clone, Debug, PartialEq)]
pub enum BehaviorEvent {
    StateChanged { from: BehaviorState, to: BehaviorState },
    /// The target was first noticed from `Patrol`.
    TargetSpotted { at: Vec2 },
    WaypointReached { index: usize },
    /// A patrol wait completed and the agent moved on to `index`.
    PatrolResumed { index: usize },
    /// A patrol wait came due after the state had changed; nothing was done.
    ResumeDiscarded { index: usize },
    AttackLaunched,
    Jumped,
    /// `Detect` was left because the detection animation never reported back.
    DetectTimedOut,
}

impl BehaviorEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            BehaviorEvent::StateChanged { .. }    => "state_changed",
            BehaviorEvent::TargetSpotted { .. }   => "target_spotted",
            BehaviorEvent::WaypointReached { .. } => "waypoint_reached",
            BehaviorEvent::PatrolResumed { .. }   => "patrol_resumed",
            BehaviorEvent::ResumeDiscarded { .. } => "resume_discarded",
            BehaviorEvent::AttackLaunched         => "attack_launched",
            BehaviorEvent::Jumped                 => "jumped",
            BehaviorEvent::DetectTimedOut         => "detect_timed_out",
        }
    }
}
