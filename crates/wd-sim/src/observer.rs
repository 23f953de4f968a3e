//! Simulation observer trait for tracing and data collection.

use glam::Vec2;
use wd_behavior::{AnimCue, BehaviorEvent, BehaviorState};
use wd_core::{Facing, SimTime, Tick};
use wd_sight::{SightRay, VisibilityMesh};

/// End-of-tick state of the agent, handed to
/// [`SimObserver::on_tick_end`].
#[derive(Clone, Debug, PartialEq)]
pub struct TickSnapshot {
    pub tick:             Tick,
    pub time:             SimTime,
    pub state:            BehaviorState,
    pub position:         Vec2,
    pub velocity:         Vec2,
    pub facing:           Facing,
    pub grounded:         bool,
    pub target_position:  Vec2,
    pub sees_target:      bool,
    pub movement_enabled: bool,
    pub patrol_index:     usize,
}

/// Callbacks invoked by [`Sim`][crate::Sim] while it steps.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: transition printer
///
/// ```rust,ignore
/// struct Transitions;
///
/// impl SimObserver for Transitions {
///     fn on_event(&mut self, tick: Tick, event: &BehaviorEvent) {
///         if let BehaviorEvent::StateChanged { from, to } = event {
///             println!("{tick}: {from} → {to}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each physics tick.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each physics tick, after integration.
    fn on_tick_end(&mut self, _snapshot: &TickSnapshot) {}

    /// A `Notify` command from the controller.
    fn on_event(&mut self, _tick: Tick, _event: &BehaviorEvent) {}

    /// A cue forwarded to the animation sink.
    fn on_anim_cue(&mut self, _tick: Tick, _cue: AnimCue) {}

    /// Every cast of a sensor sample, plus the cone edges.
    fn on_sight_rays(&mut self, _tick: Tick, _rays: &[SightRay]) {}

    /// The field-of-view mesh, rebuilt on every visual frame.
    fn on_mesh(&mut self, _tick: Tick, _mesh: &VisibilityMesh) {}

    /// Called once by [`Sim::run_for`][crate::Sim::run_for] when it finishes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
