//! `wd-sim`: drives one warden agent against a collision world.
//!
//! # Two cadences
//!
//! ```text
//! frame(dt):
//!   accumulate dt; for each whole physics step:
//!     physics_step():
//!       ① Target:     move the target's marker collider to its live position.
//!       ② Animation:  deliver due animation callbacks to the controller.
//!       ③ Perception: place the eye; sample the sensor (EveryTick cadence);
//!                     probe for a wall ahead.
//!       ④ Decide:     BehaviorController::tick(&TickContext) → Vec<Command>.
//!       ⑤ Apply:      MoveX / Impulse → body, Face / Aim → sensor,
//!                     Animate → animation sink, Notify → observer.
//!       ⑥ Integrate:  Body::step; fire waypoint triggers on entry.
//!   visual tick:
//!     sample the sensor (Throttled cadence, if due); rebuild the FOV mesh.
//! ```
//!
//! With `SensorCadence::Throttled` the controller sees the last sampled
//! boolean between samples.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let target = TargetHandle::new(Vec2::new(8.0, 0.5), Vec2::new(0.3, 0.5));
//! let mut sim = SimBuilder::new(SimConfig::default(), world, body, behavior, route, sight)
//!     .target("Player", target.clone())
//!     .animator(TimedAnimator::new(0.5, 0.4))
//!     .build()?;
//! sim.run_for(10.0, &mut NoopObserver)?;
//! ```

pub mod animation;
pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod sim;
pub mod target;

#[cfg(test)]
mod tests;

pub use animation::{AnimationSink, NoopAnimator, TimedAnimator};
pub use builder::SimBuilder;
pub use config::{SensorCadence, SimConfig};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSnapshot};
pub use sim::Sim;
pub use target::{TargetHandle, TargetRegistry};
