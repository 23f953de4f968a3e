//! `wd-behavior`: the hostile agent's state machine.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`state`]      | `BehaviorState` (`Patrol` … `Attack`)                         |
//! | [`config`]     | `BehaviorConfig`: speeds, timer lengths, radii                |
//! | [`agent`]      | `Agent`: the mutable per-agent record                         |
//! | [`context`]    | `TickContext`: per-tick snapshot of body, target and sensor   |
//! | [`command`]    | `Command`, `AnimCue`, `BehaviorEvent`, `AnimationEvent`       |
//! | [`controller`] | `BehaviorController`                                          |
//! | [`error`]      | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Design notes
//!
//! The controller never touches physics, the sensor or the animator directly.
//! Each physics tick the driver (wd-sim) works in two phases:
//!
//! 1. **Decide**: build a [`TickContext`] (body position, target position,
//!    sensor result, wall probe) and call [`BehaviorController::tick`].  The
//!    controller updates its own [`Agent`] record and returns a `Vec<Command>`.
//!
//! 2. **Apply**: the driver executes the commands in order against the body,
//!    the sensor and the animation sink, and forwards `Notify` events to its
//!    observer.
//!
//! Delayed actions (patrol wait, attack and jump cooldowns, alert and pursue
//! timers) are owned timer values polled at the start of every tick; the
//! patrol wait carries a state stamp and is discarded if any transition
//! happened while it was pending.

pub mod agent;
pub mod command;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod state;


pub use agent::Agent;
pub use command::{AnimCue, AnimationEvent, BehaviorEvent, Command};
pub use config::BehaviorConfig;
pub use context::TickContext;
pub use controller::BehaviorController;
pub use error::{BehaviorError, BehaviorResult};
pub use state::BehaviorState;
