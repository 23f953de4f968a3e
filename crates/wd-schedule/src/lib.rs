//! `wd-schedule`: patrol routes and the timers that gate delayed actions.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`route`]  | `Waypoint`, `PatrolRoute` (cyclic index, never out of range)  |
//! | [`timer`]  | `Stopwatch`, `Cooldown`, `GuardedDelay<G>`, `DelayPoll`       |
//! | [`loader`] | `load_route_csv`, `load_route_reader`                         |
//! | [`error`]  | `ScheduleError`, `ScheduleResult<T>`                          |
//!
//! # Timer model
//!
//! Delayed actions are plain values owned by the agent and polled once per
//! physics tick with the current [`SimTime`](wd_core::SimTime).  Nothing
//! suspends and nothing runs behind the owner's back:
//!
//! ```text
//! Stopwatch       started_at          → elapsed(now)
//! Cooldown        ready_at            → poll_ready(now) fires once on expiry
//! GuardedDelay<G> (fires_at, guard)   → poll(now, &current) → Fired | Stale
//! ```
//!
//! A `GuardedDelay` captures the state it depends on when it is armed; if
//! that state differs when the delay comes due, the poll reports `Stale` and
//! the owner drops the continuation.

pub mod error;
pub mod loader;
pub mod route;
pub mod timer;


pub use error::{ScheduleError, ScheduleResult};
pub use loader::{load_route_csv, load_route_reader};
pub use route::{PatrolRoute, Waypoint};
pub use timer::{Cooldown, DelayPoll, GuardedDelay, Stopwatch};
