//! `wd-core`: foundational types for the `warden` agent framework.
//!
//! This crate is a dependency of every other `wd-*` crate.  It has no `wd-*`
//! dependencies and minimal external ones (`glam` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `ColliderId`                                          |
//! | [`geo`]         | bearing / angle helpers, squared-distance range tests |
//! | [`facing`]      | `Facing`, `toggle_facing`                             |
//! | [`time`]        | `Tick`, `SimTime`, `FixedStep`                        |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod facing;
pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use facing::{toggle_facing, Facing};
pub use glam::Vec2;
pub use ids::ColliderId;
pub use time::{FixedStep, SimTime, Tick};
