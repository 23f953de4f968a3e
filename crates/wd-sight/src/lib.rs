//! `wd-sight`: line-of-sight perception for warden agents.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`heading`] | `Heading`: a validated, non-zero unit direction                  |
//! | [`sensor`]  | `SightSensor`, `SightConfig`, `AimMode`, `SightRay`, `RayOutcome` |
//! | [`fov`]     | `FieldOfView`, `VisibilityMesh`                                   |
//! | [`error`]   | `SightError`, `SightResult<T>`                                    |
//!
//! # Visibility rule
//!
//! A probe point is visible when a ray cast from the sensor origin towards it
//! first hits a collider on the target layer **and** the angle between the
//! current aim direction and the direction to the probe is strictly less than
//! half the field of view.  The sensor reports the logical OR over all probes.
//!
//! The [`FieldOfView`] mesh is a pure read of the sensor's aim; it never feeds
//! back into visibility.

pub mod error;
pub mod fov;
pub mod heading;
pub mod sensor;

#[cfg(test)]
mod tests;

pub use error::{SightError, SightResult};
pub use fov::{FieldOfView, VisibilityMesh};
pub use heading::Heading;
pub use sensor::{AimMode, RayOutcome, SightConfig, SightRay, SightSensor};
