//! `wd-world`: the physics/query service the perception and behavior crates
//! consume.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`layer`]   | `Layer`, `LayerMask`                                        |
//! | [`shape`]   | `Aabb` with ray and circle intersection tests               |
//! | [`query`]   | `RayHit`, `PhysicsQuery` trait                              |
//! | [`world`]   | `CollisionWorld` (R-tree + dynamic list), builder           |
//! | [`body`]    | `Body` trait, `KinematicBody` reference implementation      |
//! | [`error`]   | `WorldError`, `WorldResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod body;
pub mod error;
pub mod layer;
pub mod query;
pub mod shape;
pub mod world;

#[cfg(test)]
mod tests;

pub use body::{Body, KinematicBody};
pub use error::{WorldError, WorldResult};
pub use layer::{Layer, LayerMask};
pub use query::{PhysicsQuery, RayHit};
pub use shape::Aabb;
pub use world::{Collider, CollisionWorld, CollisionWorldBuilder};
