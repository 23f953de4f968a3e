//! World-subsystem error type.

use thiserror::Error;

use wd_core::ColliderId;

/// Errors produced by `wd-world`.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("collider {0} not found in world")]
    ColliderNotFound(ColliderId),

    #[error("collider {0} is static and cannot be moved")]
    StaticCollider(ColliderId),

    #[error("invalid collider bounds: {0}")]
    InvalidBounds(String),
}

pub type WorldResult<T> = Result<T, WorldError>;
