use thiserror::Error;

#[derive(Debug, Error)]
pub enum SightError {
    #[error("field of view needs at least one ray")]
    ZeroRayCount,

    #[error("direction vector has zero length or is not finite")]
    ZeroLengthDirection,

    #[error("field of view must be in (0, 360] degrees, got {0}")]
    InvalidFov(f32),

    #[error("sight distance must be positive and finite, got {0}")]
    InvalidDistance(f32),
}

pub type SightResult<T> = Result<T, SightError>;
