use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("patrol route must contain at least one waypoint")]
    EmptyRoute,

    #[error("waypoint {index}: wait time must be finite and non-negative, got {secs}")]
    InvalidWaitTime { index: usize, secs: f64 },

    #[error("route parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
