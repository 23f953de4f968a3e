use thiserror::Error;
use wd_schedule::ScheduleError;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("behavior configuration error: {0}")]
    Config(String),

    #[error("patrol route error: {0}")]
    Route(#[from] ScheduleError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
