use thiserror::Error;
use wd_behavior::BehaviorError;
use wd_core::CoreError;
use wd_sight::SightError;
use wd_world::WorldError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("no target registered under tag {0:?}")]
    TargetNotFound(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("sight setup failed: {0}")]
    Sight(#[from] SightError),

    #[error("behavior setup failed: {0}")]
    Behavior(#[from] BehaviorError),

    #[error("collision world error: {0}")]
    World(#[from] WorldError),
}

pub type SimResult<T> = Result<T, SimError>;
