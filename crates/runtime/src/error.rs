//! Unified error types surfaced by the runtime API.
use game_core::{ActorHandle, ErrorSeverity, GameError};
use thiserror::Error;

pub use crate::profile::ProfileError;
pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("actor {0} does not exist")]
    UnknownActor(ActorHandle),

    #[error("actor {0} is not an enemy")]
    NotAnEnemy(ActorHandle),

    #[error("actor {0} is not a reward pickup")]
    NotAReward(ActorHandle),

    #[error("session has been torn down")]
    TornDown,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownActor(_) | Self::NotAnEnemy(_) | Self::NotAReward(_) => {
                ErrorSeverity::Validation
            }
            Self::TornDown => ErrorSeverity::Validation,
            Self::Repository(_) => ErrorSeverity::Fatal,
            Self::Profile(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownActor(_) => "RUNTIME_UNKNOWN_ACTOR",
            Self::NotAnEnemy(_) => "RUNTIME_NOT_AN_ENEMY",
            Self::NotAReward(_) => "RUNTIME_NOT_A_REWARD",
            Self::TornDown => "RUNTIME_TORN_DOWN",
            Self::Repository(_) => "RUNTIME_REPOSITORY",
            Self::Profile(err) => err.error_code(),
        }
    }
}
