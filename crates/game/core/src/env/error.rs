//! Oracle access errors.
//!
//! Errors related to table availability and data access.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when reading oracle data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// The level table has no row for the requested level.
    #[error("level {0} not found in stat table")]
    LevelNotFound(u32),

    /// A stat table must contain at least one level.
    #[error("stat table has no levels")]
    EmptyLevelTable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            // Stat sheets fall back to a zero record and keep running
            LevelNotFound(_) => ErrorSeverity::Recoverable,

            EmptyLevelTable => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            LevelNotFound(_) => "ORACLE_LEVEL_NOT_FOUND",
            EmptyLevelTable => "ORACLE_EMPTY_LEVEL_TABLE",
        }
    }
}
