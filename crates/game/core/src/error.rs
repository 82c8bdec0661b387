//! Common error infrastructure for game-core.
//!
//! Gameplay operations in this crate never fail towards their caller: spawn
//! failures are skipped, missing collaborators become no-ops and out-of-range
//! numbers are clamped. Errors only appear at the data boundary (table lookups,
//! content validation) and are classified here so hosts can decide how loudly
//! to report them.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The rules fall back to a safe default and keep running
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors indicating unusable game data
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// Recoverable error - a fallback value is used.
    ///
    /// Examples: level missing from the stat table
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: empty stat table, caps below base stats
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - game data unusable, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_names_are_snake_case() {
        assert_eq!(ErrorSeverity::Recoverable.as_str(), "recoverable");
        assert_eq!(ErrorSeverity::Validation.to_string(), "validation");
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(!ErrorSeverity::Validation.is_recoverable());
    }
}
