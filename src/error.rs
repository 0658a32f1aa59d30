//! Error types for pomotally.

use thiserror::Error;

/// Errors that can occur in pomotally.
#[derive(Debug, Error)]
pub enum PomotallyError {
    /// A duration or setting was rejected. Prior configuration is retained.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The persistent store failed or returned malformed data.
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// Configuration file or path error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// `SQLite` error.
    #[error("Database error: {0}")]
    Database(String),

    /// Terminal setup or drawing failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Input could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON serialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PomotallyError {
    /// Whether this error came from the persistence layer.
    #[must_use]
    pub const fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_) | Self::Database(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = PomotallyError::InvalidConfiguration("work minutes must be positive".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: work minutes must be positive"
        );

        let err = PomotallyError::Persistence("disk full".into());
        assert_eq!(err.to_string(), "Persistence failure: disk full");
    }

    #[test]
    fn test_is_persistence() {
        assert!(PomotallyError::Persistence(String::new()).is_persistence());
        assert!(PomotallyError::Database(String::new()).is_persistence());
        assert!(!PomotallyError::Config(String::new()).is_persistence());
    }
}
