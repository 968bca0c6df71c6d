//! Top-level error wrapper types.

use crate::{ConfigError, DatabaseError, PlatformError, SettingsError};

/// Every error family the service can produce.
///
/// # Examples
///
/// ```
/// use starboard_error::{StarboardError, ConfigError};
///
/// let err: StarboardError = ConfigError::invalid("discord.token", "missing").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StarboardErrorKind {
    /// Storage error
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Chat-platform error
    #[from(PlatformError)]
    Platform(PlatformError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Administrative settings error
    #[from(SettingsError)]
    Settings(SettingsError),
}

/// Starboard error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Starboard Error: {}", _0)]
pub struct StarboardError(Box<StarboardErrorKind>);

impl StarboardError {
    /// Create a new error from a kind.
    pub fn new(kind: StarboardErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StarboardErrorKind {
        &self.0
    }
}

impl<T> From<T> for StarboardError
where
    T: Into<StarboardErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for starboard operations.
pub type StarboardResult<T> = std::result::Result<T, StarboardError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DatabaseErrorKind, PlatformErrorKind};

    #[test]
    fn test_database_error_converts_to_top_level() {
        let err: StarboardError = DatabaseError::new(DatabaseErrorKind::NotFound).into();
        assert!(matches!(err.kind(), StarboardErrorKind::Database(_)));
    }

    #[test]
    fn test_platform_error_records_location() {
        let err = PlatformError::new(PlatformErrorKind::Transient("429".into()));
        assert!(err.file.ends_with("error.rs"));
        assert!(err.is_retryable());
        let err: StarboardError = err.into();
        assert!(format!("{}", err).contains("Transient failure: 429"));
    }
}
