//! Startup configuration and logging setup errors.

/// What went wrong while preparing the process to run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// The layered sources could not be read or deserialized.
    #[display("Failed to load configuration: {}", _0)]
    Load(String),
    /// A required setting is absent or out of range.
    #[display("Invalid setting {}: {}", key, reason)]
    Invalid {
        /// Dotted key, e.g. `discord.token`
        key: &'static str,
        /// Human-readable explanation
        reason: String,
    },
    /// The tracing subscriber could not be installed.
    #[display("Logging setup failed: {}", _0)]
    Logging(String),
}

/// Configuration error with source location tracking.
///
/// # Examples
///
/// ```
/// use starboard_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::invalid("discord.token", "must not be empty");
/// assert!(matches!(err.kind, ConfigErrorKind::Invalid { key: "discord.token", .. }));
/// assert!(err.to_string().contains("discord.token"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The kind of error that occurred
    pub kind: ConfigErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for [`ConfigErrorKind::Invalid`].
    #[track_caller]
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::Invalid {
            key,
            reason: reason.into(),
        })
    }
}
