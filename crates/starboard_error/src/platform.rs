//! Chat-platform error types.
//!
//! The reconciliation engine reacts differently to each kind: `NotFound` is a
//! self-healing signal, `Forbidden` is reported and skipped, `Transient` is
//! retried by the publisher and otherwise aborts the step.

/// Chat-platform error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PlatformErrorKind {
    /// The message, channel, or guild no longer exists.
    #[display("Not found: {_0}")]
    NotFound(String),

    /// The bot lacks the permission needed for the operation.
    #[display("Forbidden: {_0}")]
    Forbidden(String),

    /// Rate limit, timeout, or server-side failure. Worth retrying.
    #[display("Transient failure: {_0}")]
    Transient(String),

    /// Anything else the platform client reported.
    #[display("Platform error: {_0}")]
    Other(String),
}

impl PlatformErrorKind {
    /// Classify an unsuccessful HTTP response.
    ///
    /// ```
    /// use starboard_error::PlatformErrorKind;
    ///
    /// let kind = PlatformErrorKind::from_status(429, "slow down");
    /// assert_eq!(kind, PlatformErrorKind::Transient("429: slow down".into()));
    /// ```
    pub fn from_status(status: u16, detail: impl std::fmt::Display) -> Self {
        let message = format!("{status}: {detail}");
        match status {
            404 => Self::NotFound(message),
            401 | 403 => Self::Forbidden(message),
            408 | 429 | 500..=599 => Self::Transient(message),
            _ => Self::Other(message),
        }
    }
}

/// Chat-platform error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Platform Error: {} at line {} in {}", kind, line, file)]
pub struct PlatformError {
    /// The kind of error that occurred
    pub kind: PlatformErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PlatformError {
    /// Create a new PlatformError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use starboard_error::{PlatformError, PlatformErrorKind};
    ///
    /// let err = PlatformError::new(PlatformErrorKind::NotFound("message 42".into()));
    /// assert!(err.is_not_found());
    /// assert!(!err.is_retryable());
    /// ```
    #[track_caller]
    pub fn new(kind: PlatformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the operation may succeed if attempted again.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, PlatformErrorKind::Transient(_))
    }

    /// Whether the target of the operation is gone.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, PlatformErrorKind::NotFound(_))
    }

    /// Whether the bot was denied permission.
    pub fn is_forbidden(&self) -> bool {
        matches!(self.kind, PlatformErrorKind::Forbidden(_))
    }
}

#[cfg(feature = "discord")]
impl From<serenity::Error> for PlatformError {
    #[track_caller]
    fn from(err: serenity::Error) -> Self {
        let kind = match &err {
            serenity::Error::Http(http) => match http.status_code() {
                Some(status) => PlatformErrorKind::from_status(status.as_u16(), &err),
                // No response at all: timeouts and dropped connections
                None => PlatformErrorKind::Transient(err.to_string()),
            },
            serenity::Error::Gateway(_) | serenity::Error::Io(_) => {
                PlatformErrorKind::Transient(err.to_string())
            }
            _ => PlatformErrorKind::Other(err.to_string()),
        };
        PlatformError::new(kind)
    }
}

/// Result type for chat-platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(PlatformError::new(PlatformErrorKind::from_status(404, "Unknown Message")).is_not_found());
        assert!(PlatformError::new(PlatformErrorKind::from_status(403, "Missing Access")).is_forbidden());
        assert!(PlatformError::new(PlatformErrorKind::from_status(502, "Bad Gateway")).is_retryable());
        assert!(PlatformError::new(PlatformErrorKind::from_status(429, "rate limited")).is_retryable());
        assert_eq!(
            PlatformErrorKind::from_status(400, "Invalid Form Body"),
            PlatformErrorKind::Other("400: Invalid Form Body".into())
        );
    }
}
