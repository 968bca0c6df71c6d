//! Errors raised by administrative configuration edits.

/// Settings error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SettingsErrorKind {
    /// No starboard with this id exists.
    #[display("Unknown starboard: {_0}")]
    UnknownStarboard(u64),
    /// The channel is already configured as a starboard.
    #[display("Channel {_0} is already a starboard")]
    DuplicateStarboard(u64),
    /// Thresholds start at one star.
    #[display("Threshold must be at least 1, got {_0}")]
    InvalidThreshold(u32),
    /// The rule to remove does not exist.
    #[display("No rule for {subject} {id} on starboard {starboard}")]
    RuleNotFound {
        /// Rule axis ("channel" or "role")
        subject: &'static str,
        /// Channel or role id
        id: u64,
        /// Starboard the rule was looked up on
        starboard: u64,
    },
}

/// Settings error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Settings Error: {} at line {} in {}", kind, line, file)]
pub struct SettingsError {
    /// The kind of error that occurred
    pub kind: SettingsErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SettingsError {
    /// Create a new SettingsError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SettingsErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
