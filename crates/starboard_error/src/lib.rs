//! Error types for the starboard service.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use starboard_error::{PlatformError, PlatformErrorKind, StarboardResult};
//!
//! fn publish() -> StarboardResult<u64> {
//!     Err(PlatformError::new(PlatformErrorKind::Forbidden("send messages".into())))?
//! }
//!
//! assert!(publish().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod database;
mod error;
mod platform;
mod settings;

pub use config::{ConfigError, ConfigErrorKind};
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{StarboardError, StarboardErrorKind, StarboardResult};
pub use platform::{PlatformError, PlatformErrorKind, PlatformResult};
pub use settings::{SettingsError, SettingsErrorKind};
