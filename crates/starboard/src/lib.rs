//! Starboard bot: configuration, logging, and wiring for the `starboard` binary.
//!
//! The reconciliation logic lives in `starboard_engine`; this crate loads a
//! [`StarboardConfig`], initialises logging and connects the engine to
//! PostgreSQL and Discord.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod observability;

pub use self::config::{DatabaseConfig, DiscordConfig, LoggingConfig, StarboardConfig};
pub use observability::init_logging;
