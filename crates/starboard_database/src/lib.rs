//! PostgreSQL integration for the starboard service.
//!
//! # Features
//!
//! - Diesel schema, row models and embedded migrations
//! - [`PgStarboardStore`]: one connection, one transaction per operation
//! - [`InMemoryStarboardStore`]: the same contract without a database
//! - [`Gateway`]: the single mutual-exclusion gate all storage access goes through
//!
//! # Example
//!
//! ```rust,ignore
//! use starboard_database::{Gateway, PgStarboardStore};
//!
//! let mut store = PgStarboardStore::connect(&database_url)?;
//! store.migrate()?;
//! let gateway = Gateway::new(store);
//! ```

mod connection;
mod gateway;
mod in_memory;
mod models;
mod postgres;

pub mod schema;

pub use connection::{MIGRATIONS, establish_connection, run_blocking, run_migrations};
pub use gateway::{GateGuard, Gateway};
pub use in_memory::InMemoryStarboardStore;
pub use models::{
    ChannelRuleRow, NewGuildRow, NewPostMappingRow, NewStarboardRow, PostMappingRow, RoleRuleRow,
    StarboardRow,
};
pub use postgres::PgStarboardStore;

use starboard_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
