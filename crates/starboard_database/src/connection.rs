//! Database connection utilities.

use crate::DatabaseResult;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use starboard_error::{DatabaseError, DatabaseErrorKind};
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::info;

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Establish a connection to the PostgreSQL database at `database_url`.
///
/// # Errors
///
/// Returns a `Connection` error if the database is unreachable or the URL is
/// malformed.
pub fn establish_connection(database_url: &str) -> DatabaseResult<PgConnection> {
    run_blocking(|| PgConnection::establish(database_url))
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
}

/// Apply every pending migration. Returns how many were applied.
pub fn run_migrations(conn: &mut PgConnection) -> DatabaseResult<usize> {
    let applied = run_blocking(|| conn.run_pending_migrations(MIGRATIONS))
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?;

    info!(count = applied.len(), "Applied database migrations");
    Ok(applied.len())
}

/// Run a synchronous database round trip without stalling other tasks.
///
/// On a multi-threaded tokio runtime the current worker hands its queued
/// tasks to another thread while `f` blocks. Outside a runtime, or on a
/// current-thread runtime where that hand-off is impossible, `f` runs inline.
pub fn run_blocking<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}
