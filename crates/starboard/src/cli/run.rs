//! Command implementations.

use starboard::StarboardConfig;
use starboard_database::{Gateway, PgStarboardStore};
use starboard_engine::{ReconciliationEngine, RetryingPlatform};
use starboard_error::StarboardResult;
use starboard_social::{SerenityPlatform, StarboardBot};
use std::sync::Arc;
use tracing::{info, instrument};

/// Connect everything and process Discord events until shutdown.
#[instrument(skip(config))]
pub async fn run_bot(config: StarboardConfig) -> StarboardResult<()> {
    config.validate()?;

    let mut store = PgStarboardStore::connect(&config.database.url)?;
    if config.database.run_migrations {
        let applied = store.migrate()?;
        info!(applied, "Database schema is up to date");
    }

    let platform = RetryingPlatform::new(
        SerenityPlatform::new(&config.discord.token),
        config.publisher,
    );
    let engine = ReconciliationEngine::new(Gateway::new(store), Arc::new(platform));

    let mut bot = StarboardBot::new(&config.discord.token, engine).await?;
    bot.start().await?;
    Ok(())
}

/// Apply pending migrations.
#[instrument(skip(config))]
pub fn migrate(config: &StarboardConfig) -> StarboardResult<()> {
    config.validate_database()?;

    let mut store = PgStarboardStore::connect(&config.database.url)?;
    let applied = store.migrate()?;
    info!(applied, "Migrations applied");
    Ok(())
}
