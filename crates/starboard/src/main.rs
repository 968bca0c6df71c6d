//! Starboard CLI binary.
//!
//! - `starboard run`: connect to Discord and keep starboards in sync
//! - `starboard migrate`: apply database migrations

use clap::Parser;
use starboard::{StarboardConfig, init_logging};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, migrate, run_bot};

    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = StarboardConfig::load(cli.config.as_deref())?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    init_logging(&config.logging)?;

    match cli.command {
        Commands::Run => run_bot(config).await?,
        Commands::Migrate => migrate(&config)?,
    }

    Ok(())
}
