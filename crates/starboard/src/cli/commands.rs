//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Starboard - reposts popular messages to a highlights channel
#[derive(Parser, Debug)]
#[command(name = "starboard")]
#[command(about = "Reposts messages that collect enough reactions to a starboard channel", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./starboard.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Connect to Discord and keep starboards in sync
    Run,

    /// Apply pending database migrations and exit
    Migrate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_flag_is_global() {
        let cli = Cli::try_parse_from(["starboard", "run", "--config", "bot.toml"]).unwrap();
        assert_eq!(cli.command, Commands::Run);
        assert_eq!(cli.config, Some(PathBuf::from("bot.toml")));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["starboard"]).is_err());
    }
}
