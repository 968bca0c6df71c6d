//! Discord client setup and lifecycle management.

use crate::StarboardHandler;
use serenity::Client;
use starboard_engine::ReconciliationEngine;
use starboard_error::{PlatformError, PlatformErrorKind, PlatformResult};
use starboard_interface::{Platform, StarboardStore};
use tracing::{info, instrument};

/// The running bot: a Serenity client wired to the reconciliation engine.
///
/// # Example
/// ```no_run
/// use starboard_database::{Gateway, InMemoryStarboardStore};
/// use starboard_engine::ReconciliationEngine;
/// use starboard_social::{SerenityPlatform, StarboardBot};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let token = std::env::var("DISCORD_TOKEN")?;
///     let platform = Arc::new(SerenityPlatform::new(&token));
///     let engine = ReconciliationEngine::new(Gateway::new(InMemoryStarboardStore::new()), platform);
///
///     let mut bot = StarboardBot::new(&token, engine).await?;
///     bot.start().await?;
///     Ok(())
/// }
/// ```
pub struct StarboardBot {
    client: Client,
}

impl StarboardBot {
    /// Build the Serenity client.
    ///
    /// # Errors
    ///
    /// Fails when the token is malformed or the client cannot be built.
    #[instrument(skip(token, engine), fields(token_len = token.len()))]
    pub async fn new<S, P>(token: &str, engine: ReconciliationEngine<S, P>) -> PlatformResult<Self>
    where
        S: StarboardStore + 'static,
        P: Platform + 'static,
    {
        let intents = StarboardHandler::<S, P>::intents();
        info!(?intents, "Building Discord client");

        let client = Client::builder(token, intents)
            .event_handler(StarboardHandler::new(engine))
            .await?;

        Ok(Self { client })
    }

    /// Connect to the gateway and process events until shutdown.
    ///
    /// # Errors
    ///
    /// Returns when the connection fails fatally.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> PlatformResult<()> {
        info!("Starting Discord client");
        self.client.start_autosharded().await.map_err(|e| {
            PlatformError::new(PlatformErrorKind::Other(format!("Client error: {e}")))
        })
    }
}
