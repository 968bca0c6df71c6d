//! Serenity event handler.
//!
//! Each gateway event is converted into a core event and handed to the
//! reconciliation engine on its own task, so a slow reconciliation never
//! stalls the shard's event loop.

use crate::convert;
use serenity::all::{
    Channel, ChannelId, Context, EventHandler, GatewayIntents, GuildChannel, GuildId, Message,
    MessageId, Reaction, Ready,
};
use serenity::async_trait;
use starboard_core::ReactionDirection;
use starboard_engine::ReconciliationEngine;
use starboard_interface::{Platform, StarboardStore};
use tracing::{debug, info};

/// Routes reaction, message, and channel events to a [`ReconciliationEngine`].
pub struct StarboardHandler<S, P> {
    engine: ReconciliationEngine<S, P>,
}

impl<S, P> StarboardHandler<S, P> {
    /// Create a handler driving `engine`.
    pub fn new(engine: ReconciliationEngine<S, P>) -> Self {
        Self { engine }
    }

    /// Gateway intents the handler depends on.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::GUILD_MESSAGE_REACTIONS
            | GatewayIntents::GUILD_MEMBERS
            | GatewayIntents::MESSAGE_CONTENT
    }
}

impl<S, P> StarboardHandler<S, P>
where
    S: StarboardStore + 'static,
    P: Platform + 'static,
{
    fn dispatch_reaction(&self, reaction: &Reaction, direction: ReactionDirection) {
        let Some(event) = convert::raw_event(reaction, direction) else {
            debug!(message_id = %reaction.message_id, "Ignoring unsupported reaction");
            return;
        };

        let engine = self.engine.clone();
        tokio::spawn(async move { engine.handle_reaction_event(event).await });
    }
}

#[async_trait]
impl<S, P> EventHandler for StarboardHandler<S, P>
where
    S: StarboardStore + 'static,
    P: Platform + 'static,
{
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            user = %ready.user.name,
            guilds = ready.guilds.len(),
            "Connected to Discord"
        );
    }

    async fn reaction_add(&self, _ctx: Context, reaction: Reaction) {
        self.dispatch_reaction(&reaction, ReactionDirection::Add);
    }

    async fn reaction_remove(&self, _ctx: Context, reaction: Reaction) {
        self.dispatch_reaction(&reaction, ReactionDirection::Remove);
    }

    async fn reaction_remove_all(
        &self,
        ctx: Context,
        channel_id: ChannelId,
        removed_from_message_id: MessageId,
    ) {
        let engine = self.engine.clone();
        tokio::spawn(async move {
            // The payload carries no guild; resolve it from the channel.
            let guild_id = match ctx.http.get_channel(channel_id).await {
                Ok(Channel::Guild(channel)) => Some(convert::guild_id(channel.guild_id)),
                Ok(_) => None,
                Err(e) => {
                    debug!(%channel_id, error = %e, "Could not resolve channel of cleared reactions");
                    None
                }
            };
            engine
                .handle_reactions_cleared(
                    guild_id,
                    convert::channel_id(channel_id),
                    convert::message_id(removed_from_message_id),
                )
                .await
        });
    }

    async fn reaction_remove_emoji(&self, _ctx: Context, removed_reactions: Reaction) {
        let Some(emoji) = convert::emoji_from_reaction(&removed_reactions.emoji) else {
            return;
        };

        let engine = self.engine.clone();
        let guild_id = removed_reactions.guild_id.map(convert::guild_id);
        let channel_id = convert::channel_id(removed_reactions.channel_id);
        let message_id = convert::message_id(removed_reactions.message_id);
        tokio::spawn(async move {
            engine
                .handle_emoji_cleared(guild_id, channel_id, message_id, emoji)
                .await
        });
    }

    async fn message_delete(
        &self,
        _ctx: Context,
        channel_id: ChannelId,
        deleted_message_id: MessageId,
        guild_id: Option<GuildId>,
    ) {
        let engine = self.engine.clone();
        tokio::spawn(async move {
            engine
                .handle_message_deleted(
                    guild_id.map(convert::guild_id),
                    convert::channel_id(channel_id),
                    convert::message_id(deleted_message_id),
                )
                .await
        });
    }

    async fn channel_delete(
        &self,
        _ctx: Context,
        channel: GuildChannel,
        _messages: Option<Vec<Message>>,
    ) {
        let engine = self.engine.clone();
        tokio::spawn(async move {
            engine
                .handle_channel_deleted(
                    convert::guild_id(channel.guild_id),
                    convert::channel_id(channel.id),
                )
                .await
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intents_cover_reactions_members_and_content() {
        let intents = StarboardHandler::<(), ()>::intents();
        assert!(intents.contains(GatewayIntents::GUILD_MESSAGE_REACTIONS));
        assert!(intents.contains(GatewayIntents::GUILD_MEMBERS));
        assert!(intents.contains(GatewayIntents::MESSAGE_CONTENT));
    }
}
