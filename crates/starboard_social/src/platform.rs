//! Discord REST implementation of the platform traits.

use crate::convert::{self, to_channel, to_guild, to_message};
use crate::render::{self, PostEmbed};
use async_trait::async_trait;
use serenity::all as discord;
use serenity::http::Http;
use starboard_core::{ChannelId, Emoji, GuildId, MessageContext, MessageId, StarPost, UserId};
use starboard_error::{PlatformError, PlatformResult};
use starboard_interface::{PostPublisher, ReactionSource};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Discord's maximum page size for reaction user listings.
const REACTION_PAGE: u8 = 100;

/// Reads messages and reactions and publishes star posts through Discord's HTTP API.
///
/// Every read goes to the API, never to a cache, so tallies reflect current state.
#[derive(Clone)]
pub struct SerenityPlatform {
    http: Arc<Http>,
}

impl SerenityPlatform {
    /// Create a platform client with its own HTTP client.
    #[instrument(skip(token), fields(token_len = token.as_ref().len()))]
    pub fn new(token: impl AsRef<str>) -> Self {
        Self {
            http: Arc::new(Http::new(token.as_ref())),
        }
    }

    /// Create a platform client sharing an existing HTTP client and its rate limits.
    pub fn with_http_client(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &Arc<Http> {
        &self.http
    }
}

#[async_trait]
impl ReactionSource for SerenityPlatform {
    #[instrument(skip(self))]
    async fn message_context(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> PlatformResult<MessageContext> {
        let message = self
            .http
            .get_message(to_channel(channel_id), to_message(message_id))
            .await?;

        // Webhook and departed authors have no member record and hold no roles.
        let author_roles = match self.http.get_member(to_guild(guild_id), message.author.id).await {
            Ok(member) => member.roles.iter().copied().map(convert::role_id).collect(),
            Err(e) => {
                let e = PlatformError::from(e);
                if !e.is_not_found() {
                    return Err(e);
                }
                debug!(author = %message.author.id, "Author is not a guild member");
                Vec::new()
            }
        };

        Ok(MessageContext {
            guild_id,
            channel_id,
            message_id,
            author_id: UserId(message.author.id.get()),
            author_is_bot: message.author.bot,
            author_roles,
        })
    }

    #[instrument(skip(self, emoji), fields(emoji = %emoji))]
    async fn reactors(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &Emoji,
    ) -> PlatformResult<Vec<UserId>> {
        let reaction = convert::reaction_from_emoji(emoji)?;
        let mut reactors = Vec::new();
        let mut after = None;

        loop {
            let page = self
                .http
                .get_reaction_users(
                    to_channel(channel_id),
                    to_message(message_id),
                    &reaction,
                    REACTION_PAGE,
                    after,
                )
                .await?;
            let full = page.len() == usize::from(REACTION_PAGE);
            after = page.last().map(|user| user.id.get());
            reactors.extend(page.into_iter().map(|user| UserId(user.id.get())));

            if !full {
                break;
            }
        }

        debug!(count = reactors.len(), "Fetched reactors");
        Ok(reactors)
    }
}

#[async_trait]
impl PostPublisher for SerenityPlatform {
    #[instrument(skip(self, post), fields(starboard_id = %post.starboard_id, count = post.count))]
    async fn create_post(
        &self,
        channel_id: ChannelId,
        post: &StarPost,
    ) -> PlatformResult<MessageId> {
        let source = self
            .http
            .get_message(
                to_channel(post.source_channel_id),
                to_message(post.source_message_id),
            )
            .await?;
        let embed = PostEmbed::from_message(post, &source);

        let sent = to_channel(channel_id)
            .send_message(&*self.http, render::create_message(post, &embed))
            .await?;
        Ok(convert::message_id(sent.id))
    }

    #[instrument(skip(self, post), fields(count = post.count))]
    async fn edit_post(
        &self,
        channel_id: ChannelId,
        post_id: MessageId,
        post: &StarPost,
    ) -> PlatformResult<()> {
        to_channel(channel_id)
            .edit_message(&*self.http, to_message(post_id), render::edit_message(post))
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_post(&self, channel_id: ChannelId, post_id: MessageId) -> PlatformResult<()> {
        to_channel(channel_id)
            .delete_message(&*self.http, to_message(post_id))
            .await?;
        Ok(())
    }
}
