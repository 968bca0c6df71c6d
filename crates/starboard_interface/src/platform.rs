//! Chat-platform collaborator traits.

use async_trait::async_trait;
use starboard_core::{ChannelId, Emoji, GuildId, MessageContext, MessageId, StarPost, UserId};
use starboard_error::PlatformResult;

/// Live reads from the chat platform.
///
/// Results must reflect current platform state, not a cache.
#[async_trait]
pub trait ReactionSource: Send + Sync {
    /// Author and channel context of a message.
    ///
    /// Fails with `NotFound` when the message was deleted.
    async fn message_context(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> PlatformResult<MessageContext>;

    /// Every user currently reacting to the message with `emoji`.
    async fn reactors(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &Emoji,
    ) -> PlatformResult<Vec<UserId>>;
}

/// Side-effecting star post operations.
///
/// Each call may fail with `NotFound` (target gone), `Forbidden` (missing
/// permission) or `Transient` (rate limit, timeout).
#[async_trait]
pub trait PostPublisher: Send + Sync {
    /// Publishes a new star post and returns its message id.
    async fn create_post(&self, channel_id: ChannelId, post: &StarPost)
    -> PlatformResult<MessageId>;

    /// Refreshes the displayed count of an existing star post.
    async fn edit_post(
        &self,
        channel_id: ChannelId,
        post_id: MessageId,
        post: &StarPost,
    ) -> PlatformResult<()>;

    /// Removes a star post.
    async fn delete_post(&self, channel_id: ChannelId, post_id: MessageId) -> PlatformResult<()>;
}

/// A platform client that can both read reactions and publish posts.
pub trait Platform: ReactionSource + PostPublisher {}

impl<T> Platform for T where T: ReactionSource + PostPublisher {}
