//! Reaction events as delivered by the platform and after normalisation.

use crate::{ChannelId, Emoji, GuildId, MessageId, UserId};
use serde::{Deserialize, Serialize};

/// Whether a reaction was added or removed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum ReactionDirection {
    /// A user reacted
    Add,
    /// A user took their reaction back
    Remove,
}

/// A reaction notification exactly as the transport produced it.
///
/// `guild_id` is absent for reactions in direct messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReactionEvent {
    /// Guild the reaction happened in, if any
    pub guild_id: Option<GuildId>,
    /// Channel of the reacted message
    pub channel_id: ChannelId,
    /// The reacted message
    pub message_id: MessageId,
    /// Who reacted
    pub user_id: UserId,
    /// Emoji used
    pub emoji: Emoji,
    /// Add or remove
    pub direction: ReactionDirection,
}

/// A reaction event with guild context guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEvent {
    /// Guild the reaction happened in
    pub guild_id: GuildId,
    /// Channel of the reacted message
    pub channel_id: ChannelId,
    /// The reacted message
    pub message_id: MessageId,
    /// Who reacted
    pub user_id: UserId,
    /// Emoji used
    pub emoji: Emoji,
    /// Add or remove
    pub direction: ReactionDirection,
}
