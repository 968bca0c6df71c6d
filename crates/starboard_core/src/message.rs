//! Views of a candidate message and of the post rendered for it.

use crate::{ChannelId, Emoji, GuildId, MessageId, RoleId, StarboardId, UserId};
use serde::{Deserialize, Serialize};

/// What policy evaluation needs to know about a message being voted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContext {
    /// Guild of the message
    pub guild_id: GuildId,
    /// Channel the message was posted in
    pub channel_id: ChannelId,
    /// The message itself
    pub message_id: MessageId,
    /// Message author
    pub author_id: UserId,
    /// Whether the author is a bot account
    pub author_is_bot: bool,
    /// Roles the author currently holds in the guild
    pub author_roles: Vec<RoleId>,
}

/// Everything the publisher needs to create or refresh a star post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarPost {
    /// Starboard the post belongs to
    pub starboard_id: StarboardId,
    /// Guild of the source message
    pub guild_id: GuildId,
    /// Channel of the source message
    pub source_channel_id: ChannelId,
    /// The source message
    pub source_message_id: MessageId,
    /// Author of the source message
    pub author_id: UserId,
    /// Trigger emoji shown next to the count
    pub emoji: Emoji,
    /// Current qualifying star count
    pub count: u32,
}

impl StarPost {
    /// Header line shown above the embed, e.g. `⭐ **3** | <#123>`.
    pub fn header(&self) -> String {
        format!(
            "{} **{}** | <#{}>",
            self.emoji, self.count, self.source_channel_id
        )
    }

    /// Link that jumps to the source message.
    pub fn jump_url(&self) -> String {
        format!(
            "https://discord.com/channels/{}/{}/{}",
            self.guild_id, self.source_channel_id, self.source_message_id
        )
    }
}
