//! Starboard configuration records.

use crate::{ChannelId, Emoji, GuildId, RoleId, StarboardId};
use serde::{Deserialize, Serialize};

/// A configured starboard.
///
/// # Examples
///
/// ```
/// use starboard_core::{ChannelId, Emoji, GuildId, Starboard, StarboardId};
///
/// let board = Starboard::new(StarboardId(1), GuildId(10), ChannelId(20), Emoji::Unicode("⭐".into()), 3);
/// assert!(!board.self_star);
/// assert!(!board.locked);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Starboard {
    /// Starboard id
    pub id: StarboardId,
    /// Owning guild
    pub guild_id: GuildId,
    /// Channel star posts are published to
    pub channel_id: ChannelId,
    /// Emoji that counts as a star
    pub emoji: Emoji,
    /// Minimum stars for a post to exist
    pub threshold: u32,
    /// Whether authors may star their own messages
    pub self_star: bool,
    /// Whether bot-authored messages may be starred
    pub bot_messages: bool,
    /// Locked boards never delete posts because the count dropped
    pub locked: bool,
}

impl Starboard {
    /// A starboard with every flag off.
    pub fn new(
        id: StarboardId,
        guild_id: GuildId,
        channel_id: ChannelId,
        emoji: Emoji,
        threshold: u32,
    ) -> Self {
        Self {
            id,
            guild_id,
            channel_id,
            emoji,
            threshold,
            self_star: false,
            bot_messages: false,
            locked: false,
        }
    }
}

/// Which kind of subject a rule constrains.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum RuleSubject {
    /// Source channel of the message
    #[display("channel")]
    Channel,
    /// Roles of the message author
    #[display("role")]
    Role,
}

/// Allow or deny entry for a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRule {
    /// Starboard the rule applies to
    pub starboard_id: StarboardId,
    /// Constrained channel
    pub channel_id: ChannelId,
    /// Whitelist entry when true, blacklist entry otherwise
    pub is_whitelist: bool,
}

/// Allow or deny entry for a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRule {
    /// Starboard the rule applies to
    pub starboard_id: StarboardId,
    /// Constrained role
    pub role_id: RoleId,
    /// Whitelist entry when true, blacklist entry otherwise
    pub is_whitelist: bool,
}

/// Snapshot of every rule attached to one starboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarboardRules {
    /// Channel allow/deny entries
    pub channels: Vec<ChannelRule>,
    /// Role allow/deny entries
    pub roles: Vec<RoleRule>,
}

impl StarboardRules {
    /// Whether no rule of either kind exists.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty() && self.roles.is_empty()
    }
}
