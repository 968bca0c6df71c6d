//! Test utilities for engine tests.
//!
//! Provides a scripted chat platform and fixtures shared across test files.

#![allow(dead_code)]

pub mod mock_platform;

#[allow(unused_imports)]
pub use mock_platform::{MockPlatform, PlatformCall};

use starboard_core::{ChannelId, Emoji, GuildId, MessageContext, MessageId, RoleId, UserId};

pub const GUILD: GuildId = GuildId(1);
pub const SOURCE_CHANNEL: ChannelId = ChannelId(10);
pub const OTHER_CHANNEL: ChannelId = ChannelId(11);
pub const STAR_CHANNEL: ChannelId = ChannelId(20);
pub const AUTHOR: UserId = UserId(100);

/// The default trigger emoji.
pub fn star() -> Emoji {
    Emoji::Unicode("⭐".to_string())
}

/// A message in [`SOURCE_CHANNEL`] written by [`AUTHOR`].
pub fn message(message_id: u64) -> MessageContext {
    MessageContext {
        guild_id: GUILD,
        channel_id: SOURCE_CHANNEL,
        message_id: MessageId(message_id),
        author_id: AUTHOR,
        author_is_bot: false,
        author_roles: vec![RoleId(500)],
    }
}

/// User ids `1..=n`.
pub fn users(n: u64) -> Vec<UserId> {
    (1..=n).map(UserId).collect()
}
