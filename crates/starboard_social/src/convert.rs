//! Conversions between Serenity models and core types.

use serenity::all as discord;
use starboard_core::{
    ChannelId, Emoji, GuildId, MessageId, RawReactionEvent, ReactionDirection, RoleId, UserId,
};
use starboard_error::{PlatformError, PlatformErrorKind, PlatformResult};

/// Core emoji for a Serenity reaction type.
///
/// Returns `None` for reaction kinds the starboard cannot be configured with.
pub fn emoji_from_reaction(reaction: &discord::ReactionType) -> Option<Emoji> {
    match reaction {
        discord::ReactionType::Unicode(glyph) => Some(Emoji::Unicode(glyph.clone())),
        discord::ReactionType::Custom { animated, id, name } => Some(Emoji::Custom {
            name: name.clone().unwrap_or_default(),
            id: id.get(),
            animated: *animated,
        }),
        _ => None,
    }
}

/// Serenity reaction type for a core emoji.
///
/// # Errors
///
/// Custom emoji with id zero cannot exist on Discord and are rejected.
pub fn reaction_from_emoji(emoji: &Emoji) -> PlatformResult<discord::ReactionType> {
    match emoji {
        Emoji::Unicode(glyph) => Ok(discord::ReactionType::Unicode(glyph.clone())),
        Emoji::Custom { id: 0, name, .. } => Err(PlatformError::new(PlatformErrorKind::Other(
            format!("custom emoji {name} has no id"),
        ))),
        Emoji::Custom { name, id, animated } => Ok(discord::ReactionType::Custom {
            animated: *animated,
            id: discord::EmojiId::new(*id),
            name: Some(name.clone()),
        }),
    }
}

/// Raw event for a gateway reaction payload.
///
/// Payloads without a reacting user are ignored.
pub(crate) fn raw_event(
    reaction: &discord::Reaction,
    direction: ReactionDirection,
) -> Option<RawReactionEvent> {
    Some(RawReactionEvent {
        guild_id: reaction.guild_id.map(guild_id),
        channel_id: channel_id(reaction.channel_id),
        message_id: message_id(reaction.message_id),
        user_id: UserId(reaction.user_id?.get()),
        emoji: emoji_from_reaction(&reaction.emoji)?,
        direction,
    })
}

pub(crate) fn guild_id(id: discord::GuildId) -> GuildId {
    GuildId(id.get())
}

pub(crate) fn channel_id(id: discord::ChannelId) -> ChannelId {
    ChannelId(id.get())
}

pub(crate) fn message_id(id: discord::MessageId) -> MessageId {
    MessageId(id.get())
}

pub(crate) fn role_id(id: discord::RoleId) -> RoleId {
    RoleId(id.get())
}

// Serenity ids are non-zero; core ids come from Discord and never are zero.
pub(crate) fn to_channel(id: ChannelId) -> discord::ChannelId {
    discord::ChannelId::new(id.get())
}

pub(crate) fn to_message(id: MessageId) -> discord::MessageId {
    discord::MessageId::new(id.get())
}

pub(crate) fn to_guild(id: GuildId) -> discord::GuildId {
    discord::GuildId::new(id.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_reaction_converts() {
        let reaction = discord::ReactionType::Unicode("⭐".to_string());
        assert_eq!(
            emoji_from_reaction(&reaction),
            Some(Emoji::Unicode("⭐".to_string()))
        );
    }

    #[test]
    fn test_custom_reaction_keeps_id() {
        let reaction = discord::ReactionType::Custom {
            animated: true,
            id: discord::EmojiId::new(42),
            name: Some("party".to_string()),
        };
        let emoji = emoji_from_reaction(&reaction).unwrap();
        assert_eq!(emoji.to_string(), "<a:party:42>");
        assert_eq!(reaction_from_emoji(&emoji).unwrap(), reaction);
    }

    #[test]
    fn test_zero_id_custom_emoji_is_rejected() {
        let emoji = Emoji::Custom {
            name: "ghost".to_string(),
            id: 0,
            animated: false,
        };
        assert!(reaction_from_emoji(&emoji).is_err());
    }
}
