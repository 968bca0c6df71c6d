//! Reaction event normalisation.

use starboard_core::{RawReactionEvent, ReactionEvent};

/// Turns a transport event into a canonical one.
///
/// Returns `None` for reactions without guild context (direct messages),
/// which are outside the starboard's reach.
///
/// # Examples
///
/// ```
/// use starboard_core::*;
/// use starboard_engine::normalize;
///
/// let raw = RawReactionEvent {
///     guild_id: None,
///     channel_id: ChannelId(1),
///     message_id: MessageId(2),
///     user_id: UserId(3),
///     emoji: Emoji::Unicode("⭐".into()),
///     direction: ReactionDirection::Add,
/// };
/// assert!(normalize(raw).is_none());
/// ```
pub fn normalize(raw: RawReactionEvent) -> Option<ReactionEvent> {
    let guild_id = raw.guild_id?;
    Some(ReactionEvent {
        guild_id,
        channel_id: raw.channel_id,
        message_id: raw.message_id,
        user_id: raw.user_id,
        emoji: raw.emoji,
        direction: raw.direction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use starboard_core::{ChannelId, Emoji, GuildId, MessageId, ReactionDirection, UserId};

    #[test]
    fn test_guild_event_keeps_every_field() {
        let raw = RawReactionEvent {
            guild_id: Some(GuildId(10)),
            channel_id: ChannelId(11),
            message_id: MessageId(12),
            user_id: UserId(13),
            emoji: Emoji::Unicode("🔥".into()),
            direction: ReactionDirection::Remove,
        };
        let event = normalize(raw).unwrap();
        assert_eq!(event.guild_id, GuildId(10));
        assert_eq!(event.channel_id, ChannelId(11));
        assert_eq!(event.message_id, MessageId(12));
        assert_eq!(event.user_id, UserId(13));
        assert_eq!(event.emoji, Emoji::Unicode("🔥".into()));
        assert_eq!(event.direction, ReactionDirection::Remove);
    }
}
