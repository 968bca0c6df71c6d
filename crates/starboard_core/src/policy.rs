//! Policy evaluation and star tallies.
//!
//! Channel and role rules are evaluated independently and the results are
//! combined with AND. For each axis: when any whitelist entry exists, only
//! listed subjects pass and blacklist entries are ignored; otherwise every
//! subject passes except blacklisted ones.

use crate::{MessageContext, Starboard, StarboardRules, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Why a message may not appear on a starboard.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum BlockReason {
    /// Author is a bot and the board does not accept bot messages
    #[display("bot-authored message")]
    BotAuthor,
    /// The board whitelists channels and this one is not listed
    #[display("channel not whitelisted")]
    ChannelNotWhitelisted,
    /// The channel is blacklisted
    #[display("channel blacklisted")]
    ChannelBlacklisted,
    /// The board whitelists roles and the author holds none of them
    #[display("author holds no whitelisted role")]
    RoleNotWhitelisted,
    /// The author holds a blacklisted role
    #[display("author holds a blacklisted role")]
    RoleBlacklisted,
}

/// Outcome of evaluating one starboard against one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Eligibility {
    /// The message may be posted once it reaches `threshold` stars
    Eligible {
        /// Stars required for a post
        threshold: u32,
    },
    /// The message never appears on this starboard
    Blocked(BlockReason),
}

enum Axis {
    Pass,
    NotWhitelisted,
    Blacklisted,
}

/// Evaluates one rule axis.
///
/// `subjects` are the message's values on this axis: its single channel, or
/// every role its author holds.
fn evaluate_axis<T, I>(rules: I, subjects: &[T]) -> Axis
where
    T: PartialEq,
    I: IntoIterator<Item = (T, bool)>,
{
    let (whitelist, blacklist): (Vec<_>, Vec<_>) =
        rules.into_iter().partition(|(_, is_whitelist)| *is_whitelist);

    if !whitelist.is_empty() {
        let listed = subjects
            .iter()
            .any(|subject| whitelist.iter().any(|(id, _)| id == subject));
        return if listed { Axis::Pass } else { Axis::NotWhitelisted };
    }

    let denied = subjects
        .iter()
        .any(|subject| blacklist.iter().any(|(id, _)| id == subject));
    if denied { Axis::Blacklisted } else { Axis::Pass }
}

/// Decides whether `message` may appear on `starboard`.
///
/// # Examples
///
/// ```
/// use starboard_core::*;
///
/// let board = Starboard::new(StarboardId(1), GuildId(1), ChannelId(9), Emoji::Unicode("⭐".into()), 2);
/// let message = MessageContext {
///     guild_id: GuildId(1),
///     channel_id: ChannelId(5),
///     message_id: MessageId(7),
///     author_id: UserId(3),
///     author_is_bot: false,
///     author_roles: vec![],
/// };
/// assert_eq!(
///     evaluate(&board, &StarboardRules::default(), &message),
///     Eligibility::Eligible { threshold: 2 }
/// );
/// ```
pub fn evaluate(
    starboard: &Starboard,
    rules: &StarboardRules,
    message: &MessageContext,
) -> Eligibility {
    if message.author_is_bot && !starboard.bot_messages {
        return Eligibility::Blocked(BlockReason::BotAuthor);
    }

    let channel_rules = rules
        .channels
        .iter()
        .filter(|rule| rule.starboard_id == starboard.id)
        .map(|rule| (rule.channel_id, rule.is_whitelist));
    match evaluate_axis(channel_rules, &[message.channel_id]) {
        Axis::Pass => {}
        Axis::NotWhitelisted => {
            return Eligibility::Blocked(BlockReason::ChannelNotWhitelisted);
        }
        Axis::Blacklisted => return Eligibility::Blocked(BlockReason::ChannelBlacklisted),
    }

    let role_rules = rules
        .roles
        .iter()
        .filter(|rule| rule.starboard_id == starboard.id)
        .map(|rule| (rule.role_id, rule.is_whitelist));
    match evaluate_axis(role_rules, &message.author_roles) {
        Axis::Pass => Eligibility::Eligible {
            threshold: starboard.threshold,
        },
        Axis::NotWhitelisted => Eligibility::Blocked(BlockReason::RoleNotWhitelisted),
        Axis::Blacklisted => Eligibility::Blocked(BlockReason::RoleBlacklisted),
    }
}

/// Counts distinct qualifying reactors.
///
/// The author's own reaction is dropped unless the starboard allows self-stars.
/// Duplicate user ids count once.
pub fn tally(starboard: &Starboard, message: &MessageContext, reactors: &[UserId]) -> u32 {
    let distinct: HashSet<UserId> = reactors
        .iter()
        .copied()
        .filter(|user| starboard.self_star || *user != message.author_id)
        .collect();
    u32::try_from(distinct.len()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChannelId, ChannelRule, Emoji, GuildId, MessageId, RoleId, RoleRule, StarboardId};

    fn board() -> Starboard {
        Starboard::new(
            StarboardId(1),
            GuildId(100),
            ChannelId(900),
            Emoji::Unicode("⭐".into()),
            3,
        )
    }

    fn message(channel: u64, roles: &[u64]) -> MessageContext {
        MessageContext {
            guild_id: GuildId(100),
            channel_id: ChannelId(channel),
            message_id: MessageId(5),
            author_id: UserId(42),
            author_is_bot: false,
            author_roles: roles.iter().copied().map(RoleId).collect(),
        }
    }

    fn channel_rule(channel: u64, is_whitelist: bool) -> ChannelRule {
        ChannelRule {
            starboard_id: StarboardId(1),
            channel_id: ChannelId(channel),
            is_whitelist,
        }
    }

    fn role_rule(role: u64, is_whitelist: bool) -> RoleRule {
        RoleRule {
            starboard_id: StarboardId(1),
            role_id: RoleId(role),
            is_whitelist,
        }
    }

    #[test]
    fn test_empty_rules_allow_everything() {
        let result = evaluate(&board(), &StarboardRules::default(), &message(1, &[7, 8]));
        assert_eq!(result, Eligibility::Eligible { threshold: 3 });
    }

    #[test]
    fn test_channel_whitelist_denies_unlisted_channel() {
        let rules = StarboardRules {
            channels: vec![channel_rule(2, true)],
            roles: vec![],
        };
        assert_eq!(
            evaluate(&board(), &rules, &message(1, &[])),
            Eligibility::Blocked(BlockReason::ChannelNotWhitelisted)
        );
        assert!(matches!(
            evaluate(&board(), &rules, &message(2, &[])),
            Eligibility::Eligible { .. }
        ));
    }

    #[test]
    fn test_whitelist_overrides_blacklist_on_same_axis() {
        let rules = StarboardRules {
            channels: vec![channel_rule(2, true), channel_rule(2, false)],
            roles: vec![],
        };
        assert!(matches!(
            evaluate(&board(), &rules, &message(2, &[])),
            Eligibility::Eligible { .. }
        ));
    }

    #[test]
    fn test_channel_blacklist_only_denies_listed() {
        let rules = StarboardRules {
            channels: vec![channel_rule(3, false)],
            roles: vec![],
        };
        assert_eq!(
            evaluate(&board(), &rules, &message(3, &[])),
            Eligibility::Blocked(BlockReason::ChannelBlacklisted)
        );
        assert!(matches!(
            evaluate(&board(), &rules, &message(4, &[])),
            Eligibility::Eligible { .. }
        ));
    }

    #[test]
    fn test_role_whitelist_requires_any_listed_role() {
        let rules = StarboardRules {
            channels: vec![],
            roles: vec![role_rule(10, true)],
        };
        assert_eq!(
            evaluate(&board(), &rules, &message(1, &[])),
            Eligibility::Blocked(BlockReason::RoleNotWhitelisted)
        );
        assert!(matches!(
            evaluate(&board(), &rules, &message(1, &[9, 10])),
            Eligibility::Eligible { .. }
        ));
    }

    #[test]
    fn test_any_blacklisted_role_blocks() {
        let rules = StarboardRules {
            channels: vec![],
            roles: vec![role_rule(10, false)],
        };
        assert_eq!(
            evaluate(&board(), &rules, &message(1, &[9, 10])),
            Eligibility::Blocked(BlockReason::RoleBlacklisted)
        );
    }

    #[test]
    fn test_axes_are_independent() {
        let rules = StarboardRules {
            channels: vec![channel_rule(1, true)],
            roles: vec![role_rule(10, false)],
        };
        assert!(matches!(
            evaluate(&board(), &rules, &message(1, &[11])),
            Eligibility::Eligible { .. }
        ));
        assert_eq!(
            evaluate(&board(), &rules, &message(1, &[10])),
            Eligibility::Blocked(BlockReason::RoleBlacklisted)
        );
    }

    #[test]
    fn test_rules_for_other_starboards_are_ignored() {
        let mut foreign = channel_rule(2, true);
        foreign.starboard_id = StarboardId(99);
        let rules = StarboardRules {
            channels: vec![foreign],
            roles: vec![],
        };
        assert!(matches!(
            evaluate(&board(), &rules, &message(1, &[])),
            Eligibility::Eligible { .. }
        ));
    }

    #[test]
    fn test_bot_messages_blocked_unless_allowed() {
        let mut msg = message(1, &[]);
        msg.author_is_bot = true;
        let mut sb = board();
        assert_eq!(
            evaluate(&sb, &StarboardRules::default(), &msg),
            Eligibility::Blocked(BlockReason::BotAuthor)
        );
        sb.bot_messages = true;
        assert!(matches!(
            evaluate(&sb, &StarboardRules::default(), &msg),
            Eligibility::Eligible { .. }
        ));
    }

    #[test]
    fn test_tally_excludes_author_without_self_star() {
        let msg = message(1, &[]);
        let reactors = [UserId(42)];
        assert_eq!(tally(&board(), &msg, &reactors), 0);

        let mut sb = board();
        sb.self_star = true;
        assert_eq!(tally(&sb, &msg, &reactors), 1);
    }

    #[test]
    fn test_tally_counts_distinct_users() {
        let msg = message(1, &[]);
        let reactors = [UserId(1), UserId(2), UserId(1), UserId(42)];
        assert_eq!(tally(&board(), &msg, &reactors), 2);
    }
}
