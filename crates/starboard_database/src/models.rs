//! Diesel row models and conversions to core types.

use crate::schema::{channel_rules, guilds, post_mappings, role_rules, starboards};
use diesel::prelude::*;
use starboard_core::{
    ChannelId, ChannelRule, Emoji, GuildId, MessageId, PostMapping, RoleId, RoleRule, Starboard,
    StarboardId,
};
use starboard_interface::NewStarboard;

/// Clamps a stored integer into the unsigned range used by core types.
fn to_count(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

/// Clamps an unsigned count into a Postgres `INTEGER`.
fn from_count(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Insertable guild record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = guilds)]
pub struct NewGuildRow {
    /// Guild snowflake
    pub id: i64,
}

/// Starboard row as stored.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = starboards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StarboardRow {
    /// Serial id
    pub id: i64,
    /// Owning guild
    pub guild_id: i64,
    /// Target channel
    pub channel_id: i64,
    /// Trigger emoji in canonical text form
    pub emoji: String,
    /// Minimum stars
    pub threshold: i32,
    /// Allow self-stars
    pub self_star: bool,
    /// Allow bot-authored messages
    pub bot_messages: bool,
    /// Never delete posts on count drops
    pub locked: bool,
}

impl From<StarboardRow> for Starboard {
    fn from(row: StarboardRow) -> Self {
        let emoji = row
            .emoji
            .parse::<Emoji>()
            .unwrap_or_else(|never| match never {});
        Self {
            id: StarboardId::from_db(row.id),
            guild_id: GuildId::from_db(row.guild_id),
            channel_id: ChannelId::from_db(row.channel_id),
            emoji,
            threshold: to_count(row.threshold).max(1),
            self_star: row.self_star,
            bot_messages: row.bot_messages,
            locked: row.locked,
        }
    }
}

/// Insertable starboard record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = starboards)]
pub struct NewStarboardRow {
    /// Owning guild
    pub guild_id: i64,
    /// Target channel
    pub channel_id: i64,
    /// Trigger emoji
    pub emoji: String,
    /// Minimum stars
    pub threshold: i32,
    /// Allow self-stars
    pub self_star: bool,
    /// Allow bot-authored messages
    pub bot_messages: bool,
    /// Never delete posts on count drops
    pub locked: bool,
}

impl From<&NewStarboard> for NewStarboardRow {
    fn from(new: &NewStarboard) -> Self {
        Self {
            guild_id: new.guild_id.to_db(),
            channel_id: new.channel_id.to_db(),
            emoji: new.emoji.to_string(),
            threshold: from_count(new.threshold),
            self_star: new.self_star,
            bot_messages: new.bot_messages,
            locked: new.locked,
        }
    }
}

/// Channel rule row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = channel_rules)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChannelRuleRow {
    /// Owning starboard
    pub starboard_id: i64,
    /// Constrained channel
    pub channel_id: i64,
    /// Whitelist flag
    pub is_whitelist: bool,
}

impl From<ChannelRuleRow> for ChannelRule {
    fn from(row: ChannelRuleRow) -> Self {
        Self {
            starboard_id: StarboardId::from_db(row.starboard_id),
            channel_id: ChannelId::from_db(row.channel_id),
            is_whitelist: row.is_whitelist,
        }
    }
}

impl From<&ChannelRule> for ChannelRuleRow {
    fn from(rule: &ChannelRule) -> Self {
        Self {
            starboard_id: rule.starboard_id.to_db(),
            channel_id: rule.channel_id.to_db(),
            is_whitelist: rule.is_whitelist,
        }
    }
}

/// Role rule row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = role_rules)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoleRuleRow {
    /// Owning starboard
    pub starboard_id: i64,
    /// Constrained role
    pub role_id: i64,
    /// Whitelist flag
    pub is_whitelist: bool,
}

impl From<RoleRuleRow> for RoleRule {
    fn from(row: RoleRuleRow) -> Self {
        Self {
            starboard_id: StarboardId::from_db(row.starboard_id),
            role_id: RoleId::from_db(row.role_id),
            is_whitelist: row.is_whitelist,
        }
    }
}

impl From<&RoleRule> for RoleRuleRow {
    fn from(rule: &RoleRule) -> Self {
        Self {
            starboard_id: rule.starboard_id.to_db(),
            role_id: rule.role_id.to_db(),
            is_whitelist: rule.is_whitelist,
        }
    }
}

/// Post mapping row as stored.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = post_mappings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostMappingRow {
    /// Owning starboard
    pub starboard_id: i64,
    /// Source message
    pub message_id: i64,
    /// Source channel
    pub source_channel_id: i64,
    /// Star post message
    pub post_id: i64,
    /// Last written count
    pub star_count: i32,
    /// Last write time
    pub updated_at: chrono::NaiveDateTime,
}

impl From<PostMappingRow> for PostMapping {
    fn from(row: PostMappingRow) -> Self {
        Self {
            starboard_id: StarboardId::from_db(row.starboard_id),
            message_id: MessageId::from_db(row.message_id),
            source_channel_id: ChannelId::from_db(row.source_channel_id),
            post_id: MessageId::from_db(row.post_id),
            star_count: to_count(row.star_count),
        }
    }
}

/// Insertable post mapping.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = post_mappings)]
pub struct NewPostMappingRow {
    /// Owning starboard
    pub starboard_id: i64,
    /// Source message
    pub message_id: i64,
    /// Source channel
    pub source_channel_id: i64,
    /// Star post message
    pub post_id: i64,
    /// Count written to the post
    pub star_count: i32,
}

impl From<&PostMapping> for NewPostMappingRow {
    fn from(mapping: &PostMapping) -> Self {
        Self {
            starboard_id: mapping.starboard_id.to_db(),
            message_id: mapping.message_id.to_db(),
            source_channel_id: mapping.source_channel_id.to_db(),
            post_id: mapping.post_id.to_db(),
            star_count: from_count(mapping.star_count),
        }
    }
}
