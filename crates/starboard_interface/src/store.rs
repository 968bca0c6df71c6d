//! Storage trait for configuration and post mappings.

use serde::{Deserialize, Serialize};
use starboard_core::{
    ChannelId, ChannelRule, Emoji, GuildId, MessageId, PostMapping, RoleId, RoleRule, Starboard,
    StarboardId,
};
use starboard_error::DatabaseError;

/// Fields required to create a starboard. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStarboard {
    /// Owning guild
    pub guild_id: GuildId,
    /// Channel star posts are published to
    pub channel_id: ChannelId,
    /// Trigger emoji
    pub emoji: Emoji,
    /// Minimum stars
    pub threshold: u32,
    /// Allow self-stars
    pub self_star: bool,
    /// Allow bot-authored messages
    pub bot_messages: bool,
    /// Never delete posts on count drops
    pub locked: bool,
}

/// One storage session.
///
/// Methods take `&mut self` because implementations own a single connection.
/// Callers reach a store only through `Gateway`, which serialises every
/// session in the process, so implementations need no locking of their own.
pub trait StarboardStore: Send {
    /// Every starboard configured in a guild.
    fn fetch_starboards(&mut self, guild_id: GuildId) -> Result<Vec<Starboard>, DatabaseError>;

    /// A single starboard by id.
    fn fetch_starboard(&mut self, id: StarboardId) -> Result<Option<Starboard>, DatabaseError>;

    /// The starboard publishing into `channel_id`, if any.
    fn starboard_for_channel(
        &mut self,
        channel_id: ChannelId,
    ) -> Result<Option<Starboard>, DatabaseError>;

    /// Channel allow/deny entries of a starboard.
    fn fetch_channel_rules(
        &mut self,
        starboard_id: StarboardId,
    ) -> Result<Vec<ChannelRule>, DatabaseError>;

    /// Role allow/deny entries of a starboard.
    fn fetch_role_rules(
        &mut self,
        starboard_id: StarboardId,
    ) -> Result<Vec<RoleRule>, DatabaseError>;

    /// The mapping for a (starboard, message) pair.
    fn get_mapping(
        &mut self,
        starboard_id: StarboardId,
        message_id: MessageId,
    ) -> Result<Option<PostMapping>, DatabaseError>;

    /// Inserts the mapping, or replaces the existing one for the same pair.
    fn put_mapping(&mut self, mapping: &PostMapping) -> Result<(), DatabaseError>;

    /// Removes a mapping. Returns whether one existed.
    fn delete_mapping(
        &mut self,
        starboard_id: StarboardId,
        message_id: MessageId,
    ) -> Result<bool, DatabaseError>;

    /// Every mapping of a source message, across starboards.
    fn mappings_for_message(
        &mut self,
        message_id: MessageId,
    ) -> Result<Vec<PostMapping>, DatabaseError>;

    /// Every mapping whose source message lives in `channel_id`.
    fn mappings_for_source_channel(
        &mut self,
        channel_id: ChannelId,
    ) -> Result<Vec<PostMapping>, DatabaseError>;

    /// Creates the guild record if missing.
    fn ensure_guild(&mut self, guild_id: GuildId) -> Result<(), DatabaseError>;

    /// Creates a starboard.
    fn insert_starboard(&mut self, starboard: &NewStarboard) -> Result<Starboard, DatabaseError>;

    /// Overwrites the mutable fields of an existing starboard.
    fn update_starboard(&mut self, starboard: &Starboard) -> Result<(), DatabaseError>;

    /// Deletes a starboard together with its rules and mappings.
    fn delete_starboard(&mut self, id: StarboardId) -> Result<bool, DatabaseError>;

    /// Adds a channel rule, replacing any rule for the same channel.
    fn upsert_channel_rule(&mut self, rule: &ChannelRule) -> Result<(), DatabaseError>;

    /// Removes a channel rule. Returns whether one existed.
    fn delete_channel_rule(
        &mut self,
        starboard_id: StarboardId,
        channel_id: ChannelId,
    ) -> Result<bool, DatabaseError>;

    /// Adds a role rule, replacing any rule for the same role.
    fn upsert_role_rule(&mut self, rule: &RoleRule) -> Result<(), DatabaseError>;

    /// Removes a role rule. Returns whether one existed.
    fn delete_role_rule(
        &mut self,
        starboard_id: StarboardId,
        role_id: RoleId,
    ) -> Result<bool, DatabaseError>;
}
