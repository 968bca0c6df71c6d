//! In-memory implementation of [`StarboardStore`] for testing.
//!
//! Mirrors the PostgreSQL schema's constraints: unique starboard channels,
//! guild foreign keys, composite primary keys on rules and mappings, and
//! cascading starboard deletes.

use crate::DatabaseResult;
use starboard_core::{
    ChannelId, ChannelRule, GuildId, MessageId, PostMapping, RoleId, RoleRule, Starboard,
    StarboardId,
};
use starboard_error::{DatabaseError, DatabaseErrorKind};
use starboard_interface::{NewStarboard, StarboardStore};
use std::collections::{BTreeMap, BTreeSet};

/// HashMap-style store. All data is lost when it is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStarboardStore {
    guilds: BTreeSet<GuildId>,
    starboards: BTreeMap<StarboardId, Starboard>,
    channel_rules: BTreeMap<(StarboardId, ChannelId), bool>,
    role_rules: BTreeMap<(StarboardId, RoleId), bool>,
    mappings: BTreeMap<(StarboardId, MessageId), PostMapping>,
    last_id: u64,
    fail_writes: bool,
}

impl InMemoryStarboardStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with a query error (for testing).
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of stored guilds (for testing).
    pub fn guild_count(&self) -> usize {
        self.guilds.len()
    }

    /// Number of stored post mappings (for testing).
    pub fn mapping_count(&self) -> usize {
        self.mappings.len()
    }

    /// Every stored mapping, ordered by key (for testing).
    pub fn all_mappings(&self) -> Vec<PostMapping> {
        self.mappings.values().cloned().collect()
    }

    fn check_writable(&self) -> DatabaseResult<()> {
        if self.fail_writes {
            return Err(DatabaseError::new(DatabaseErrorKind::Query(
                "writes disabled".to_string(),
            )));
        }
        Ok(())
    }

    fn require_starboard(&self, id: StarboardId) -> DatabaseResult<()> {
        if self.starboards.contains_key(&id) {
            Ok(())
        } else {
            Err(DatabaseError::new(DatabaseErrorKind::Constraint(format!(
                "starboard {id} does not exist"
            ))))
        }
    }
}

impl StarboardStore for InMemoryStarboardStore {
    fn fetch_starboards(&mut self, guild_id: GuildId) -> DatabaseResult<Vec<Starboard>> {
        Ok(self
            .starboards
            .values()
            .filter(|s| s.guild_id == guild_id)
            .cloned()
            .collect())
    }

    fn fetch_starboard(&mut self, id: StarboardId) -> DatabaseResult<Option<Starboard>> {
        Ok(self.starboards.get(&id).cloned())
    }

    fn starboard_for_channel(&mut self, channel_id: ChannelId) -> DatabaseResult<Option<Starboard>> {
        Ok(self
            .starboards
            .values()
            .find(|s| s.channel_id == channel_id)
            .cloned())
    }

    fn fetch_channel_rules(&mut self, starboard_id: StarboardId) -> DatabaseResult<Vec<ChannelRule>> {
        Ok(self
            .channel_rules
            .iter()
            .filter(|((sb, _), _)| *sb == starboard_id)
            .map(|(&(starboard_id, channel_id), &is_whitelist)| ChannelRule {
                starboard_id,
                channel_id,
                is_whitelist,
            })
            .collect())
    }

    fn fetch_role_rules(&mut self, starboard_id: StarboardId) -> DatabaseResult<Vec<RoleRule>> {
        Ok(self
            .role_rules
            .iter()
            .filter(|((sb, _), _)| *sb == starboard_id)
            .map(|(&(starboard_id, role_id), &is_whitelist)| RoleRule {
                starboard_id,
                role_id,
                is_whitelist,
            })
            .collect())
    }

    fn get_mapping(
        &mut self,
        starboard_id: StarboardId,
        message_id: MessageId,
    ) -> DatabaseResult<Option<PostMapping>> {
        Ok(self.mappings.get(&(starboard_id, message_id)).cloned())
    }

    fn put_mapping(&mut self, mapping: &PostMapping) -> DatabaseResult<()> {
        self.check_writable()?;
        self.require_starboard(mapping.starboard_id)?;
        self.mappings
            .insert((mapping.starboard_id, mapping.message_id), mapping.clone());
        Ok(())
    }

    fn delete_mapping(
        &mut self,
        starboard_id: StarboardId,
        message_id: MessageId,
    ) -> DatabaseResult<bool> {
        self.check_writable()?;
        Ok(self.mappings.remove(&(starboard_id, message_id)).is_some())
    }

    fn mappings_for_message(&mut self, message_id: MessageId) -> DatabaseResult<Vec<PostMapping>> {
        Ok(self
            .mappings
            .values()
            .filter(|m| m.message_id == message_id)
            .cloned()
            .collect())
    }

    fn mappings_for_source_channel(
        &mut self,
        channel_id: ChannelId,
    ) -> DatabaseResult<Vec<PostMapping>> {
        Ok(self
            .mappings
            .values()
            .filter(|m| m.source_channel_id == channel_id)
            .cloned()
            .collect())
    }

    fn ensure_guild(&mut self, guild_id: GuildId) -> DatabaseResult<()> {
        self.check_writable()?;
        self.guilds.insert(guild_id);
        Ok(())
    }

    fn insert_starboard(&mut self, starboard: &NewStarboard) -> DatabaseResult<Starboard> {
        self.check_writable()?;
        if !self.guilds.contains(&starboard.guild_id) {
            return Err(DatabaseError::new(DatabaseErrorKind::Constraint(format!(
                "guild {} does not exist",
                starboard.guild_id
            ))));
        }
        if self
            .starboards
            .values()
            .any(|s| s.channel_id == starboard.channel_id)
        {
            return Err(DatabaseError::new(DatabaseErrorKind::Constraint(format!(
                "channel {} is already a starboard",
                starboard.channel_id
            ))));
        }

        self.last_id = self.last_id.saturating_add(1);
        let stored = Starboard {
            id: StarboardId(self.last_id),
            guild_id: starboard.guild_id,
            channel_id: starboard.channel_id,
            emoji: starboard.emoji.clone(),
            threshold: starboard.threshold,
            self_star: starboard.self_star,
            bot_messages: starboard.bot_messages,
            locked: starboard.locked,
        };
        self.starboards.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn update_starboard(&mut self, starboard: &Starboard) -> DatabaseResult<()> {
        self.check_writable()?;
        if let Some(existing) = self.starboards.get_mut(&starboard.id) {
            existing.emoji = starboard.emoji.clone();
            existing.threshold = starboard.threshold;
            existing.self_star = starboard.self_star;
            existing.bot_messages = starboard.bot_messages;
            existing.locked = starboard.locked;
        }
        Ok(())
    }

    fn delete_starboard(&mut self, id: StarboardId) -> DatabaseResult<bool> {
        self.check_writable()?;
        let existed = self.starboards.remove(&id).is_some();
        self.channel_rules.retain(|(sb, _), _| *sb != id);
        self.role_rules.retain(|(sb, _), _| *sb != id);
        self.mappings.retain(|(sb, _), _| *sb != id);
        Ok(existed)
    }

    fn upsert_channel_rule(&mut self, rule: &ChannelRule) -> DatabaseResult<()> {
        self.check_writable()?;
        self.require_starboard(rule.starboard_id)?;
        self.channel_rules
            .insert((rule.starboard_id, rule.channel_id), rule.is_whitelist);
        Ok(())
    }

    fn delete_channel_rule(
        &mut self,
        starboard_id: StarboardId,
        channel_id: ChannelId,
    ) -> DatabaseResult<bool> {
        self.check_writable()?;
        Ok(self.channel_rules.remove(&(starboard_id, channel_id)).is_some())
    }

    fn upsert_role_rule(&mut self, rule: &RoleRule) -> DatabaseResult<()> {
        self.check_writable()?;
        self.require_starboard(rule.starboard_id)?;
        self.role_rules
            .insert((rule.starboard_id, rule.role_id), rule.is_whitelist);
        Ok(())
    }

    fn delete_role_rule(&mut self, starboard_id: StarboardId, role_id: RoleId) -> DatabaseResult<bool> {
        self.check_writable()?;
        Ok(self.role_rules.remove(&(starboard_id, role_id)).is_some())
    }
}
