//! Administrative edits to starboards and their rules.
//!
//! Every operation holds the storage gate, so an edit either lands before a
//! concurrent reconciliation reads the configuration or after it finished.

use derive_getters::Getters;
use starboard_core::{
    ChannelId, ChannelRule, Emoji, GuildId, RoleId, RoleRule, RuleSummary, Starboard,
    StarboardId, StarboardRules,
};
use starboard_database::Gateway;
use starboard_error::{SettingsError, SettingsErrorKind, StarboardResult};
use starboard_interface::{NewStarboard, StarboardStore};
use std::collections::HashSet;
use tracing::{info, instrument};

/// Partial update of a starboard; unset fields keep their value.
///
/// # Example
///
/// ```
/// use starboard_engine::StarboardUpdateBuilder;
///
/// let update = StarboardUpdateBuilder::default()
///     .threshold(5u32)
///     .locked(true)
///     .build()
///     .unwrap();
/// assert_eq!(*update.threshold(), Some(5));
/// assert_eq!(*update.self_star(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(default, setter(into, strip_option))]
pub struct StarboardUpdate {
    /// New trigger emoji
    emoji: Option<Emoji>,
    /// New threshold, at least one
    threshold: Option<u32>,
    /// Whether authors may star their own messages
    self_star: Option<bool>,
    /// Whether bot-authored messages are eligible
    bot_messages: Option<bool>,
    /// Whether posts survive count drops
    locked: Option<bool>,
}

impl StarboardUpdate {
    fn apply(&self, starboard: &mut Starboard) {
        if let Some(emoji) = &self.emoji {
            starboard.emoji = emoji.clone();
        }
        if let Some(threshold) = self.threshold {
            starboard.threshold = threshold;
        }
        if let Some(self_star) = self.self_star {
            starboard.self_star = self_star;
        }
        if let Some(bot_messages) = self.bot_messages {
            starboard.bot_messages = bot_messages;
        }
        if let Some(locked) = self.locked {
            starboard.locked = locked;
        }
    }
}

/// Configuration service sharing the engine's storage gate.
pub struct Settings<S> {
    gateway: Gateway<S>,
}

impl<S> Clone for Settings<S> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}

impl<S: StarboardStore> Settings<S> {
    /// Create a settings service over `gateway`.
    pub fn new(gateway: Gateway<S>) -> Self {
        Self { gateway }
    }

    /// Every starboard of a guild.
    pub async fn starboards(&self, guild_id: GuildId) -> StarboardResult<Vec<Starboard>> {
        let mut store = self.gateway.acquire().await;
        Ok(store.fetch_starboards(guild_id)?)
    }

    /// Turn `channel_id` into a starboard triggered by `emoji`.
    ///
    /// The new starboard has self-stars, bot messages and locking disabled.
    ///
    /// # Errors
    ///
    /// `InvalidThreshold` for a zero threshold and `DuplicateStarboard` when
    /// the channel already hosts a starboard.
    #[instrument(skip(self, emoji), fields(emoji = %emoji))]
    pub async fn create_starboard(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        emoji: Emoji,
        threshold: u32,
    ) -> StarboardResult<Starboard> {
        validate_threshold(threshold)?;

        let mut store = self.gateway.acquire().await;
        if store.starboard_for_channel(channel_id)?.is_some() {
            return Err(
                SettingsError::new(SettingsErrorKind::DuplicateStarboard(channel_id.get())).into(),
            );
        }

        store.ensure_guild(guild_id)?;
        let starboard = store.insert_starboard(&NewStarboard {
            guild_id,
            channel_id,
            emoji,
            threshold,
            self_star: false,
            bot_messages: false,
            locked: false,
        })?;
        info!(starboard_id = %starboard.id, "Created starboard");
        Ok(starboard)
    }

    /// Change some fields of a starboard.
    #[instrument(skip(self))]
    pub async fn update_starboard(
        &self,
        id: StarboardId,
        update: StarboardUpdate,
    ) -> StarboardResult<Starboard> {
        if let Some(threshold) = update.threshold {
            validate_threshold(threshold)?;
        }

        let mut store = self.gateway.acquire().await;
        let mut starboard = existing(&mut *store, id)?;
        update.apply(&mut starboard);
        store.update_starboard(&starboard)?;
        info!("Updated starboard");
        Ok(starboard)
    }

    /// Remove a starboard with its rules and mappings.
    ///
    /// Published star posts are left in place.
    #[instrument(skip(self))]
    pub async fn delete_starboard(&self, id: StarboardId) -> StarboardResult<()> {
        let mut store = self.gateway.acquire().await;
        if !store.delete_starboard(id)? {
            return Err(SettingsError::new(SettingsErrorKind::UnknownStarboard(id.get())).into());
        }
        info!("Deleted starboard");
        Ok(())
    }

    /// Whitelist or blacklist a source channel.
    ///
    /// A channel is on at most one list per starboard; adding it to one list
    /// takes it off the other.
    #[instrument(skip(self))]
    pub async fn add_channel_rule(
        &self,
        starboard_id: StarboardId,
        channel_id: ChannelId,
        is_whitelist: bool,
    ) -> StarboardResult<()> {
        let mut store = self.gateway.acquire().await;
        existing(&mut *store, starboard_id)?;
        store.upsert_channel_rule(&ChannelRule {
            starboard_id,
            channel_id,
            is_whitelist,
        })?;
        Ok(())
    }

    /// Take a channel off whichever list it is on.
    #[instrument(skip(self))]
    pub async fn remove_channel_rule(
        &self,
        starboard_id: StarboardId,
        channel_id: ChannelId,
    ) -> StarboardResult<()> {
        let mut store = self.gateway.acquire().await;
        existing(&mut *store, starboard_id)?;
        if !store.delete_channel_rule(starboard_id, channel_id)? {
            return Err(SettingsError::new(SettingsErrorKind::RuleNotFound {
                subject: "channel",
                id: channel_id.get(),
                starboard: starboard_id.get(),
            })
            .into());
        }
        Ok(())
    }

    /// Whitelist or blacklist an author role.
    #[instrument(skip(self))]
    pub async fn add_role_rule(
        &self,
        starboard_id: StarboardId,
        role_id: RoleId,
        is_whitelist: bool,
    ) -> StarboardResult<()> {
        let mut store = self.gateway.acquire().await;
        existing(&mut *store, starboard_id)?;
        store.upsert_role_rule(&RoleRule {
            starboard_id,
            role_id,
            is_whitelist,
        })?;
        Ok(())
    }

    /// Take a role off whichever list it is on.
    #[instrument(skip(self))]
    pub async fn remove_role_rule(
        &self,
        starboard_id: StarboardId,
        role_id: RoleId,
    ) -> StarboardResult<()> {
        let mut store = self.gateway.acquire().await;
        existing(&mut *store, starboard_id)?;
        if !store.delete_role_rule(starboard_id, role_id)? {
            return Err(SettingsError::new(SettingsErrorKind::RuleNotFound {
                subject: "role",
                id: role_id.get(),
                starboard: starboard_id.get(),
            })
            .into());
        }
        Ok(())
    }

    /// Allow/deny lists of every starboard in a guild.
    pub async fn rule_summaries(&self, guild_id: GuildId) -> StarboardResult<Vec<RuleSummary>> {
        let mut store = self.gateway.acquire().await;
        let starboards = store.fetch_starboards(guild_id)?;

        let mut summaries = Vec::with_capacity(starboards.len());
        for starboard in starboards {
            let rules = StarboardRules {
                channels: store.fetch_channel_rules(starboard.id)?,
                roles: store.fetch_role_rules(starboard.id)?,
            };
            summaries.push(RuleSummary::from_rules(starboard.id, &rules));
        }
        Ok(summaries)
    }

    /// Drop rules that reference channels or roles no longer in the guild.
    ///
    /// Returns the number of rules removed.
    #[instrument(skip(self, live_channels, live_roles))]
    pub async fn clean_rules(
        &self,
        guild_id: GuildId,
        live_channels: &[ChannelId],
        live_roles: &[RoleId],
    ) -> StarboardResult<usize> {
        let live_channels: HashSet<_> = live_channels.iter().copied().collect();
        let live_roles: HashSet<_> = live_roles.iter().copied().collect();

        let mut store = self.gateway.acquire().await;
        let mut removed = 0;
        for starboard in store.fetch_starboards(guild_id)? {
            for rule in store.fetch_channel_rules(starboard.id)? {
                if !live_channels.contains(&rule.channel_id)
                    && store.delete_channel_rule(starboard.id, rule.channel_id)?
                {
                    removed += 1;
                }
            }
            for rule in store.fetch_role_rules(starboard.id)? {
                if !live_roles.contains(&rule.role_id)
                    && store.delete_role_rule(starboard.id, rule.role_id)?
                {
                    removed += 1;
                }
            }
        }

        if removed > 0 {
            info!(removed, "Removed rules for deleted channels and roles");
        }
        Ok(removed)
    }
}

fn validate_threshold(threshold: u32) -> Result<(), SettingsError> {
    if threshold == 0 {
        return Err(SettingsError::new(SettingsErrorKind::InvalidThreshold(
            threshold,
        )));
    }
    Ok(())
}

fn existing<S: StarboardStore>(store: &mut S, id: StarboardId) -> StarboardResult<Starboard> {
    store
        .fetch_starboard(id)?
        .ok_or_else(|| SettingsError::new(SettingsErrorKind::UnknownStarboard(id.get())).into())
}
