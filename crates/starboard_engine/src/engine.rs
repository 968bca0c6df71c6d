//! The reconciliation engine.
//!
//! Each reconciliation holds the storage gate from its first configuration
//! read to its last mapping write, platform calls included. Two events on the
//! same message therefore run one after the other, and the later one always
//! recomputes the tally from the platform's current reactions.

use crate::{ReconcileReport, SyncAction, normalize};
use starboard_core::{
    ChannelId, Eligibility, Emoji, GuildId, MessageContext, MessageId, PostMapping,
    RawReactionEvent, ReactionEvent, StarPost, Starboard, StarboardRules, evaluate, tally,
};
use starboard_database::Gateway;
use starboard_error::StarboardResult;
use starboard_interface::{Platform, StarboardStore};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Drives star posts from reaction events.
///
/// Cloning is cheap; clones share the gate and the platform client, so one
/// clone can be moved into each per-event task.
pub struct ReconciliationEngine<S, P> {
    gateway: Gateway<S>,
    platform: Arc<P>,
}

impl<S, P> Clone for ReconciliationEngine<S, P> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            platform: Arc::clone(&self.platform),
        }
    }
}

impl<S, P> ReconciliationEngine<S, P>
where
    S: StarboardStore,
    P: Platform,
{
    /// Create an engine over a gated store and a platform client.
    pub fn new(gateway: Gateway<S>, platform: Arc<P>) -> Self {
        Self { gateway, platform }
    }

    /// The storage gate shared with this engine.
    pub fn gateway(&self) -> &Gateway<S> {
        &self.gateway
    }

    /// Entry point for reaction add/remove notifications.
    ///
    /// Never fails: events without guild context are dropped and errors are
    /// logged for operators instead of being returned to the event source.
    #[instrument(
        skip(self, raw),
        fields(channel_id = %raw.channel_id, message_id = %raw.message_id, direction = %raw.direction)
    )]
    pub async fn handle_reaction_event(&self, raw: RawReactionEvent) {
        let Some(event) = normalize(raw) else {
            debug!("Dropping reaction without guild context");
            return;
        };

        match self.reconcile(&event).await {
            Ok(report) => log_report(&report),
            Err(e) => error!(
                guild_id = %event.guild_id,
                channel_id = %event.channel_id,
                message_id = %event.message_id,
                error = %e,
                "Reconciliation failed"
            ),
        }
    }

    /// Entry point for "all reactions removed" notifications.
    #[instrument(skip(self))]
    pub async fn handle_reactions_cleared(
        &self,
        guild_id: Option<GuildId>,
        channel_id: ChannelId,
        message_id: MessageId,
    ) {
        let Some(guild_id) = guild_id else {
            return;
        };

        match self
            .reconcile_message(guild_id, channel_id, message_id, None)
            .await
        {
            Ok(report) => log_report(&report),
            Err(e) => error!(%guild_id, %channel_id, %message_id, error = %e, "Reconciliation after reaction clear failed"),
        }
    }

    /// Entry point for "every reaction of one emoji removed" notifications.
    ///
    /// Only starboards triggered by `emoji` are reconciled.
    #[instrument(skip(self, emoji), fields(emoji = %emoji))]
    pub async fn handle_emoji_cleared(
        &self,
        guild_id: Option<GuildId>,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: Emoji,
    ) {
        let Some(guild_id) = guild_id else {
            return;
        };

        match self
            .reconcile_message(guild_id, channel_id, message_id, Some(&emoji))
            .await
        {
            Ok(report) => log_report(&report),
            Err(e) => error!(%guild_id, %channel_id, %message_id, error = %e, "Reconciliation after emoji clear failed"),
        }
    }

    /// Entry point for source message deletions.
    #[instrument(skip(self))]
    pub async fn handle_message_deleted(
        &self,
        guild_id: Option<GuildId>,
        channel_id: ChannelId,
        message_id: MessageId,
    ) {
        if guild_id.is_none() {
            return;
        }

        match self.purge_message(message_id).await {
            Ok(report) => log_report(&report),
            Err(e) => error!(%channel_id, %message_id, error = %e, "Cleanup after message deletion failed"),
        }
    }

    /// Entry point for channel deletions.
    #[instrument(skip(self))]
    pub async fn handle_channel_deleted(&self, guild_id: GuildId, channel_id: ChannelId) {
        match self.purge_channel(channel_id).await {
            Ok(removed) if removed > 0 => {
                info!(%guild_id, %channel_id, removed, "Dropped mappings of deleted channel")
            }
            Ok(_) => {}
            Err(e) => error!(%guild_id, %channel_id, error = %e, "Cleanup after channel deletion failed"),
        }
    }

    /// Reconcile every starboard triggered by `event`'s emoji.
    ///
    /// # Errors
    ///
    /// Storage failures abort the whole reconciliation. Platform failures while
    /// reading the source message abort it as well; failures while publishing
    /// only abort the affected starboard and are recorded in the report.
    pub async fn reconcile(&self, event: &ReactionEvent) -> StarboardResult<ReconcileReport> {
        self.reconcile_message(
            event.guild_id,
            event.channel_id,
            event.message_id,
            Some(&event.emoji),
        )
        .await
    }

    /// Reconcile a message against the starboards of its guild.
    ///
    /// With `emoji` set only starboards triggered by that emoji are considered;
    /// with `None` every starboard of the guild is.
    #[instrument(skip(self, emoji))]
    pub async fn reconcile_message(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: Option<&Emoji>,
    ) -> StarboardResult<ReconcileReport> {
        let mut store = self.gateway.acquire().await;
        let mut report = ReconcileReport::new(message_id);

        let starboards: Vec<Starboard> = store
            .fetch_starboards(guild_id)?
            .into_iter()
            .filter(|starboard| emoji.is_none_or(|emoji| *emoji == starboard.emoji))
            .collect();
        if starboards.is_empty() {
            return Ok(report);
        }

        let message = match self
            .platform
            .message_context(guild_id, channel_id, message_id)
            .await
        {
            Ok(message) => message,
            Err(e) if e.is_not_found() => {
                debug!(%message_id, "Source message vanished, removing its posts");
                for mapping in store.mappings_for_message(message_id)? {
                    let action = self.remove_source(&mut *store, &mapping).await?;
                    report.record(mapping.starboard_id, action);
                }
                return Ok(report);
            }
            Err(e) => return Err(e.into()),
        };

        for starboard in &starboards {
            let rules = StarboardRules {
                channels: store.fetch_channel_rules(starboard.id)?,
                roles: store.fetch_role_rules(starboard.id)?,
            };

            let action = match evaluate(starboard, &rules, &message) {
                Eligibility::Blocked(reason) => {
                    debug!(starboard_id = %starboard.id, %reason, "Message blocked");
                    SyncAction::Blocked(reason)
                }
                Eligibility::Eligible { threshold } => {
                    self.sync_post(&mut *store, starboard, &message, threshold)
                        .await?
                }
            };
            report.record(starboard.id, action);
        }

        Ok(report)
    }

    /// Bring one (starboard, message) pair in line with the live tally.
    async fn sync_post(
        &self,
        store: &mut S,
        starboard: &Starboard,
        message: &MessageContext,
        threshold: u32,
    ) -> StarboardResult<SyncAction> {
        let reactors = match self
            .platform
            .reactors(message.channel_id, message.message_id, &starboard.emoji)
            .await
        {
            Ok(reactors) => reactors,
            Err(e) => {
                warn!(starboard_id = %starboard.id, error = %e, "Could not read reactions");
                return Ok(SyncAction::Failed(e.kind.to_string()));
            }
        };

        let count = tally(starboard, message, &reactors);
        let post = StarPost {
            starboard_id: starboard.id,
            guild_id: message.guild_id,
            source_channel_id: message.channel_id,
            source_message_id: message.message_id,
            author_id: message.author_id,
            emoji: starboard.emoji.clone(),
            count,
        };

        let Some(mapping) = store.get_mapping(starboard.id, message.message_id)? else {
            if count < threshold {
                return Ok(SyncAction::Unchanged { count });
            }
            return self.create_post(store, starboard, &post).await;
        };

        if count >= threshold || starboard.locked {
            if mapping.star_count == count {
                return Ok(SyncAction::Unchanged { count });
            }
            return self.update_post(store, starboard, mapping, &post).await;
        }

        self.delete_post(store, starboard, mapping).await
    }

    async fn create_post(
        &self,
        store: &mut S,
        starboard: &Starboard,
        post: &StarPost,
    ) -> StarboardResult<SyncAction> {
        match self.platform.create_post(starboard.channel_id, post).await {
            Ok(post_id) => {
                let stored = store.put_mapping(&PostMapping {
                    starboard_id: starboard.id,
                    message_id: post.source_message_id,
                    source_channel_id: post.source_channel_id,
                    post_id,
                    star_count: post.count,
                });
                if let Err(e) = stored {
                    // An unmapped post would be published again on the next event.
                    if let Err(withdraw) = self
                        .platform
                        .delete_post(starboard.channel_id, post_id)
                        .await
                    {
                        warn!(
                            starboard_id = %starboard.id,
                            %post_id,
                            error = %withdraw,
                            "Could not withdraw unmapped star post"
                        );
                    }
                    return Err(e.into());
                }
                info!(starboard_id = %starboard.id, %post_id, count = post.count, "Created star post");
                Ok(SyncAction::Created {
                    post_id,
                    count: post.count,
                })
            }
            Err(e) if e.is_forbidden() || e.is_not_found() => {
                warn!(
                    starboard_id = %starboard.id,
                    channel_id = %starboard.channel_id,
                    error = %e,
                    "Cannot publish to starboard channel"
                );
                Ok(SyncAction::Skipped(e.kind.to_string()))
            }
            Err(e) => {
                error!(starboard_id = %starboard.id, error = %e, "Publishing star post failed");
                Ok(SyncAction::Failed(e.kind.to_string()))
            }
        }
    }

    async fn update_post(
        &self,
        store: &mut S,
        starboard: &Starboard,
        mapping: PostMapping,
        post: &StarPost,
    ) -> StarboardResult<SyncAction> {
        match self
            .platform
            .edit_post(starboard.channel_id, mapping.post_id, post)
            .await
        {
            Ok(()) => {
                let from = mapping.star_count;
                let post_id = mapping.post_id;
                store.put_mapping(&PostMapping {
                    star_count: post.count,
                    ..mapping
                })?;
                debug!(starboard_id = %starboard.id, %post_id, from, to = post.count, "Updated star post");
                Ok(SyncAction::Updated {
                    post_id,
                    from,
                    to: post.count,
                })
            }
            Err(e) if e.is_not_found() => {
                store.delete_mapping(starboard.id, mapping.message_id)?;
                info!(starboard_id = %starboard.id, post_id = %mapping.post_id, "Star post vanished, dropped mapping");
                Ok(SyncAction::StaleRemoved {
                    post_id: mapping.post_id,
                })
            }
            Err(e) => {
                warn!(starboard_id = %starboard.id, post_id = %mapping.post_id, error = %e, "Editing star post failed");
                Ok(SyncAction::Failed(e.kind.to_string()))
            }
        }
    }

    async fn delete_post(
        &self,
        store: &mut S,
        starboard: &Starboard,
        mapping: PostMapping,
    ) -> StarboardResult<SyncAction> {
        match self
            .platform
            .delete_post(starboard.channel_id, mapping.post_id)
            .await
        {
            Ok(()) => {
                store.delete_mapping(starboard.id, mapping.message_id)?;
                info!(starboard_id = %starboard.id, post_id = %mapping.post_id, "Deleted star post");
                Ok(SyncAction::Deleted {
                    post_id: mapping.post_id,
                })
            }
            Err(e) if e.is_not_found() => {
                store.delete_mapping(starboard.id, mapping.message_id)?;
                Ok(SyncAction::StaleRemoved {
                    post_id: mapping.post_id,
                })
            }
            Err(e) => {
                warn!(starboard_id = %starboard.id, post_id = %mapping.post_id, error = %e, "Deleting star post failed");
                Ok(SyncAction::Failed(e.kind.to_string()))
            }
        }
    }

    /// Drop every mapping of a deleted source message.
    ///
    /// Posts on unlocked starboards are deleted as well; posts on locked ones
    /// stay where they are.
    pub async fn purge_message(&self, message_id: MessageId) -> StarboardResult<ReconcileReport> {
        let mut store = self.gateway.acquire().await;
        let mut report = ReconcileReport::new(message_id);
        for mapping in store.mappings_for_message(message_id)? {
            let action = self.remove_source(&mut *store, &mapping).await?;
            report.record(mapping.starboard_id, action);
        }
        Ok(report)
    }

    /// Drop every mapping whose source message lived in a deleted channel.
    ///
    /// Returns how many mappings were removed.
    pub async fn purge_channel(&self, channel_id: ChannelId) -> StarboardResult<usize> {
        let mut store = self.gateway.acquire().await;
        let mappings = store.mappings_for_source_channel(channel_id)?;

        for mapping in &mappings {
            self.remove_source(&mut *store, mapping).await?;
        }
        Ok(mappings.len())
    }

    /// Drop one mapping whose source message is gone.
    ///
    /// The star post is deleted too unless its starboard is locked.
    async fn remove_source(
        &self,
        store: &mut S,
        mapping: &PostMapping,
    ) -> StarboardResult<SyncAction> {
        let starboard = store.fetch_starboard(mapping.starboard_id)?;

        let post_deleted = match starboard.filter(|starboard| !starboard.locked) {
            Some(starboard) => match self
                .platform
                .delete_post(starboard.channel_id, mapping.post_id)
                .await
            {
                Ok(()) => true,
                Err(e) if e.is_not_found() => false,
                Err(e) => {
                    warn!(post_id = %mapping.post_id, error = %e, "Could not delete orphaned star post");
                    false
                }
            },
            None => false,
        };

        store.delete_mapping(mapping.starboard_id, mapping.message_id)?;
        Ok(SyncAction::SourceRemoved {
            post_id: mapping.post_id,
            post_deleted,
        })
    }
}

fn log_report(report: &ReconcileReport) {
    if report.is_noop() {
        debug!(message_id = %report.message_id(), "Reconciled without changes");
        return;
    }
    for (starboard_id, action) in report.actions() {
        debug!(message_id = %report.message_id(), %starboard_id, %action, "Reconciled");
    }
}
