//! PostgreSQL implementation of [`StarboardStore`].

use crate::models::{
    ChannelRuleRow, NewGuildRow, NewPostMappingRow, NewStarboardRow, PostMappingRow, RoleRuleRow,
    StarboardRow,
};
use crate::schema::{channel_rules, guilds, post_mappings, role_rules, starboards};
use crate::{DatabaseResult, establish_connection, run_blocking, run_migrations};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use starboard_core::{
    ChannelId, ChannelRule, GuildId, MessageId, PostMapping, RoleId, RoleRule, Starboard,
    StarboardId,
};
use starboard_error::DatabaseError;
use starboard_interface::{NewStarboard, StarboardStore};
use tracing::instrument;

/// Storage backed by one PostgreSQL connection.
///
/// Every operation runs inside its own transaction, through [`run_blocking`]
/// so the round trip never stalls the async worker it was issued from. The
/// connection is meant to be owned by a [`Gateway`](crate::Gateway), which
/// provides the process-wide serialisation.
pub struct PgStarboardStore {
    conn: PgConnection,
}

impl PgStarboardStore {
    /// Wrap an existing connection.
    pub fn new(conn: PgConnection) -> Self {
        Self { conn }
    }

    /// Connect to `database_url`.
    pub fn connect(database_url: &str) -> DatabaseResult<Self> {
        establish_connection(database_url).map(Self::new)
    }

    /// Apply pending schema migrations on this connection.
    pub fn migrate(&mut self) -> DatabaseResult<usize> {
        run_migrations(&mut self.conn)
    }

    fn transaction<T, F>(&mut self, f: F) -> DatabaseResult<T>
    where
        F: FnOnce(&mut PgConnection) -> QueryResult<T>,
    {
        let conn = &mut self.conn;
        run_blocking(|| conn.transaction::<T, diesel::result::Error, _>(f))
            .map_err(DatabaseError::from)
    }
}

impl StarboardStore for PgStarboardStore {
    #[instrument(skip(self))]
    fn fetch_starboards(&mut self, guild_id: GuildId) -> DatabaseResult<Vec<Starboard>> {
        let rows = self.transaction(|conn| {
            starboards::table
                .filter(starboards::guild_id.eq(guild_id.to_db()))
                .order(starboards::id.asc())
                .select(StarboardRow::as_select())
                .load(conn)
        })?;
        Ok(rows.into_iter().map(Starboard::from).collect())
    }

    #[instrument(skip(self))]
    fn fetch_starboard(&mut self, id: StarboardId) -> DatabaseResult<Option<Starboard>> {
        let row = self.transaction(|conn| {
            starboards::table
                .find(id.to_db())
                .select(StarboardRow::as_select())
                .first(conn)
                .optional()
        })?;
        Ok(row.map(Starboard::from))
    }

    #[instrument(skip(self))]
    fn starboard_for_channel(&mut self, channel_id: ChannelId) -> DatabaseResult<Option<Starboard>> {
        let row = self.transaction(|conn| {
            starboards::table
                .filter(starboards::channel_id.eq(channel_id.to_db()))
                .select(StarboardRow::as_select())
                .first(conn)
                .optional()
        })?;
        Ok(row.map(Starboard::from))
    }

    #[instrument(skip(self))]
    fn fetch_channel_rules(&mut self, starboard_id: StarboardId) -> DatabaseResult<Vec<ChannelRule>> {
        let rows = self.transaction(|conn| {
            channel_rules::table
                .filter(channel_rules::starboard_id.eq(starboard_id.to_db()))
                .select(ChannelRuleRow::as_select())
                .load(conn)
        })?;
        Ok(rows.into_iter().map(ChannelRule::from).collect())
    }

    #[instrument(skip(self))]
    fn fetch_role_rules(&mut self, starboard_id: StarboardId) -> DatabaseResult<Vec<RoleRule>> {
        let rows = self.transaction(|conn| {
            role_rules::table
                .filter(role_rules::starboard_id.eq(starboard_id.to_db()))
                .select(RoleRuleRow::as_select())
                .load(conn)
        })?;
        Ok(rows.into_iter().map(RoleRule::from).collect())
    }

    #[instrument(skip(self))]
    fn get_mapping(
        &mut self,
        starboard_id: StarboardId,
        message_id: MessageId,
    ) -> DatabaseResult<Option<PostMapping>> {
        let row = self.transaction(|conn| {
            post_mappings::table
                .find((starboard_id.to_db(), message_id.to_db()))
                .select(PostMappingRow::as_select())
                .first(conn)
                .optional()
        })?;
        Ok(row.map(PostMapping::from))
    }

    #[instrument(skip(self), fields(starboard_id = %mapping.starboard_id, message_id = %mapping.message_id))]
    fn put_mapping(&mut self, mapping: &PostMapping) -> DatabaseResult<()> {
        let row = NewPostMappingRow::from(mapping);
        self.transaction(|conn| {
            diesel::insert_into(post_mappings::table)
                .values(&row)
                .on_conflict((post_mappings::starboard_id, post_mappings::message_id))
                .do_update()
                .set((
                    post_mappings::post_id.eq(row.post_id),
                    post_mappings::source_channel_id.eq(row.source_channel_id),
                    post_mappings::star_count.eq(row.star_count),
                    post_mappings::updated_at.eq(diesel::dsl::now),
                ))
                .execute(conn)
        })?;
        Ok(())
    }

    #[instrument(skip(self))]
    fn delete_mapping(
        &mut self,
        starboard_id: StarboardId,
        message_id: MessageId,
    ) -> DatabaseResult<bool> {
        let deleted = self.transaction(|conn| {
            diesel::delete(post_mappings::table.find((starboard_id.to_db(), message_id.to_db())))
                .execute(conn)
        })?;
        Ok(deleted > 0)
    }

    #[instrument(skip(self))]
    fn mappings_for_message(&mut self, message_id: MessageId) -> DatabaseResult<Vec<PostMapping>> {
        let rows = self.transaction(|conn| {
            post_mappings::table
                .filter(post_mappings::message_id.eq(message_id.to_db()))
                .select(PostMappingRow::as_select())
                .load(conn)
        })?;
        Ok(rows.into_iter().map(PostMapping::from).collect())
    }

    #[instrument(skip(self))]
    fn mappings_for_source_channel(
        &mut self,
        channel_id: ChannelId,
    ) -> DatabaseResult<Vec<PostMapping>> {
        let rows = self.transaction(|conn| {
            post_mappings::table
                .filter(post_mappings::source_channel_id.eq(channel_id.to_db()))
                .select(PostMappingRow::as_select())
                .load(conn)
        })?;
        Ok(rows.into_iter().map(PostMapping::from).collect())
    }

    #[instrument(skip(self))]
    fn ensure_guild(&mut self, guild_id: GuildId) -> DatabaseResult<()> {
        self.transaction(|conn| {
            diesel::insert_into(guilds::table)
                .values(NewGuildRow {
                    id: guild_id.to_db(),
                })
                .on_conflict_do_nothing()
                .execute(conn)
        })?;
        Ok(())
    }

    #[instrument(skip(self), fields(guild_id = %starboard.guild_id, channel_id = %starboard.channel_id))]
    fn insert_starboard(&mut self, starboard: &NewStarboard) -> DatabaseResult<Starboard> {
        let row = NewStarboardRow::from(starboard);
        let stored = self.transaction(|conn| {
            diesel::insert_into(starboards::table)
                .values(&row)
                .returning(StarboardRow::as_returning())
                .get_result(conn)
        })?;
        Ok(Starboard::from(stored))
    }

    #[instrument(skip(self), fields(starboard_id = %starboard.id))]
    fn update_starboard(&mut self, starboard: &Starboard) -> DatabaseResult<()> {
        let emoji = starboard.emoji.to_string();
        let threshold = i32::try_from(starboard.threshold).unwrap_or(i32::MAX);
        self.transaction(|conn| {
            diesel::update(starboards::table.find(starboard.id.to_db()))
                .set((
                    starboards::emoji.eq(&emoji),
                    starboards::threshold.eq(threshold),
                    starboards::self_star.eq(starboard.self_star),
                    starboards::bot_messages.eq(starboard.bot_messages),
                    starboards::locked.eq(starboard.locked),
                ))
                .execute(conn)
        })?;
        Ok(())
    }

    #[instrument(skip(self))]
    fn delete_starboard(&mut self, id: StarboardId) -> DatabaseResult<bool> {
        // Rules and mappings go with it through ON DELETE CASCADE.
        let deleted = self.transaction(|conn| {
            diesel::delete(starboards::table.find(id.to_db())).execute(conn)
        })?;
        Ok(deleted > 0)
    }

    #[instrument(skip(self), fields(starboard_id = %rule.starboard_id, channel_id = %rule.channel_id))]
    fn upsert_channel_rule(&mut self, rule: &ChannelRule) -> DatabaseResult<()> {
        let row = ChannelRuleRow::from(rule);
        self.transaction(|conn| {
            diesel::insert_into(channel_rules::table)
                .values(&row)
                .on_conflict((channel_rules::starboard_id, channel_rules::channel_id))
                .do_update()
                .set(channel_rules::is_whitelist.eq(row.is_whitelist))
                .execute(conn)
        })?;
        Ok(())
    }

    #[instrument(skip(self))]
    fn delete_channel_rule(
        &mut self,
        starboard_id: StarboardId,
        channel_id: ChannelId,
    ) -> DatabaseResult<bool> {
        let deleted = self.transaction(|conn| {
            diesel::delete(channel_rules::table.find((starboard_id.to_db(), channel_id.to_db())))
                .execute(conn)
        })?;
        Ok(deleted > 0)
    }

    #[instrument(skip(self), fields(starboard_id = %rule.starboard_id, role_id = %rule.role_id))]
    fn upsert_role_rule(&mut self, rule: &RoleRule) -> DatabaseResult<()> {
        let row = RoleRuleRow::from(rule);
        self.transaction(|conn| {
            diesel::insert_into(role_rules::table)
                .values(&row)
                .on_conflict((role_rules::starboard_id, role_rules::role_id))
                .do_update()
                .set(role_rules::is_whitelist.eq(row.is_whitelist))
                .execute(conn)
        })?;
        Ok(())
    }

    #[instrument(skip(self))]
    fn delete_role_rule(&mut self, starboard_id: StarboardId, role_id: RoleId) -> DatabaseResult<bool> {
        let deleted = self.transaction(|conn| {
            diesel::delete(role_rules::table.find((starboard_id.to_db(), role_id.to_db())))
                .execute(conn)
        })?;
        Ok(deleted > 0)
    }
}
