//! Contract tests for the storage implementations.

use diesel::Connection;
use starboard_core::{
    ChannelId, ChannelRule, Emoji, GuildId, MessageId, PostMapping, RoleId, RoleRule, StarboardId,
};
use starboard_database::{InMemoryStarboardStore, PgStarboardStore, establish_connection, run_migrations};
use starboard_error::DatabaseErrorKind;
use starboard_interface::{NewStarboard, StarboardStore};

fn new_board(guild: u64, channel: u64) -> NewStarboard {
    NewStarboard {
        guild_id: GuildId(guild),
        channel_id: ChannelId(channel),
        emoji: Emoji::Unicode("⭐".into()),
        threshold: 3,
        self_star: false,
        bot_messages: false,
        locked: false,
    }
}

fn mapping(starboard: StarboardId, message: u64, count: u32) -> PostMapping {
    PostMapping {
        starboard_id: starboard,
        message_id: MessageId(message),
        source_channel_id: ChannelId(50),
        post_id: MessageId(message + 1000),
        star_count: count,
    }
}

/// Exercises the contract every store must honour.
fn exercise_contract<S: StarboardStore>(store: &mut S, guild: u64, channel: u64) {
    store.ensure_guild(GuildId(guild)).unwrap();
    store.ensure_guild(GuildId(guild)).unwrap();

    let board = store.insert_starboard(&new_board(guild, channel)).unwrap();
    assert_eq!(board.threshold, 3);

    let duplicate = store.insert_starboard(&new_board(guild, channel)).unwrap_err();
    assert!(matches!(duplicate.kind, DatabaseErrorKind::Constraint(_)));

    let boards = store.fetch_starboards(GuildId(guild)).unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(
        store.starboard_for_channel(ChannelId(channel)).unwrap(),
        Some(board.clone())
    );

    // Upserting the same subject switches its list instead of duplicating it.
    let mut rule = ChannelRule {
        starboard_id: board.id,
        channel_id: ChannelId(7),
        is_whitelist: true,
    };
    store.upsert_channel_rule(&rule).unwrap();
    rule.is_whitelist = false;
    store.upsert_channel_rule(&rule).unwrap();
    assert_eq!(store.fetch_channel_rules(board.id).unwrap(), vec![rule]);

    store
        .upsert_role_rule(&RoleRule {
            starboard_id: board.id,
            role_id: RoleId(8),
            is_whitelist: true,
        })
        .unwrap();
    assert_eq!(store.fetch_role_rules(board.id).unwrap().len(), 1);
    assert!(store.delete_role_rule(board.id, RoleId(8)).unwrap());
    assert!(!store.delete_role_rule(board.id, RoleId(8)).unwrap());

    store.put_mapping(&mapping(board.id, 1, 3)).unwrap();
    store.put_mapping(&mapping(board.id, 1, 4)).unwrap();
    let stored = store.get_mapping(board.id, MessageId(1)).unwrap().unwrap();
    assert_eq!(stored.star_count, 4);
    assert_eq!(store.mappings_for_message(MessageId(1)).unwrap().len(), 1);
    assert_eq!(
        store.mappings_for_source_channel(ChannelId(50)).unwrap().len(),
        1
    );

    let mut updated = board.clone();
    updated.locked = true;
    updated.threshold = 5;
    store.update_starboard(&updated).unwrap();
    assert_eq!(store.fetch_starboard(board.id).unwrap(), Some(updated));

    assert!(store.delete_starboard(board.id).unwrap());
    assert!(store.get_mapping(board.id, MessageId(1)).unwrap().is_none());
    assert!(store.fetch_channel_rules(board.id).unwrap().is_empty());
    assert!(store.fetch_starboards(GuildId(guild)).unwrap().is_empty());
}

#[test]
fn test_in_memory_store_contract() {
    let mut store = InMemoryStarboardStore::new();
    exercise_contract(&mut store, 1, 2);
    assert_eq!(store.mapping_count(), 0);
}

#[test]
fn test_in_memory_rejects_starboard_without_guild() {
    let mut store = InMemoryStarboardStore::new();
    let err = store.insert_starboard(&new_board(1, 2)).unwrap_err();
    assert!(matches!(err.kind, DatabaseErrorKind::Constraint(_)));
}

#[test]
fn test_in_memory_write_failures() {
    let mut store = InMemoryStarboardStore::new();
    store.ensure_guild(GuildId(1)).unwrap();
    let board = store.insert_starboard(&new_board(1, 2)).unwrap();

    store.set_fail_writes(true);
    let err = store.put_mapping(&mapping(board.id, 9, 3)).unwrap_err();
    assert!(matches!(err.kind, DatabaseErrorKind::Query(_)));
    assert_eq!(store.mapping_count(), 0);
}

/// Runs the same contract against PostgreSQL when `DATABASE_URL` is set.
#[test]
fn test_postgres_store_contract() {
    let _ = dotenvy::dotenv();
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping PostgreSQL contract test");
        return;
    };

    let mut conn = establish_connection(&url).unwrap();
    run_migrations(&mut conn).unwrap();
    conn.begin_test_transaction().unwrap();

    let mut store = PgStarboardStore::new(conn);
    exercise_contract(&mut store, 0xFFFF_FFFF_FFFF_FF01, 0xFFFF_FFFF_FFFF_FF02);
}
