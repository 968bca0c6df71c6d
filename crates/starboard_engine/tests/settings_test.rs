//! Administrative configuration edits.

mod test_utils;

use starboard_core::{ChannelId, Emoji, GuildId, RoleId, StarboardId};
use starboard_database::{Gateway, InMemoryStarboardStore};
use starboard_engine::{Settings, StarboardUpdateBuilder};
use starboard_error::{SettingsErrorKind, StarboardError, StarboardErrorKind};
use test_utils::{GUILD, SOURCE_CHANNEL, STAR_CHANNEL, star};

fn settings() -> Settings<InMemoryStarboardStore> {
    Settings::new(Gateway::new(InMemoryStarboardStore::new()))
}

fn settings_kind(err: &StarboardError) -> &SettingsErrorKind {
    match err.kind() {
        StarboardErrorKind::Settings(e) => &e.kind,
        other => panic!("expected a settings error, got {other}"),
    }
}

#[tokio::test]
async fn test_create_starboard_uses_safe_defaults() {
    let settings = settings();

    let starboard = settings
        .create_starboard(GUILD, STAR_CHANNEL, star(), 3)
        .await
        .unwrap();

    assert_eq!(starboard.guild_id, GUILD);
    assert_eq!(starboard.channel_id, STAR_CHANNEL);
    assert_eq!(starboard.threshold, 3);
    assert!(!starboard.self_star);
    assert!(!starboard.bot_messages);
    assert!(!starboard.locked);
    assert_eq!(settings.starboards(GUILD).await.unwrap(), vec![starboard]);
}

#[tokio::test]
async fn test_one_starboard_per_channel() {
    let settings = settings();
    settings
        .create_starboard(GUILD, STAR_CHANNEL, star(), 3)
        .await
        .unwrap();

    let err = settings
        .create_starboard(GUILD, STAR_CHANNEL, Emoji::Unicode("🔥".into()), 1)
        .await
        .unwrap_err();

    assert_eq!(
        settings_kind(&err),
        &SettingsErrorKind::DuplicateStarboard(STAR_CHANNEL.get())
    );
}

#[tokio::test]
async fn test_zero_threshold_is_rejected() {
    let settings = settings();

    let err = settings
        .create_starboard(GUILD, STAR_CHANNEL, star(), 0)
        .await
        .unwrap_err();
    assert_eq!(settings_kind(&err), &SettingsErrorKind::InvalidThreshold(0));

    let starboard = settings
        .create_starboard(GUILD, STAR_CHANNEL, star(), 1)
        .await
        .unwrap();
    let err = settings
        .update_starboard(
            starboard.id,
            StarboardUpdateBuilder::default()
                .threshold(0u32)
                .build()
                .unwrap(),
        )
        .await
        .unwrap_err();
    assert_eq!(settings_kind(&err), &SettingsErrorKind::InvalidThreshold(0));
}

#[tokio::test]
async fn test_update_changes_only_given_fields() {
    let settings = settings();
    let starboard = settings
        .create_starboard(GUILD, STAR_CHANNEL, star(), 3)
        .await
        .unwrap();

    let updated = settings
        .update_starboard(
            starboard.id,
            StarboardUpdateBuilder::default()
                .emoji(Emoji::Unicode("🔥".into()))
                .bot_messages(true)
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(updated.emoji, Emoji::Unicode("🔥".into()));
    assert!(updated.bot_messages);
    assert_eq!(updated.threshold, 3);
    assert_eq!(settings.starboards(GUILD).await.unwrap(), vec![updated]);
}

#[tokio::test]
async fn test_unknown_starboard_is_reported() {
    let settings = settings();

    let err = settings
        .update_starboard(StarboardId(42), Default::default())
        .await
        .unwrap_err();
    assert_eq!(settings_kind(&err), &SettingsErrorKind::UnknownStarboard(42));

    let err = settings.delete_starboard(StarboardId(42)).await.unwrap_err();
    assert_eq!(settings_kind(&err), &SettingsErrorKind::UnknownStarboard(42));

    let err = settings
        .add_role_rule(StarboardId(42), RoleId(1), true)
        .await
        .unwrap_err();
    assert_eq!(settings_kind(&err), &SettingsErrorKind::UnknownStarboard(42));
}

#[tokio::test]
async fn test_delete_starboard_frees_channel() {
    let settings = settings();
    let starboard = settings
        .create_starboard(GUILD, STAR_CHANNEL, star(), 3)
        .await
        .unwrap();

    settings.delete_starboard(starboard.id).await.unwrap();

    assert!(settings.starboards(GUILD).await.unwrap().is_empty());
    settings
        .create_starboard(GUILD, STAR_CHANNEL, star(), 3)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_rule_moves_between_lists() {
    let settings = settings();
    let starboard = settings
        .create_starboard(GUILD, STAR_CHANNEL, star(), 3)
        .await
        .unwrap();

    settings
        .add_channel_rule(starboard.id, SOURCE_CHANNEL, true)
        .await
        .unwrap();
    settings
        .add_channel_rule(starboard.id, SOURCE_CHANNEL, false)
        .await
        .unwrap();
    settings
        .add_role_rule(starboard.id, RoleId(7), true)
        .await
        .unwrap();

    let summaries = settings.rule_summaries(GUILD).await.unwrap();
    assert_eq!(summaries.len(), 1);
    let summary = &summaries[0];
    assert!(summary.channel_whitelist.is_empty());
    assert_eq!(summary.channel_blacklist, vec![SOURCE_CHANNEL]);
    assert!(!summary.channels_default_deny);
    assert_eq!(summary.role_whitelist, vec![RoleId(7)]);
    assert!(summary.roles_default_deny);
}

#[tokio::test]
async fn test_removing_missing_rule_fails() {
    let settings = settings();
    let starboard = settings
        .create_starboard(GUILD, STAR_CHANNEL, star(), 3)
        .await
        .unwrap();
    settings
        .add_channel_rule(starboard.id, SOURCE_CHANNEL, true)
        .await
        .unwrap();

    settings
        .remove_channel_rule(starboard.id, SOURCE_CHANNEL)
        .await
        .unwrap();
    let err = settings
        .remove_channel_rule(starboard.id, SOURCE_CHANNEL)
        .await
        .unwrap_err();

    assert_eq!(
        settings_kind(&err),
        &SettingsErrorKind::RuleNotFound {
            subject: "channel",
            id: SOURCE_CHANNEL.get(),
            starboard: starboard.id.get(),
        }
    );

    let err = settings
        .remove_role_rule(starboard.id, RoleId(3))
        .await
        .unwrap_err();
    assert!(matches!(
        settings_kind(&err),
        SettingsErrorKind::RuleNotFound { subject: "role", .. }
    ));
}

#[tokio::test]
async fn test_clean_rules_drops_dead_subjects() {
    let settings = settings();
    let starboard = settings
        .create_starboard(GUILD, STAR_CHANNEL, star(), 3)
        .await
        .unwrap();
    for channel in [SOURCE_CHANNEL, ChannelId(30), ChannelId(31)] {
        settings
            .add_channel_rule(starboard.id, channel, false)
            .await
            .unwrap();
    }
    for role in [RoleId(1), RoleId(2)] {
        settings.add_role_rule(starboard.id, role, true).await.unwrap();
    }

    let removed = settings
        .clean_rules(GUILD, &[SOURCE_CHANNEL, STAR_CHANNEL], &[RoleId(2)])
        .await
        .unwrap();

    assert_eq!(removed, 3);
    let summary = &settings.rule_summaries(GUILD).await.unwrap()[0];
    assert_eq!(summary.channel_blacklist, vec![SOURCE_CHANNEL]);
    assert_eq!(summary.role_whitelist, vec![RoleId(2)]);
}

#[tokio::test]
async fn test_guilds_are_isolated() {
    let settings = settings();
    settings
        .create_starboard(GUILD, STAR_CHANNEL, star(), 3)
        .await
        .unwrap();

    assert!(settings.starboards(GuildId(2)).await.unwrap().is_empty());
    assert!(settings.rule_summaries(GuildId(2)).await.unwrap().is_empty());
}
