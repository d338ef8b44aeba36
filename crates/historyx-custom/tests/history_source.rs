use historyx_api::{
    EntrySource, HistorySource, HistoryStatistics, PunishmentEntry, PunishmentType, Removal,
    sort_newest_first,
};
use historyx_custom::{
    CustomHistory, CustomHistoryConfig, CustomPunishment, HistoryStorageType, PunishmentStore,
};
use tempfile::TempDir;
use uuid::Uuid;

const NOW: i64 = 1_700_000_000_000;
const HOUR: i64 = 3_600_000;

fn file_config(dir: &TempDir) -> CustomHistoryConfig {
    CustomHistoryConfig {
        storage_type: HistoryStorageType::File,
        file_path: Some(dir.path().join("history.json").to_string_lossy().to_string()),
        source: EntrySource::Custom,
    }
}

fn punishment(id: i64, player: &Uuid, kind: &str, time: i64, until: i64) -> CustomPunishment {
    let mut punishment = CustomPunishment::new(id, kind, time, until);
    punishment.uuid = Some(player.to_string());
    punishment.banned_by_name = Some("Moderator".to_string());
    punishment.server_scope = "*".to_string();
    punishment.server_origin = "lobby".to_string();
    punishment
}

#[tokio::test]
async fn test_file_history_end_to_end() {
    let dir = TempDir::new().unwrap();
    let player = Uuid::new_v4();

    let history = CustomHistory::new(&file_config(&dir)).await.unwrap();
    history
        .add_punishment(punishment(1, &player, "ban", NOW - 48 * HOUR, 0))
        .await
        .unwrap();
    history
        .add_punishment(punishment(2, &player, "mute", NOW - 2 * HOUR, NOW + HOUR))
        .await
        .unwrap();
    history
        .add_punishment(punishment(3, &player, "warn", NOW - HOUR, NOW - 1))
        .await
        .unwrap();
    history
        .record_removal(
            1,
            Removal::new(
                Some(Uuid::new_v4().to_string()),
                Some("Admin".to_string()),
                Some("Appeal".to_string()),
            ),
        )
        .await
        .unwrap();
    drop(history);

    let reopened = CustomHistory::new(&file_config(&dir)).await.unwrap();
    let mut entries = reopened.get_history(&player).await.unwrap();
    assert_eq!(entries.len(), 3);

    sort_newest_first(&mut entries);
    let ids: Vec<i64> = entries.iter().map(PunishmentEntry::id).collect();
    assert_eq!(ids, vec![3, 2, 1]);

    let ban = &entries[2];
    assert_eq!(ban.punishment_type(), &PunishmentType::Ban);
    assert!(ban.is_permanent());
    assert!(ban.was_removed());
    assert_eq!(ban.removal_reason(), Some("Appeal"));
    assert_eq!(ban.duration_label(), "Permanent");

    let mute = &entries[1];
    assert_eq!(mute.duration_label(), "3h");
    assert_eq!(mute.remaining_label_at(NOW), "1h");
    assert_eq!(mute.remaining_digital_label_at(NOW), "00:01:00:00");
    assert!(mute.is_in_effect_at(NOW));

    let stats = HistoryStatistics::collect(&entries, NOW);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.removed, 1);
    assert_eq!(stats.permanent, 1);
    assert_eq!(stats.expired, 1);
}

#[tokio::test]
async fn test_history_source_as_trait_object() {
    let config = CustomHistoryConfig {
        storage_type: HistoryStorageType::Memory,
        file_path: None,
        source: EntrySource::LiteBans,
    };
    let history = CustomHistory::new(&config).await.unwrap();
    let player = Uuid::new_v4();

    let mut lapsed = punishment(7, &player, "ban", NOW - 2 * HOUR, NOW - HOUR);
    // LiteBans leaves the active flag set after natural expiry
    lapsed.active = true;
    history.add_punishment(lapsed).await.unwrap();

    let source: &dyn HistorySource<CustomPunishment> = &history;
    let entries = source.get_history(&player).await.unwrap();

    assert_eq!(entries.len(), 1);
    assert!(entries[0].raw_active());
    assert!(!entries[0].is_currently_active_at(NOW));
    assert!(!entries[0].was_removed());
}

#[tokio::test]
async fn test_create_entry_uses_explicit_source() {
    let config = CustomHistoryConfig {
        storage_type: HistoryStorageType::Memory,
        file_path: None,
        source: EntrySource::Custom,
    };
    let history = CustomHistory::new(&config).await.unwrap();

    let mut record = punishment(9, &Uuid::new_v4(), "ban", NOW, NOW + HOUR);
    record.active = false;
    record.expired = true;

    let advanced = history
        .create_entry(&record, EntrySource::AdvancedBans)
        .unwrap();
    assert_eq!(advanced.source(), EntrySource::AdvancedBans);
    assert!(!advanced.was_removed());

    let untargeted = CustomPunishment::new(10, "kick", NOW, 0);
    assert!(history.create_entry(&untargeted, EntrySource::Custom).is_err());
}
