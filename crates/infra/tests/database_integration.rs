//! End-to-end database coverage for the entry repository and services.
//!
//! Each test runs against an isolated SQLite file with migrations applied,
//! wiring the real repository into the core services.

mod support;

use std::sync::Arc;

use chrono::Datelike;
use paytrack_common::MockClock;
use paytrack_core::{EntryRepository, EntryService, NotificationService};
use paytrack_domain::{EntryPayload, EntryStatus, NotificationKind, PaytrackError};
use paytrack_infra::database::{DbManager, SqliteEntryRepository};
use support::{date, entry, TestDatabase};
use tempfile::TempDir;

#[tokio::test(flavor = "multi_thread")]
async fn entry_service_workflow_against_sqlite() {
    let db = TestDatabase::new();
    let service = EntryService::new(Arc::new(SqliteEntryRepository::new(Arc::clone(&db.manager))));

    let payload = EntryPayload {
        client: Some("Marcos".into()),
        date: Some("2024-08-05".into()),
        product: Some("Seguro Residencial".into()),
        commission: Some(89.9),
        forecast: Some("2024-08-25".into()),
        status: Some("pendente".into()),
    };
    let created = service.create(&payload).await.unwrap();
    assert_eq!(service.get(created.id).await.unwrap(), created);

    let mut changed = payload.clone();
    changed.status = Some("concluido".into());
    let updated = service.update(created.id, &changed).await.unwrap();
    assert_eq!(updated.status, EntryStatus::Completed);
    assert_eq!(updated.created_at, created.created_at);

    assert_eq!(service.delete(created.id).await.unwrap(), 1);
    assert!(matches!(service.get(created.id).await, Err(PaytrackError::NotFound(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn batch_with_invalid_payload_leaves_store_untouched() {
    let db = TestDatabase::new();
    let service = EntryService::new(Arc::new(SqliteEntryRepository::new(Arc::clone(&db.manager))));

    let valid = EntryPayload {
        client: Some("A".into()),
        date: Some("2024-01-01".into()),
        product: Some("P".into()),
        commission: Some(1.0),
        forecast: Some("2024-01-02".into()),
        status: Some("pendente".into()),
    };
    let invalid = EntryPayload { forecast: Some("soon".into()), ..valid.clone() };

    let err = service.create_batch(&[valid.clone(), invalid]).await.unwrap_err();
    assert!(matches!(err, PaytrackError::InvalidInput(msg) if msg.starts_with("entry 1:")));
    assert!(service.list_all().await.unwrap().is_empty());

    assert_eq!(service.create_batch(&[valid.clone(), valid]).await.unwrap(), 2);
    assert_eq!(service.list_all().await.unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn month_union_reconstructs_full_listing() {
    let db = TestDatabase::new();
    let repo = SqliteEntryRepository::new(Arc::clone(&db.manager));

    let entries = (1..=12)
        .flat_map(|month| {
            [
                entry("current", date(2024, month, 3), date(2024, month, 20), 10.0),
                entry("previous", date(2023, month, 28), date(2023, month, 28), 5.0),
            ]
        })
        .collect::<Vec<_>>();
    assert_eq!(repo.create_batch(entries).await.unwrap(), 24);

    let mut union = Vec::new();
    for month in 1..=12 {
        let in_month = repo.list_by_month(month).await.unwrap();
        assert_eq!(in_month.len(), 2);
        assert!(in_month.iter().all(|e| e.date.month() == month));
        union.extend(in_month);
    }

    let mut all = repo.list_all().await.unwrap();
    union.sort_by_key(|e| e.id);
    all.sort_by_key(|e| e.id);
    assert_eq!(union, all);
}

#[tokio::test(flavor = "multi_thread")]
async fn notifications_from_sqlite_rows() {
    let db = TestDatabase::new();
    let repo = Arc::new(SqliteEntryRepository::new(Arc::clone(&db.manager)));
    repo.create_batch(vec![
        entry("yesterday", date(2024, 6, 1), date(2024, 6, 14), 10.0),
        entry("ten-days", date(2024, 6, 1), date(2024, 6, 25), 10.0),
        entry("twenty-days", date(2024, 6, 1), date(2024, 7, 5), 10.0),
    ])
    .await
    .unwrap();
    db.execute_batch("UPDATE entries SET status = 'concluido' WHERE client = 'ten-days'");

    let clock = MockClock::new(date(2024, 6, 15));
    let service = NotificationService::new(repo, Arc::new(clock.clone()), 15);

    let notifications = service.notifications().await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].client, "yesterday");
    assert_eq!(notifications[0].days_left, -1);
    assert_eq!(notifications[0].kind, NotificationKind::Overdue);

    clock.advance_days(5);
    let clients: Vec<String> =
        service.notifications().await.unwrap().into_iter().map(|n| n.client).collect();
    assert_eq!(clients, vec!["yesterday".to_string(), "twenty-days".to_string()]);
}

const LEGACY_ENTRIES_TABLE: &str = "
    CREATE TABLE entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        client TEXT NOT NULL,
        date TEXT NOT NULL,
        product TEXT NOT NULL,
        commission REAL NOT NULL,
        forecast TEXT NOT NULL,
        status TEXT NOT NULL,
        created_at TEXT DEFAULT CURRENT_TIMESTAMP
    );
    INSERT INTO entries (client, date, product, commission, forecast, status)
    VALUES ('legacy', '2022-11-30', 'Plano', 42, '2022-12-15', 'concluido');
";

#[tokio::test(flavor = "multi_thread")]
async fn existing_database_without_constraints_is_migrated_in_place() {
    let temp_dir = TempDir::new().expect("temp dir should be created");
    let db_path = temp_dir.path().join("database.sqlite");
    rusqlite::Connection::open(&db_path)
        .and_then(|conn| conn.execute_batch(LEGACY_ENTRIES_TABLE))
        .expect("legacy table should be created");

    let manager = DbManager::new(&db_path, 2).expect("db manager should open legacy file");
    manager.run_migrations().expect("migrations should tolerate the existing table");
    let repo = SqliteEntryRepository::new(Arc::new(manager));

    let rows = repo.list_all().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].client, "legacy");
    assert_eq!(rows[0].status, EntryStatus::Completed);
    assert_eq!(rows[0].commission, 42.0);
    assert_eq!(rows[0].forecast, date(2022, 12, 15));

    let created =
        repo.create(entry("new", date(2024, 1, 2), date(2024, 1, 9), 10.0)).await.unwrap();
    assert_eq!(created.id, rows[0].id + 1);
    assert_eq!(repo.list_all().await.unwrap().len(), 2);
}
