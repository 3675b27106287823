//! Storage backend tests
//!
//! Tests for SeaOrmStorage using temporary SQLite databases.

use chrono::DateTime;
use tempfile::TempDir;

use timereport::storage::backend::{ReportFilter, SeaOrmStorage};
use timereport::storage::{Account, Report};

/// 创建临时 SQLite 数据库的存储实例
async fn create_temp_storage() -> (SeaOrmStorage, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");

    (storage, temp_dir)
}

fn report(arrival_ms: i64, total: i64) -> Report {
    let arrival = DateTime::from_timestamp_millis(arrival_ms).unwrap();
    let leave = DateTime::from_timestamp_millis(arrival_ms + 30_000_000).unwrap();
    Report::new(arrival, leave, 3600, total)
}

#[tokio::test]
async fn test_insert_assigns_fresh_id() {
    let (storage, _dir) = create_temp_storage().await;

    let input = report(1_478_501_763_000, 27780).with_id("client-chosen");
    let first = storage.insert(&input).await.unwrap();
    let second = storage.insert(&input).await.unwrap();

    let first_id = first.id.clone().unwrap();
    assert_ne!(first_id, "client-chosen");
    assert_ne!(first.id, second.id);
    assert_eq!(first, input);

    let fetched = storage.get(&first_id).await.unwrap().unwrap();
    assert_eq!(fetched.id.as_deref(), Some(first_id.as_str()));
    assert_eq!(fetched, input);
    assert_eq!(storage.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_get_missing_returns_none() {
    let (storage, _dir) = create_temp_storage().await;
    assert!(storage.get("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_filters() {
    let (storage, _dir) = create_temp_storage().await;
    for (arrival, total) in [
        (1_479_365_724_000, 27599),
        (1_478_501_763_000, 27780),
        (1_479_106_519_000, 29687),
        (1_478_674_513_000, 27618),
    ] {
        storage.insert(&report(arrival, total)).await.unwrap();
    }

    let all = storage.list(ReportFilter::default()).await.unwrap();
    let totals: Vec<i64> = all.iter().map(|r| r.total).collect();
    assert_eq!(totals, vec![27780, 27618, 29687, 27599]);

    let week45 = storage
        .list(ReportFilter::new(Some(2016), Some(45)))
        .await
        .unwrap();
    assert_eq!(week45.len(), 2);

    let week46 = storage.list(ReportFilter::new(None, Some(46))).await.unwrap();
    assert_eq!(week46.len(), 2);

    let other_year = storage.list(ReportFilter::new(Some(2015), None)).await.unwrap();
    assert!(other_year.is_empty());
}

#[tokio::test]
async fn test_update_recomputes_week() {
    let (storage, _dir) = create_temp_storage().await;
    let created = storage.insert(&report(1_478_501_763_000, 27780)).await.unwrap();
    let id = created.id.unwrap();

    // 移到第 46 周
    storage
        .update(&id, &report(1_479_106_519_000, 29000))
        .await
        .unwrap();

    let week45 = storage.list(ReportFilter::new(None, Some(45))).await.unwrap();
    assert!(week45.is_empty());
    let week46 = storage.list(ReportFilter::new(None, Some(46))).await.unwrap();
    assert_eq!(week46.len(), 1);
    assert_eq!(week46[0].id.as_deref(), Some(id.as_str()));
    assert_eq!(week46[0].total, 29000);
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let (storage, _dir) = create_temp_storage().await;
    let err = storage
        .update("missing", &report(1_478_501_763_000, 1))
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), actix_web::http::StatusCode::NOT_FOUND);
    assert_eq!(storage.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_all() {
    let (storage, _dir) = create_temp_storage().await;
    storage.insert(&report(1_478_501_763_000, 1)).await.unwrap();
    storage.insert(&report(1_478_674_513_000, 2)).await.unwrap();

    assert_eq!(storage.delete_all().await.unwrap(), 2);
    assert!(storage.load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_account_crud() {
    let (storage, _dir) = create_temp_storage().await;
    let created_at = DateTime::from_timestamp_millis(1_478_501_763_000).unwrap();

    let account = Account {
        username: "user".to_string(),
        password_hash: "hash-1".to_string(),
        created_at,
    };
    storage.upsert_account(&account).await.unwrap();
    storage
        .upsert_account(&Account {
            password_hash: "hash-2".to_string(),
            created_at: chrono::Utc::now(),
            ..account.clone()
        })
        .await
        .unwrap();

    let found = storage.find_account("user").await.unwrap().unwrap();
    assert_eq!(found.password_hash, "hash-2");
    assert_eq!(found.created_at, created_at);
    assert_eq!(storage.count_accounts().await.unwrap(), 1);

    assert!(storage.remove_account("user").await.unwrap());
    assert!(!storage.remove_account("user").await.unwrap());
    assert!(storage.find_account("user").await.unwrap().is_none());
}

#[tokio::test]
async fn test_reopen_keeps_data() {
    let temp_dir = TempDir::new().unwrap();
    let db_url = format!(
        "sqlite://{}?mode=rwc",
        temp_dir.path().join("reopen.db").display()
    );

    {
        let storage = SeaOrmStorage::new(&db_url, "sqlite").await.unwrap();
        storage.insert(&report(1_478_501_763_000, 27780)).await.unwrap();
        storage.close().await.unwrap();
    }

    let storage = SeaOrmStorage::new(&db_url, "sqlite").await.unwrap();
    assert_eq!(storage.count().await.unwrap(), 1);
    assert_eq!(storage.get_backend_config().storage_type, "sqlite");
}
