//! Statistics API integration tests

use std::sync::Arc;

use actix_web::App;
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::test::{self, TestRequest};
use base64::Engine;
use tempfile::TempDir;

use timereport::runtime::lifetime::startup::StartupContext;
use timereport::runtime::modes::server::configure_app;
use timereport::storage::{Report, SeaOrmStorage, Statistic};

async fn create_context() -> (StartupContext, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("statistics_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = Arc::new(
        SeaOrmStorage::new(&db_url, "sqlite")
            .await
            .expect("Failed to create storage"),
    );
    let ctx = StartupContext::from_storage(storage);
    ctx.account_service
        .set_password("user", "secret-password")
        .await
        .expect("Failed to create account");
    (ctx, temp_dir)
}

fn auth_header() -> (actix_web::http::header::HeaderName, String) {
    let encoded = base64::engine::general_purpose::STANDARD.encode("user:secret-password");
    (AUTHORIZATION, format!("Basic {}", encoded))
}

async fn insert(ctx: &StartupContext, arrival_ms: i64, total: i64) {
    let arrival = chrono::DateTime::from_timestamp_millis(arrival_ms).unwrap();
    ctx.storage
        .insert(&Report::new(arrival, arrival, 3600, total))
        .await
        .expect("insert");
}

#[tokio::test]
async fn test_statistics_for_week_45() {
    let (ctx, _dir) = create_context().await;
    insert(&ctx, 1_478_501_763_000, 27780).await;
    insert(&ctx, 1_478_674_513_000, 27618).await;

    let app = test::init_service(
        App::new().configure(|cfg| configure_app(cfg, &ctx, "timereport")),
    )
    .await;

    let req = TestRequest::get()
        .uri("/api/statistics")
        .insert_header(auth_header())
        .to_request();
    let stats: Vec<Statistic> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].id, 2016);
    assert_eq!(stats[0].sum, 55398);
    assert_eq!(stats[0].avg, 27699);
    assert_eq!(stats[0].shortest.time, 27618);
    assert_eq!(stats[0].shortest.date.timestamp_millis(), 1_478_674_513_000);
    assert_eq!(stats[0].longest.time, 27780);
    assert_eq!(stats[0].longest.date.timestamp_millis(), 1_478_501_763_000);
}

#[tokio::test]
async fn test_statistics_multiple_years_ordered() {
    let (ctx, _dir) = create_context().await;
    // 2017-01-02
    insert(&ctx, 1_483_344_000_000, 30000).await;
    insert(&ctx, 1_479_106_519_000, 29687).await;
    insert(&ctx, 1_479_365_724_000, 27599).await;

    let app = test::init_service(
        App::new().configure(|cfg| configure_app(cfg, &ctx, "timereport")),
    )
    .await;

    let req = TestRequest::get()
        .uri("/api/statistics")
        .insert_header(auth_header())
        .to_request();
    let stats: Vec<Statistic> = test::call_and_read_body_json(&app, req).await;

    let years: Vec<i32> = stats.iter().map(|s| s.id).collect();
    assert_eq!(years, vec![2016, 2017]);
    assert_eq!(stats[0].sum, 29687 + 27599);
    assert_eq!(stats[0].avg, (29687 + 27599) / 2);
    assert_eq!(stats[1].sum, 30000);
    assert_eq!(stats[1].avg, 30000);
}

#[tokio::test]
async fn test_statistics_empty_store() {
    let (ctx, _dir) = create_context().await;
    let app = test::init_service(
        App::new().configure(|cfg| configure_app(cfg, &ctx, "timereport")),
    )
    .await;

    let req = TestRequest::get()
        .uri("/api/statistics")
        .insert_header(auth_header())
        .to_request();
    let stats: Vec<Statistic> = test::call_and_read_body_json(&app, req).await;
    assert!(stats.is_empty());
}

#[tokio::test]
async fn test_statistics_reflect_updates() {
    let (ctx, _dir) = create_context().await;
    insert(&ctx, 1_478_501_763_000, 27780).await;
    let id = ctx.report_service.list(None, None).await.unwrap()[0]
        .id
        .clone()
        .unwrap();

    let arrival = chrono::DateTime::from_timestamp_millis(1_478_501_763_000).unwrap();
    ctx.report_service
        .update(&id, Report::new(arrival, arrival, 0, 10000))
        .await
        .unwrap();

    let stats = ctx.statistics_service.compute().await.unwrap();
    assert_eq!(stats[0].sum, 10000);
    assert_eq!(stats[0].shortest.time, 10000);
}

#[tokio::test]
async fn test_oversized_work_time_is_rejected_and_statistics_stay_available() {
    let (ctx, _dir) = create_context().await;
    insert(&ctx, 1_478_501_763_000, 27780).await;

    let app = test::init_service(
        App::new().configure(|cfg| configure_app(cfg, &ctx, "timereport")),
    )
    .await;

    let req = TestRequest::post()
        .uri("/api/timereport")
        .set_json(serde_json::json!({
            "workTime": i64::MAX,
            "lunchTime": 3600,
            "arrivalTime": 1_478_674_513_000i64,
            "leaveTime": 1_478_706_013_000i64,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = TestRequest::get()
        .uri("/api/statistics")
        .insert_header(auth_header())
        .to_request();
    let stats: Vec<Statistic> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].sum, 27780);
}

#[tokio::test]
async fn test_statistics_overflow_in_stored_data_is_server_error() {
    let (ctx, _dir) = create_context().await;
    // 直接写库，绕过 HTTP 层的范围校验
    insert(&ctx, 1_478_501_763_000, i64::MAX).await;
    insert(&ctx, 1_478_674_513_000, i64::MAX).await;

    let app = test::init_service(
        App::new().configure(|cfg| configure_app(cfg, &ctx, "timereport")),
    )
    .await;

    let req = TestRequest::get()
        .uri("/api/statistics")
        .insert_header(auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = test::read_body(resp).await;
    assert_eq!(body, "Statistics Error");
}
