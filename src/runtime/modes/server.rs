//! Server mode
//!
//! 组装 actix-web 应用并启动 HTTP 服务。

use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    http::{Method, header},
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::api::{
    self,
    middleware::{BasicAuth, CredentialVerifier, RequestIdMiddleware, TimingMiddleware},
};
use crate::config::{CorsConfig, get_config};
use crate::runtime::lifetime::{self, startup::StartupContext};

/// 工作线程上限
const MAX_WORKERS: usize = 32;

/// 注册共享服务与 `/api` 路由
///
/// 服务模式和集成测试共用这一份装配逻辑。
pub fn configure_app(cfg: &mut web::ServiceConfig, ctx: &StartupContext, realm: &str) {
    let verifier: Arc<dyn CredentialVerifier> = Arc::new(ctx.account_service.clone());

    cfg.app_data(web::Data::new(ctx.report_service.clone()))
        .app_data(web::Data::new(ctx.statistics_service.clone()));
    api::configure_routes(cfg, BasicAuth::new(realm, verifier));
}

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(cors: &CorsConfig) {
    if cors.enabled && cors.allowed_origins.is_empty() {
        warn!(
            "CORS enabled but allowed_origins is empty. \
             No cross-origin requests will be allowed. \
             Set allowed_origins explicitly or use '[\"*\"]' for any origin."
        );
    }
}

/// Build CORS middleware from configuration
fn build_cors_middleware(cors: &CorsConfig) -> Cors {
    // 未启用时保持同源策略
    if !cors.enabled {
        return Cors::default();
    }

    let mut middleware = Cors::default()
        .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::LOCATION, header::HeaderName::from_static("x-request-id")])
        .max_age(cors.max_age as usize);

    if cors.allowed_origins.iter().any(|o| o == "*") {
        middleware = middleware.allow_any_origin();
    } else {
        for origin in &cors.allowed_origins {
            middleware = middleware.allowed_origin(origin);
        }
    }

    middleware
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup()
        .await
        .inspect_err(|e| error!("Server startup failed: {:#}", e))?;
    let startup = Arc::new(startup);

    let config = get_config();
    let realm = config.auth.realm.clone();
    let cors_config = config.cors.clone();
    validate_cors_config(&cors_config);

    let workers = config.server.cpu_count.clamp(1, MAX_WORKERS);
    info!("Using {} worker threads", workers);

    let storage_for_shutdown = startup.storage.clone();
    let app_context = startup.clone();

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(build_cors_middleware(&cors_config))
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add((header::CACHE_CONTROL, "no-cache, no-store")))
            .configure(|cfg| configure_app(cfg, &app_context, &realm))
    })
    .keep_alive(Duration::from_secs(30))
    .client_request_timeout(Duration::from_secs(5))
    .workers(workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    warn!("Starting server at http://{}", bind_address);

    tokio::select! {
        res = server => {
            res.context("HTTP server terminated with an error")?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(storage_for_shutdown) => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
