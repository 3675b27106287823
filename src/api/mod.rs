//! HTTP API
//!
//! `/api/timereport` 与 `/api/statistics` 两组路由，统一挂在 Basic 认证之后。

pub mod middleware;
pub mod services;

use actix_web::{HttpRequest, error, web};

use crate::errors::TimeReportError;
use middleware::BasicAuth;

/// 请求体上限
pub const MAX_PAYLOAD_BYTES: usize = 64 * 1024;

/// JSON 解析失败返回 400 纯文本
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_PAYLOAD_BYTES)
        .error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
            TimeReportError::validation(format!("Invalid JSON body: {}", err)).into()
        })
}

/// 查询参数解析失败返回 400 纯文本
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: error::QueryPayloadError, _req: &HttpRequest| {
        TimeReportError::validation(format!("Invalid query string: {}", err)).into()
    })
}

/// 注册 `/api` 作用域
///
/// 调用方需要通过 app_data 提供 `ReportService` 与 `StatisticsService`。
pub fn configure_routes(cfg: &mut web::ServiceConfig, auth: BasicAuth) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(
            web::scope("/api")
                .wrap(auth)
                .service(services::timereport_routes())
                .service(services::statistics_routes()),
        );
}
