//! `/api/timereport` 路由

use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use tracing::{info, trace};

use crate::errors::TimeReportError;
use crate::services::ReportService;
use crate::storage::{ClientReport, Report};

/// 列表过滤参数，0 或负数等同于未设置
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub year: Option<i32>,
    pub week: Option<i32>,
}

/// 新建资源的绝对地址
fn location_for(req: &HttpRequest, id: &str) -> String {
    let conn = req.connection_info();
    format!("{}://{}/api/timereport/{}", conn.scheme(), conn.host(), id)
}

/// GET /api/timereport?year=&week=
pub async fn list_reports(
    query: web::Query<ListQuery>,
    service: web::Data<ReportService>,
) -> Result<HttpResponse, TimeReportError> {
    trace!("Listing reports: {:?}", query);
    let reports = service.list(query.year, query.week).await?;
    Ok(HttpResponse::Ok().json(reports))
}

/// GET /api/timereport/{id}
pub async fn get_report(
    path: web::Path<String>,
    service: web::Data<ReportService>,
) -> Result<HttpResponse, TimeReportError> {
    let report = service.get(&path).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// POST /api/timereport
pub async fn create_report(
    req: HttpRequest,
    body: web::Json<ClientReport>,
    service: web::Data<ReportService>,
) -> Result<HttpResponse, TimeReportError> {
    let created = service.create(body.into_inner()).await?;
    let id = created.id.unwrap_or_default();

    info!("Created report {} (total {}s)", id, created.total);
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, location_for(&req, &id)))
        .finish())
}

/// PUT /api/timereport/{id}
pub async fn update_report(
    path: web::Path<String>,
    body: web::Json<Report>,
    service: web::Data<ReportService>,
) -> Result<HttpResponse, TimeReportError> {
    service.update(&path, body.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

/// 报告路由 `/timereport`
///
/// - GET  /timereport       列表（可按 year/week 过滤）
/// - POST /timereport       创建（无需认证）
/// - GET  /timereport/{id}  单条
/// - PUT  /timereport/{id}  覆盖更新
pub fn timereport_routes() -> actix_web::Scope {
    web::scope("/timereport")
        .route("", web::get().to(list_reports))
        .route("", web::post().to(create_report))
        .route("/{id}", web::get().to(get_report))
        .route("/{id}", web::put().to(update_report))
}
