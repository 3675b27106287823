use actix_web::{HttpResponse, web};
use tracing::debug;

use crate::errors::TimeReportError;
use crate::services::StatisticsService;

/// GET /api/statistics
pub async fn get_statistics(
    service: web::Data<StatisticsService>,
) -> Result<HttpResponse, TimeReportError> {
    let stats = service.compute().await?;
    debug!("Computed statistics for {} years", stats.len());
    Ok(HttpResponse::Ok().json(stats))
}

pub fn statistics_routes() -> actix_web::Scope {
    web::scope("/statistics").route("", web::get().to(get_statistics))
}
