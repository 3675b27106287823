//! Report queries
//!
//! All read-only report operations.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::debug;

use super::converters::model_to_report;
use super::{ReportFilter, SeaOrmStorage, retry};
use crate::errors::{Result, TimeReportError};
use crate::storage::models::Report;

use migration::entities::report;

impl SeaOrmStorage {
    /// 按 id 查询，不存在时返回 `Ok(None)`
    pub async fn get(&self, id: &str) -> Result<Option<Report>> {
        let db = &self.db;

        let model = retry::with_retry(&format!("get({})", id), self.retry_config, || async {
            report::Entity::find_by_id(id).one(db).await
        })
        .await
        .map_err(|e| TimeReportError::database_operation(format!("查询报告失败: {}", e)))?;

        model.map(model_to_report).transpose()
    }

    /// 按年/周过滤，结果按到达时间升序
    pub async fn list(&self, filter: ReportFilter) -> Result<Vec<Report>> {
        let db = &self.db;

        let models = retry::with_retry("list", self.retry_config, || async {
            let mut query = report::Entity::find();
            if let Some(year) = filter.year {
                query = query.filter(report::Column::ArrivalYear.eq(year));
            }
            if let Some(week) = filter.week {
                query = query.filter(report::Column::ArrivalWeek.eq(week));
            }
            query
                .order_by_asc(report::Column::ArrivalMs)
                .order_by_asc(report::Column::Id)
                .all(db)
                .await
        })
        .await
        .map_err(|e| TimeReportError::database_operation(format!("查询报告列表失败: {}", e)))?;

        debug!("list({:?}) returned {} reports", filter, models.len());
        models.into_iter().map(model_to_report).collect()
    }

    /// 加载全部报告（统计使用）
    pub async fn load_all(&self) -> Result<Vec<Report>> {
        self.list(ReportFilter::default()).await
    }

    pub async fn count(&self) -> Result<u64> {
        let db = &self.db;

        retry::with_retry("count", self.retry_config, || async {
            report::Entity::find().count(db).await
        })
        .await
        .map_err(|e| TimeReportError::database_operation(format!("统计报告数量失败: {}", e)))
    }
}
