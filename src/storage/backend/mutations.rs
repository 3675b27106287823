//! Report writes

use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel};
use tracing::info;
use uuid::Uuid;

use super::converters::report_to_active_model;
use super::{SeaOrmStorage, retry};
use crate::errors::{Result, TimeReportError};
use crate::storage::models::Report;

use migration::entities::report;

/// 新报告 id（UUID v4，32 位十六进制）
fn new_report_id() -> String {
    Uuid::new_v4().simple().to_string()
}

impl SeaOrmStorage {
    /// 插入新报告，忽略传入的 id，返回带新 id 的报告
    pub async fn insert(&self, new_report: &Report) -> Result<Report> {
        let db = &self.db;
        let id = new_report_id();

        retry::with_retry(&format!("insert({})", id), self.retry_config, || async {
            report::Entity::insert(report_to_active_model(&id, new_report))
                .exec_without_returning(db)
                .await
        })
        .await
        .map_err(|e| TimeReportError::database_operation(format!("创建报告失败: {}", e)))?;

        info!("Report created: {}", id);
        Ok(new_report.clone().with_id(id))
    }

    /// 覆盖已有报告的 total/lunch/arrival/leave，id 不存在时返回 NotFound
    pub async fn update(&self, id: &str, changes: &Report) -> Result<()> {
        let db = &self.db;

        let updated = retry::with_retry(&format!("update({})", id), self.retry_config, || async {
            let Some(existing) = report::Entity::find_by_id(id).one(db).await? else {
                return Ok::<_, sea_orm::DbErr>(false);
            };

            // 以现有记录为基准，再整体覆盖各字段
            let mut active = existing.into_active_model();
            let replacement = report_to_active_model(id, changes);
            active.total = replacement.total;
            active.lunch = replacement.lunch;
            active.arrival_ms = replacement.arrival_ms;
            active.leave_ms = replacement.leave_ms;
            active.arrival_year = replacement.arrival_year;
            active.arrival_week = replacement.arrival_week;
            active.update(db).await?;
            Ok::<_, sea_orm::DbErr>(true)
        })
        .await
        .map_err(|e| TimeReportError::database_operation(format!("更新报告失败: {}", e)))?;

        if !updated {
            return Err(TimeReportError::not_found(id));
        }

        info!("Report updated: {}", id);
        Ok(())
    }

    /// 删除全部报告（仅用于测试准备数据）
    pub async fn delete_all(&self) -> Result<u64> {
        let db = &self.db;

        let result = retry::with_retry("delete_all", self.retry_config, || async {
            report::Entity::delete_many().exec(db).await
        })
        .await
        .map_err(|e| TimeReportError::database_operation(format!("清空报告失败: {}", e)))?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_id_format() {
        let id = new_report_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, new_report_id());
    }
}
