use chrono::{DateTime, Utc};

use crate::errors::{Result, TimeReportError};
use crate::storage::models::{Account, Report};
use crate::utils::{arrival_week, arrival_year};
use migration::entities::{account, report};

fn millis_to_datetime(column: &str, millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        TimeReportError::database_operation(format!("{} 超出时间范围: {}", column, millis))
    })
}

/// 将 Sea-ORM Model 转换为 Report
pub fn model_to_report(model: report::Model) -> Result<Report> {
    Ok(Report {
        id: Some(model.id),
        total: model.total,
        lunch: model.lunch,
        arrival: millis_to_datetime("arrival_ms", model.arrival_ms)?,
        leave: millis_to_datetime("leave_ms", model.leave_ms)?,
    })
}

/// 将 Report 转换为 ActiveModel
///
/// 年份和周数在写入时根据 arrival 计算。
pub fn report_to_active_model(id: &str, report: &Report) -> report::ActiveModel {
    use sea_orm::ActiveValue::Set;

    report::ActiveModel {
        id: Set(id.to_string()),
        total: Set(report.total),
        lunch: Set(report.lunch),
        arrival_ms: Set(report.arrival.timestamp_millis()),
        leave_ms: Set(report.leave.timestamp_millis()),
        arrival_year: Set(arrival_year(&report.arrival)),
        arrival_week: Set(arrival_week(&report.arrival)),
    }
}

pub fn model_to_account(model: account::Model) -> Account {
    Account {
        username: model.username,
        password_hash: model.password_hash,
        created_at: model.created_at,
    }
}

pub fn account_to_active_model(acc: &Account) -> account::ActiveModel {
    use sea_orm::ActiveValue::Set;

    account::ActiveModel {
        username: Set(acc.username.clone()),
        password_hash: Set(acc.password_hash.clone()),
        created_at: Set(acc.created_at),
    }
}
