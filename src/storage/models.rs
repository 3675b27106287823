use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TimeReportError};
use crate::utils::week::from_millis;

/// 一个工作日的报告
///
/// 时间戳在 JSON 中以 epoch 毫秒表示；`total`/`lunch` 单位为秒。
/// 相等性只比较 total/lunch/arrival/leave，不比较 id。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub lunch: i64,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub arrival: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub leave: DateTime<Utc>,
}

impl PartialEq for Report {
    fn eq(&self, other: &Self) -> bool {
        self.total == other.total
            && self.lunch == other.lunch
            && self.arrival == other.arrival
            && self.leave == other.leave
    }
}

impl Eq for Report {}

impl Report {
    pub fn new(arrival: DateTime<Utc>, leave: DateTime<Utc>, lunch: i64, total: i64) -> Self {
        Self {
            id: None,
            total,
            lunch,
            arrival,
            leave,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// total/lunch 必须落在 `0..=MAX_DURATION_SECS`
    pub fn validate_durations(&self) -> Result<()> {
        check_duration("total", self.total)?;
        check_duration("lunch", self.lunch)
    }
}

/// 单条报告允许的最大时长（秒）
///
/// 保证按年求和不会溢出 i64。
pub const MAX_DURATION_SECS: i64 = i32::MAX as i64;

fn check_duration(field: &str, value: i64) -> Result<()> {
    if (0..=MAX_DURATION_SECS).contains(&value) {
        Ok(())
    } else {
        Err(TimeReportError::validation(format!(
            "{} out of range: {}",
            field, value
        )))
    }
}

/// 客户端提交的报告（创建时使用）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientReport {
    pub work_time: i64,
    pub lunch_time: i64,
    /// epoch 毫秒
    pub arrival_time: i64,
    /// epoch 毫秒
    pub leave_time: i64,
}

impl TryFrom<ClientReport> for Report {
    type Error = TimeReportError;

    fn try_from(client: ClientReport) -> Result<Self> {
        let arrival = from_millis(client.arrival_time).ok_or_else(|| {
            TimeReportError::validation(format!(
                "arrivalTime out of range: {}",
                client.arrival_time
            ))
        })?;
        let leave = from_millis(client.leave_time).ok_or_else(|| {
            TimeReportError::validation(format!("leaveTime out of range: {}", client.leave_time))
        })?;

        let report = Report::new(arrival, leave, client.lunch_time, client.work_time);
        report.validate_durations()?;
        Ok(report)
    }
}

/// 某一年中的极值记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
    pub time: i64,
}

/// 按年聚合的统计（每次请求实时计算，不落库）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistic {
    /// 年份
    pub id: i32,
    pub sum: i64,
    pub avg: i64,
    pub shortest: Record,
    pub longest: Record,
}

/// Basic 认证账户
#[derive(Debug, Clone)]
pub struct Account {
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn millis(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn test_report_json_shape() {
        let report = Report::new(millis(1_478_501_763_000), millis(1_478_533_253_000), 3600, 27780)
            .with_id("abc");

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "abc",
                "total": 27780,
                "lunch": 3600,
                "arrival": 1_478_501_763_000i64,
                "leave": 1_478_533_253_000i64,
            })
        );
    }

    #[test]
    fn test_client_report_rejects_out_of_range_durations() {
        let base = ClientReport {
            work_time: 27780,
            lunch_time: 3600,
            arrival_time: 1_478_501_763_000,
            leave_time: 1_478_533_253_000,
        };
        assert!(Report::try_from(base.clone()).is_ok());

        let huge = ClientReport {
            work_time: i64::MAX,
            ..base.clone()
        };
        assert!(matches!(
            Report::try_from(huge),
            Err(TimeReportError::Validation(_))
        ));

        let negative_lunch = ClientReport {
            lunch_time: -1,
            ..base
        };
        assert!(matches!(
            Report::try_from(negative_lunch),
            Err(TimeReportError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_durations_bounds() {
        let at = millis(1_478_501_763_000);
        assert!(Report::new(at, at, 0, MAX_DURATION_SECS).validate_durations().is_ok());
        assert!(Report::new(at, at, 0, MAX_DURATION_SECS + 1).validate_durations().is_err());
    }

    #[test]
    fn test_report_equality_ignores_id() {
        let a = Report::new(millis(1000), millis(2000), 60, 900).with_id("a");
        let b = Report::new(millis(1000), millis(2000), 60, 900).with_id("b");
        let c = Report::new(millis(1000), millis(2000), 60, 901);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_report_without_id_deserializes() {
        let report: Report = serde_json::from_value(json!({
            "total": 28680,
            "lunch": 3600,
            "arrival": 1_478_501_763_000i64,
            "leave": 1_467_906_953_000i64,
        }))
        .unwrap();

        assert!(report.id.is_none());
        assert_eq!(report.leave, millis(1_467_906_953_000));
    }

    #[test]
    fn test_client_report_maps_fields() {
        let client: ClientReport = serde_json::from_value(json!({
            "workTime": 27989,
            "lunchTime": 3600,
            "arrivalTime": 1_479_452_348_000i64,
            "leaveTime": 1_479_483_937_000i64,
        }))
        .unwrap();

        let report = Report::try_from(client).unwrap();
        assert_eq!(report.total, 27989);
        assert_eq!(report.lunch, 3600);
        assert_eq!(report.arrival, millis(1_479_452_348_000));
        assert_eq!(report.leave, millis(1_479_483_937_000));
        assert!(report.id.is_none());
    }

    #[test]
    fn test_client_report_missing_fields_default_to_zero() {
        let client: ClientReport = serde_json::from_value(json!({ "workTime": 10 })).unwrap();
        assert_eq!(client.lunch_time, 0);
        assert_eq!(client.arrival_time, 0);
    }

    #[test]
    fn test_client_report_out_of_range_is_validation_error() {
        let client = ClientReport {
            arrival_time: i64::MAX,
            ..Default::default()
        };

        let err = Report::try_from(client).unwrap_err();
        assert!(matches!(err, TimeReportError::Validation(_)));
    }

    #[test]
    fn test_statistic_json_shape() {
        let stat = Statistic {
            id: 2016,
            sum: 55398,
            avg: 27699,
            shortest: Record {
                date: millis(1_478_674_513_000),
                time: 27618,
            },
            longest: Record {
                date: millis(1_478_501_763_000),
                time: 27780,
            },
        };

        let value = serde_json::to_value(&stat).unwrap();
        assert_eq!(value["id"], 2016);
        assert_eq!(value["shortest"]["date"], 1_478_674_513_000i64);
        assert_eq!(value["longest"]["time"], 27780);
    }
}
