//! 年度统计
//!
//! 每次请求都从全部报告实时计算，不缓存。

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::errors::{Result, TimeReportError};
use crate::storage::{Record, Report, SeaOrmStorage, Statistic};
use crate::utils::arrival_year;

/// 按到达时间的 UTC 年份分组聚合
///
/// 每组内按 (total, arrival) 排序：第一条为 shortest，最后一条为 longest。
/// avg 为整除结果。返回值按年份升序。年度总和超出 i64 时返回错误。
pub fn aggregate(reports: &[Report]) -> Result<Vec<Statistic>> {
    let mut by_year: BTreeMap<i32, Vec<&Report>> = BTreeMap::new();
    for report in reports {
        by_year
            .entry(arrival_year(&report.arrival))
            .or_default()
            .push(report);
    }

    let mut stats = Vec::with_capacity(by_year.len());
    for (year, mut group) in by_year {
        group.sort_by_key(|r| (r.total, r.arrival));

        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };

        let wide_sum: i128 = group.iter().map(|r| i128::from(r.total)).sum();
        let sum = i64::try_from(wide_sum).map_err(|_| {
            TimeReportError::statistics(format!("sum of totals for {} overflows: {}", year, wide_sum))
        })?;

        stats.push(Statistic {
            id: year,
            sum,
            avg: sum / group.len() as i64,
            shortest: Record {
                date: first.arrival,
                time: first.total,
            },
            longest: Record {
                date: last.arrival,
                time: last.total,
            },
        });
    }

    Ok(stats)
}

#[derive(Clone)]
pub struct StatisticsService {
    storage: Arc<SeaOrmStorage>,
}

impl StatisticsService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn compute(&self) -> Result<Vec<Statistic>> {
        let reports = self.storage.load_all().await?;
        aggregate(&reports)
    }
}
