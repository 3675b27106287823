//! SeaORM storage backend
//!
//! Reports and accounts live in a relational database accessed through
//! SeaORM: SQLite by default, MySQL/MariaDB or PostgreSQL by URL.

mod accounts;
mod connection;
mod converters;
mod mutations;
mod query;
pub mod retry;

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::errors::{Result, TimeReportError};
use crate::storage::models::StorageConfig;

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{model_to_account, model_to_report, report_to_active_model};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(TimeReportError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// 报告过滤条件，两个条件同时存在时取交集
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportFilter {
    /// 到达时间所在的 UTC 年份
    pub year: Option<i32>,
    /// 到达时间所在的 ISO 周
    pub week: Option<i32>,
}

impl ReportFilter {
    /// 非正数视为未设置
    pub fn new(year: Option<i32>, week: Option<i32>) -> Self {
        Self {
            year: year.filter(|y| *y > 0),
            week: week.filter(|w| *w > 0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.week.is_none()
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(TimeReportError::database_config("database_url 未设置"));
        }

        let config = crate::config::get_config();
        let retry_config = retry::RetryConfig::from(&config.database);

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name, &config.database).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            retry_config,
        };

        run_migrations(&storage.db).await?;

        info!(
            "{} storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn get_backend_config(&self) -> StorageConfig {
        StorageConfig {
            storage_type: self.backend_name.clone(),
        }
    }

    /// 获取数据库连接
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// 关闭连接池（优雅关闭时调用）
    pub async fn close(&self) -> Result<()> {
        self.db
            .clone()
            .close()
            .await
            .map_err(|e| TimeReportError::database_connection(format!("关闭数据库连接失败: {}", e)))
    }
}
