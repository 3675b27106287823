use std::sync::Arc;

use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::{ReportFilter, SeaOrmStorage};
pub use models::{Account, ClientReport, Record, Report, Statistic};

pub struct StorageFactory;

impl StorageFactory {
    /// 根据全局配置创建存储（数据库类型从 URL 推断）
    pub async fn create() -> Result<Arc<SeaOrmStorage>> {
        let config = crate::config::get_config();
        let database_url = &config.database.database_url;

        let backend_type = backend::infer_backend_from_url(database_url)?;

        let storage = SeaOrmStorage::new(database_url, &backend_type).await?;
        Ok(Arc::new(storage))
    }
}
