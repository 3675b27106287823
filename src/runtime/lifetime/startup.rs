use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::get_config;
use crate::services::{AccountService, ReportService, StatisticsService};
use crate::storage::{SeaOrmStorage, StorageFactory};

/// 服务启动所需的共享组件
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub report_service: ReportService,
    pub statistics_service: StatisticsService,
    pub account_service: AccountService,
}

impl StartupContext {
    /// 基于已有存储组装服务层（测试中直接传入临时数据库）
    pub fn from_storage(storage: Arc<SeaOrmStorage>) -> Self {
        Self {
            report_service: ReportService::new(storage.clone()),
            statistics_service: StatisticsService::new(storage.clone()),
            account_service: AccountService::new(storage.clone()),
            storage,
        }
    }
}

/// 准备服务器启动的上下文：连接数据库、执行迁移、初始化账户
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!(
        "Using storage backend: {}",
        storage.get_backend_config().storage_type
    );

    let context = StartupContext::from_storage(storage);

    let config = get_config();
    context
        .account_service
        .bootstrap_from_config(&config.auth)
        .await
        .context("Failed to bootstrap accounts")?;

    let report_count = context
        .report_service
        .count()
        .await
        .context("Failed to count reports")?;
    info!("{} reports in store", report_count);

    debug!("Pre-startup completed in {:?}", start_time.elapsed());
    Ok(context)
}
