//! Report management service

use std::sync::Arc;

use tracing::debug;

use crate::errors::{Result, TimeReportError};
use crate::storage::{ClientReport, Report, ReportFilter, SeaOrmStorage};

/// Report CRUD on top of the storage backend
#[derive(Clone)]
pub struct ReportService {
    storage: Arc<SeaOrmStorage>,
}

impl ReportService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Store a client-submitted report and return it with its new id
    pub async fn create(&self, client: ClientReport) -> Result<Report> {
        let report = Report::try_from(client)?;
        self.storage.insert(&report).await
    }

    pub async fn get(&self, id: &str) -> Result<Report> {
        self.storage
            .get(id)
            .await?
            .ok_or_else(|| TimeReportError::not_found(id))
    }

    /// List reports by arrival year and/or ISO week, ascending by arrival
    pub async fn list(&self, year: Option<i32>, week: Option<i32>) -> Result<Vec<Report>> {
        let filter = ReportFilter::new(year, week);
        debug!("Listing reports with {:?}", filter);
        self.storage.list(filter).await
    }

    /// Replace an existing report; the id in the body is ignored
    pub async fn update(&self, id: &str, report: Report) -> Result<()> {
        report.validate_durations()?;
        self.storage.update(id, &report).await
    }

    pub async fn count(&self) -> Result<u64> {
        self.storage.count().await
    }
}
