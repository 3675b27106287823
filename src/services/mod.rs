//! Service layer
//!
//! Business logic shared by the HTTP handlers and the CLI.

mod account_service;
mod report_service;
pub mod statistics;

pub use account_service::*;
pub use report_service::*;
pub use statistics::StatisticsService;
