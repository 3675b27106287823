pub mod account;
pub mod report;

pub use account::Entity as AccountEntity;
pub use report::Entity as ReportEntity;
