pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20161101_000001_reports_table;
mod m20161101_000002_accounts_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20161101_000001_reports_table::Migration),
            Box::new(m20161101_000002_accounts_table::Migration),
        ]
    }
}
