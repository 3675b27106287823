use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub total: i64,
    pub lunch: i64,
    /// Epoch milliseconds (UTC)
    pub arrival_ms: i64,
    /// Epoch milliseconds (UTC)
    pub leave_ms: i64,
    pub arrival_year: i32,
    pub arrival_week: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
