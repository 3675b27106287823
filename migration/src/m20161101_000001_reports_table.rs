use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 reports 表
        manager
            .create_table(
                Table::create()
                    .table(Report::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Report::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Report::Total)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Report::Lunch)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Report::ArrivalMs).big_integer().not_null())
                    .col(ColumnDef::new(Report::LeaveMs).big_integer().not_null())
                    .col(ColumnDef::new(Report::ArrivalYear).integer().not_null())
                    .col(ColumnDef::new(Report::ArrivalWeek).integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 到达时间索引（列表排序）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reports_arrival")
                    .table(Report::Table)
                    .col(Report::ArrivalMs)
                    .to_owned(),
            )
            .await?;

        // 年/周复合索引（year、year+week 过滤）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reports_year_week")
                    .table(Report::Table)
                    .col(Report::ArrivalYear)
                    .col(Report::ArrivalWeek)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reports_week")
                    .table(Report::Table)
                    .col(Report::ArrivalWeek)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_reports_week").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_reports_year_week").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_reports_arrival").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Report::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Report {
    #[sea_orm(iden = "reports")]
    Table,
    Id,
    Total,
    Lunch,
    ArrivalMs,
    LeaveMs,
    ArrivalYear,
    ArrivalWeek,
}
