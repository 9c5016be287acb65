use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(fundraising_events_table()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_fundraising_events_merchant_id")
                    .table(FundraisingEvents::Table)
                    .col(FundraisingEvents::MerchantId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FundraisingEvents::Table).to_owned())
            .await
    }
}

/// `CREATE TABLE fundraising_events`, column names matching the entity.
pub fn fundraising_events_table() -> sea_orm::sea_query::TableCreateStatement {
    Table::create()
        .table(FundraisingEvents::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(FundraisingEvents::Id)
                .big_integer() // Corresponds to i64
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        // 1 = Up; must match FundraisingEventType in the main crate
        .col(ColumnDef::new(FundraisingEvents::Type).integer().not_null().default(1))
        .col(ColumnDef::new(FundraisingEvents::MerchantId).string_len(50).not_null())
        .col(ColumnDef::new(FundraisingEvents::EventName).string_len(100).not_null())
        .col(ColumnDef::new(FundraisingEvents::Description).text().null())
        .col(
            ColumnDef::new(FundraisingEvents::StartMonth)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(
            ColumnDef::new(FundraisingEvents::EndMonth)
                .timestamp_with_time_zone()
                .not_null(),
        )
        // 1 = Active
        .col(ColumnDef::new(FundraisingEvents::Status).integer().not_null().default(1))
        .col(ColumnDef::new(FundraisingEvents::TotalAmount).integer().not_null())
        .col(ColumnDef::new(FundraisingEvents::Cost).integer().not_null().default(0))
        .col(
            ColumnDef::new(FundraisingEvents::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

#[derive(DeriveIden)]
enum FundraisingEvents {
    Table,
    Id,
    Type,
    #[sea_orm(iden = "merchantId")]
    MerchantId,
    #[sea_orm(iden = "eventName")]
    EventName,
    Description,
    #[sea_orm(iden = "startMonth")]
    StartMonth,
    #[sea_orm(iden = "endMonth")]
    EndMonth,
    Status,
    #[sea_orm(iden = "totalAmount")]
    TotalAmount,
    Cost,
    CreatedAt,
}
