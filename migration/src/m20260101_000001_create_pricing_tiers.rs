use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum PricingTiers {
    Table,
    Id,
    Name,
    DisplayNameEn,
    DisplayNameLo,
    PriceLak,
    IsActive,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    OriginalTitle,
    PricingTierId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PricingTiers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PricingTiers::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(PricingTiers::Name)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(PricingTiers::DisplayNameEn)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PricingTiers::DisplayNameLo)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PricingTiers::PriceLak)
                            .big_integer()
                            .not_null()
                            .check(Expr::col(PricingTiers::PriceLak).gte(0)),
                    )
                    .col(
                        ColumnDef::new(PricingTiers::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(PricingTiers::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PricingTiers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(PricingTiers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // The catalogue owns most of the movie columns; only what pricing needs lives here.
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Movies::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Movies::OriginalTitle).text().not_null())
                    .col(ColumnDef::new(Movies::PricingTierId).uuid().null())
                    .col(
                        ColumnDef::new(Movies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Movies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movies_pricing_tier")
                            .from(Movies::Table, Movies::PricingTierId)
                            .to(PricingTiers::Table, PricingTiers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_movies_pricing_tier")
                    .table(Movies::Table)
                    .col(Movies::PricingTierId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Movies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(PricingTiers::Table).to_owned())
            .await?;
        Ok(())
    }
}
