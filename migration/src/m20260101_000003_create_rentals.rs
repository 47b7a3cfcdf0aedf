use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Rentals {
    Table,
    Id,
    UserId,
    MovieId,
    PricingTierId,
    OriginalAmountLak,
    DiscountAmountLak,
    FinalAmountLak,
    PromoCodeId,
    RentedAt,
    ExpiresAt,
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rentals::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Rentals::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Rentals::UserId).uuid().not_null())
                    .col(ColumnDef::new(Rentals::MovieId).uuid().not_null())
                    .col(ColumnDef::new(Rentals::PricingTierId).uuid().not_null())
                    .col(
                        ColumnDef::new(Rentals::OriginalAmountLak)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rentals::DiscountAmountLak)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Rentals::FinalAmountLak)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Rentals::PromoCodeId).uuid().null())
                    .col(
                        ColumnDef::new(Rentals::RentedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Rentals::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rentals_movie")
                            .from(Rentals::Table, Rentals::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_rentals_user_rented_at")
                    .table(Rentals::Table)
                    .col(Rentals::UserId)
                    .col(Rentals::RentedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Rentals::Table).to_owned())
            .await?;
        Ok(())
    }
}
