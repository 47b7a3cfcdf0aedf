use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum PromoCodes {
    Table,
    Id,
    Code,
    DiscountType,
    DiscountValue,
    ValidFrom,
    ValidTo,
    MaxUses,
    UsesCount,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PromoCodeUses {
    Table,
    Id,
    PromoCodeId,
    RentalId,
    UserId,
    DiscountAmountLak,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("promo_discount_type"))
                    .values(vec![
                        Alias::new("free"),
                        Alias::new("percentage"),
                        Alias::new("fixed"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PromoCodes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PromoCodes::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(PromoCodes::Code)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(PromoCodes::DiscountType)
                            .custom(Alias::new("promo_discount_type"))
                            .not_null(),
                    )
                    .col(ColumnDef::new(PromoCodes::DiscountValue).big_integer().null())
                    .col(
                        ColumnDef::new(PromoCodes::ValidFrom)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PromoCodes::ValidTo)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(PromoCodes::MaxUses).integer().null())
                    .col(
                        ColumnDef::new(PromoCodes::UsesCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PromoCodes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(PromoCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(PromoCodes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .check(Expr::cust(
                        "max_uses IS NULL OR uses_count <= max_uses",
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PromoCodeUses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PromoCodeUses::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PromoCodeUses::PromoCodeId).uuid().not_null())
                    .col(
                        ColumnDef::new(PromoCodeUses::RentalId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(PromoCodeUses::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(PromoCodeUses::DiscountAmountLak)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PromoCodeUses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_promo_code_uses_promo_code")
                            .from(PromoCodeUses::Table, PromoCodeUses::PromoCodeId)
                            .to(PromoCodes::Table, PromoCodes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_promo_code_uses_promo_code")
                    .table(PromoCodeUses::Table)
                    .col(PromoCodeUses::PromoCodeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(PromoCodeUses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(PromoCodes::Table).to_owned())
            .await?;
        manager
            .drop_type(
                Type::drop()
                    .name(Alias::new("promo_discount_type"))
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
