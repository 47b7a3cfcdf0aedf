pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_pricing_tiers;
mod m20260101_000002_create_promo_codes;
mod m20260101_000003_create_rentals;
mod m20260101_000004_create_audit_logs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_pricing_tiers::Migration),
            Box::new(m20260101_000002_create_promo_codes::Migration),
            Box::new(m20260101_000003_create_rentals::Migration),
            Box::new(m20260101_000004_create_audit_logs::Migration),
        ]
    }
}
