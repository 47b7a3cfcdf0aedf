pub mod audit_logs;
pub mod movies;
pub mod pricing_tiers;
pub mod promo_code_uses;
pub mod promo_codes;
pub mod rentals;

pub use audit_logs as audit_log_entity;
pub use movies as movie_entity;
pub use pricing_tiers as pricing_tier_entity;
pub use promo_code_uses as promo_code_use_entity;
pub use promo_codes as promo_code_entity;
pub use promo_codes::PromoDiscountType;
pub use rentals as rental_entity;
