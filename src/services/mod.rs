pub mod audit_service;
pub mod pricing_service;
pub mod promo_code_service;
pub mod rental_service;

pub use audit_service::*;
pub use pricing_service::*;
pub use promo_code_service::*;
pub use rental_service::*;
