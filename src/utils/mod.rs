pub mod audit_diff;
pub mod code_format;
pub mod code_generator;
pub mod discount;
pub mod jwt;

pub use audit_diff::diff_fields;
pub use code_format::*;
pub use code_generator::generate_promo_code;
pub use discount::*;
pub use jwt::*;
