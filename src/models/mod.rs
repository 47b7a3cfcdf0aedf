pub mod common;
pub mod pagination;
pub mod pricing;
pub mod promo_code;
pub mod rental;

pub use common::*;
pub use pagination::*;
pub use pricing::*;
pub use promo_code::*;
pub use rental::*;
