use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    ToSchema,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "promo_discount_type")]
#[serde(rename_all = "snake_case")]
pub enum PromoDiscountType {
    #[sea_orm(string_value = "free")]
    Free,
    #[sea_orm(string_value = "percentage")]
    Percentage,
    #[sea_orm(string_value = "fixed")]
    Fixed,
}

impl std::fmt::Display for PromoDiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromoDiscountType::Free => write!(f, "free"),
            PromoDiscountType::Percentage => write!(f, "percentage"),
            PromoDiscountType::Fixed => write!(f, "fixed"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "promo_codes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Always stored uppercase.
    #[sea_orm(unique)]
    pub code: String,
    pub discount_type: PromoDiscountType,
    pub discount_value: Option<i64>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: Option<DateTime<Utc>>,
    pub max_uses: Option<i32>,
    pub uses_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::promo_code_uses::Entity")]
    Uses,
}

impl Related<super::promo_code_uses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Uses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
