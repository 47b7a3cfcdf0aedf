use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The pricing-relevant slice of a catalogue movie.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub original_title: String,
    pub pricing_tier_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pricing_tiers::Entity",
        from = "Column::PricingTierId",
        to = "super::pricing_tiers::Column::Id",
        on_delete = "SetNull"
    )]
    PricingTier,
}

impl Related<super::pricing_tiers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PricingTier.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
