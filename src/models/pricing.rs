use crate::entities::{movie_entity as movies, pricing_tier_entity as pricing_tiers};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    NoPricing,
}

/// Outcome of resolving a movie's price before any promo code is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingResult {
    Available {
        tier: pricing_tiers::Model,
        original_amount: i64,
        final_amount: i64,
    },
    Unavailable(UnavailableReason),
}

impl PricingResult {
    pub fn from_tier(tier: Option<pricing_tiers::Model>) -> Self {
        match tier {
            Some(tier) if tier.is_active => PricingResult::Available {
                original_amount: tier.price_lak,
                final_amount: tier.price_lak,
                tier,
            },
            _ => PricingResult::Unavailable(UnavailableReason::NoPricing),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, PricingResult::Available { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DisplayName {
    pub en: String,
    pub lo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingTierResponse {
    pub id: Uuid,
    pub name: String,
    pub display_name: DisplayName,
    pub price_lak: i64,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<pricing_tiers::Model> for PricingTierResponse {
    fn from(tier: pricing_tiers::Model) -> Self {
        Self {
            id: tier.id,
            name: tier.name,
            display_name: DisplayName {
                en: tier.display_name_en,
                lo: tier.display_name_lo,
            },
            price_lak: tier.price_lak,
            is_active: tier.is_active,
            sort_order: tier.sort_order,
            created_at: tier.created_at,
            updated_at: tier.updated_at,
        }
    }
}

/// Wire form of [`PricingResult`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingView {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_amount_lak: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_amount_lak: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<PricingTierResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailable_reason: Option<UnavailableReason>,
}

impl From<PricingResult> for PricingView {
    fn from(result: PricingResult) -> Self {
        match result {
            PricingResult::Available {
                tier,
                original_amount,
                final_amount,
            } => Self {
                available: true,
                original_amount_lak: Some(original_amount),
                final_amount_lak: Some(final_amount),
                tier: Some(tier.into()),
                unavailable_reason: None,
            },
            PricingResult::Unavailable(reason) => Self {
                available: false,
                original_amount_lak: None,
                final_amount_lak: None,
                tier: None,
                unavailable_reason: Some(reason),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MoviePricingResponse {
    pub pricing: PricingView,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePricingTierRequest {
    #[schema(example = "new_release")]
    pub name: String,
    #[schema(example = "New release")]
    pub display_name_en: String,
    #[schema(example = "ໜັງໃໝ່")]
    pub display_name_lo: String,
    #[schema(example = 75000)]
    pub price_lak: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePricingTierRequest {
    pub name: Option<String>,
    pub display_name_en: Option<String>,
    pub display_name_lo: Option<String>,
    pub price_lak: Option<i64>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignPricingTierRequest {
    /// `null` removes the movie from sale.
    pub tier_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    pub id: Uuid,
    pub original_title: String,
    pub pricing_tier_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl From<movies::Model> for MovieResponse {
    fn from(movie: movies::Model) -> Self {
        Self {
            id: movie.id,
            original_title: movie.original_title,
            pricing_tier_id: movie.pricing_tier_id,
            updated_at: movie.updated_at,
        }
    }
}
