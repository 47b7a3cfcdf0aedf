use crate::entities::rental_entity as rentals;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalRequest {
    pub movie_id: Uuid,
    #[schema(example = "FREEWATCH")]
    pub promo_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalResponse {
    pub id: Uuid,
    pub movie_id: Uuid,
    pub pricing_tier_id: Uuid,
    pub original_amount_lak: i64,
    pub discount_amount_lak: i64,
    pub final_amount_lak: i64,
    pub promo_code_id: Option<Uuid>,
    pub currency: String,
    pub rented_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl RentalResponse {
    pub fn new(rental: rentals::Model, currency: &str) -> Self {
        Self {
            id: rental.id,
            movie_id: rental.movie_id,
            pricing_tier_id: rental.pricing_tier_id,
            original_amount_lak: rental.original_amount_lak,
            discount_amount_lak: rental.discount_amount_lak,
            final_amount_lak: rental.final_amount_lak,
            promo_code_id: rental.promo_code_id,
            currency: currency.to_string(),
            rented_at: rental.rented_at,
            expires_at: rental.expires_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRentalResponse {
    pub rental: RentalResponse,
}
