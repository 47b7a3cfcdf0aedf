use crate::entities::{PromoDiscountType, promo_code_entity as promo_codes};
use crate::models::nullable;
use crate::utils::{AppliedDiscount, PromoRejection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidatePromoCodeRequest {
    #[schema(example = "half50")]
    pub code: String,
    pub movie_id: Uuid,
}

/// Result of checking a code against a movie. An unusable code is a
/// normal `valid: false` answer, never an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromoValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<PromoDiscountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount_lak: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_amount_lak: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<PromoRejection>,
}

impl From<Result<AppliedDiscount, PromoRejection>> for PromoValidation {
    fn from(outcome: Result<AppliedDiscount, PromoRejection>) -> Self {
        match outcome {
            Ok(discount) => Self {
                valid: true,
                discount_type: Some(discount.discount_type),
                discount_amount_lak: Some(discount.discount_amount),
                final_amount_lak: Some(discount.final_amount),
                error: None,
                error_code: None,
            },
            Err(rejection) => Self {
                valid: false,
                discount_type: None,
                discount_amount_lak: None,
                final_amount_lak: None,
                error: Some(rejection.message().to_string()),
                error_code: Some(rejection),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PromoValidationResponse {
    pub validation: PromoValidation,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromoCodeResponse {
    pub id: Uuid,
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

impl From<promo_codes::Model> for PromoCodeResponse {
    fn from(p: promo_codes::Model) -> Self {
        Self {
            id: p.id,
            code: p.code,
            discount_type: p.discount_type,
            discount_value: p.discount_value,
            valid_from: p.valid_from,
            valid_to: p.valid_to,
            max_uses: p.max_uses,
            uses_count: p.uses_count,
            is_active: p.is_active,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePromoCodeRequest {
    /// Generated when omitted.
    #[schema(example = "FREEWATCH")]
    pub code: Option<String>,
    pub discount_type: PromoDiscountType,
    #[schema(example = 50)]
    pub discount_value: Option<i64>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: Option<DateTime<Utc>>,
    pub max_uses: Option<i32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePromoCodeRequest {
    pub code: Option<String>,
    pub discount_type: Option<PromoDiscountType>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i64>)]
    pub discount_value: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub valid_from: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub valid_to: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i32>)]
    pub max_uses: Option<Option<i32>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromoCodeQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub active: Option<bool>,
}
