//! Promo code evaluation against a movie's price.
//!
//! All amounts are whole Lao Kip. Percentage discounts truncate and fixed
//! discounts are clamped so the final amount never drops below zero.

use crate::entities::{PromoDiscountType, promo_code_entity as promo_codes};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Why a promo code cannot be applied right now. These are user-facing
/// outcomes, not failures of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PromoRejection {
    NotFound,
    Inactive,
    NotYetValid,
    Expired,
    UsageLimitReached,
}

impl PromoRejection {
    pub fn message(&self) -> &'static str {
        match self {
            PromoRejection::NotFound => "code not found",
            PromoRejection::Inactive => "code inactive",
            PromoRejection::NotYetValid => "code not yet valid",
            PromoRejection::Expired => "code expired",
            PromoRejection::UsageLimitReached => "usage limit reached",
        }
    }
}

impl std::fmt::Display for PromoRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedDiscount {
    pub discount_type: PromoDiscountType,
    pub discount_amount: i64,
    pub final_amount: i64,
}

/// Computes the discount a code of the given kind grants on `original_amount`.
pub fn apply_discount(
    discount_type: PromoDiscountType,
    discount_value: Option<i64>,
    original_amount: i64,
) -> AppliedDiscount {
    let original_amount = original_amount.max(0);
    let value = discount_value.unwrap_or(0).max(0);

    let discount_amount = match discount_type {
        PromoDiscountType::Free => original_amount,
        PromoDiscountType::Percentage => {
            let pct = value.min(100) as i128;
            (original_amount as i128 * pct / 100) as i64
        }
        PromoDiscountType::Fixed => value.min(original_amount),
    };

    AppliedDiscount {
        discount_type,
        discount_amount,
        final_amount: original_amount - discount_amount,
    }
}

/// Checks activity, validity window and usage cap, in that order.
pub fn check_redeemable(
    promo: &promo_codes::Model,
    now: DateTime<Utc>,
) -> Result<(), PromoRejection> {
    if !promo.is_active {
        return Err(PromoRejection::Inactive);
    }
    if let Some(valid_from) = promo.valid_from {
        if now < valid_from {
            return Err(PromoRejection::NotYetValid);
        }
    }
    if let Some(valid_to) = promo.valid_to {
        if now > valid_to {
            return Err(PromoRejection::Expired);
        }
    }
    if let Some(max_uses) = promo.max_uses {
        if promo.uses_count >= max_uses {
            return Err(PromoRejection::UsageLimitReached);
        }
    }
    Ok(())
}

pub fn evaluate_promo_code(
    promo: &promo_codes::Model,
    original_amount: i64,
    now: DateTime<Utc>,
) -> Result<AppliedDiscount, PromoRejection> {
    check_redeemable(promo, now)?;
    Ok(apply_discount(
        promo.discount_type,
        promo.discount_value,
        original_amount,
    ))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    pub(crate) fn promo(code: &str, kind: PromoDiscountType, value: Option<i64>) -> promo_codes::Model {
        let now = Utc::now();
        promo_codes::Model {
            id: Uuid::new_v4(),
            code: code.to_string(),
            discount_type: kind,
            discount_value: value,
            valid_from: None,
            valid_to: None,
            max_uses: None,
            uses_count: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_free_discount_covers_full_price() {
        let d = apply_discount(PromoDiscountType::Free, None, 75_000);
        assert_eq!(d.discount_amount, 75_000);
        assert_eq!(d.final_amount, 0);
    }

    #[test]
    fn test_percentage_discount_truncates() {
        let d = apply_discount(PromoDiscountType::Percentage, Some(50), 100_000);
        assert_eq!(d.discount_amount, 50_000);
        assert_eq!(d.final_amount, 50_000);

        // 33% of 1001 is 330.33
        let d = apply_discount(PromoDiscountType::Percentage, Some(33), 1_001);
        assert_eq!(d.discount_amount, 330);
        assert_eq!(d.final_amount, 671);

        let d = apply_discount(PromoDiscountType::Percentage, Some(100), 45_000);
        assert_eq!(d.final_amount, 0);
    }

    #[test]
    fn test_fixed_discount_clamps_to_price() {
        let d = apply_discount(PromoDiscountType::Fixed, Some(30_000), 20_000);
        assert_eq!(d.discount_amount, 20_000);
        assert_eq!(d.final_amount, 0);

        let d = apply_discount(PromoDiscountType::Fixed, Some(5_000), 20_000);
        assert_eq!(d.discount_amount, 5_000);
        assert_eq!(d.final_amount, 15_000);

        let d = apply_discount(PromoDiscountType::Fixed, Some(0), 20_000);
        assert_eq!(d.final_amount, 20_000);
    }

    #[test]
    fn test_zero_price() {
        for kind in [
            PromoDiscountType::Free,
            PromoDiscountType::Percentage,
            PromoDiscountType::Fixed,
        ] {
            let d = apply_discount(kind, Some(10), 0);
            assert_eq!(d.discount_amount, 0);
            assert_eq!(d.final_amount, 0);
        }
    }

    #[test]
    fn test_check_order() {
        let now = Utc::now();
        let mut p = promo("SPRING", PromoDiscountType::Fixed, Some(1_000));
        p.is_active = false;
        p.valid_to = Some(now - Duration::days(1));
        assert_eq!(check_redeemable(&p, now), Err(PromoRejection::Inactive));

        p.is_active = true;
        assert_eq!(check_redeemable(&p, now), Err(PromoRejection::Expired));

        p.valid_to = None;
        p.valid_from = Some(now + Duration::hours(1));
        assert_eq!(check_redeemable(&p, now), Err(PromoRejection::NotYetValid));

        p.valid_from = None;
        p.max_uses = Some(3);
        p.uses_count = 3;
        assert_eq!(
            check_redeemable(&p, now),
            Err(PromoRejection::UsageLimitReached)
        );

        p.uses_count = 2;
        assert_eq!(check_redeemable(&p, now), Ok(()));
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let now = Utc::now();
        let mut p = promo("EDGE", PromoDiscountType::Free, None);
        p.valid_from = Some(now);
        p.valid_to = Some(now);
        assert!(evaluate_promo_code(&p, 10_000, now).is_ok());
    }

    #[test]
    fn test_rejection_messages() {
        assert!(PromoRejection::Expired.message().contains("expired"));
        assert!(PromoRejection::UsageLimitReached.message().contains("usage limit"));
        assert_eq!(
            serde_json::to_value(PromoRejection::NotYetValid).unwrap(),
            serde_json::json!("not_yet_valid")
        );
    }
}
