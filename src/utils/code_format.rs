use crate::error::{AppError, AppResult};
use regex::Regex;
use std::sync::LazyLock;

static PROMO_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9_-]{3,32}$").expect("promo code pattern"));

static TIER_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]{2,64}$").expect("tier name pattern"));

/// Codes are matched case-insensitively; storage and lookup use uppercase.
pub fn normalize_promo_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Validates an already normalized promo code.
pub fn validate_promo_code_format(code: &str) -> AppResult<()> {
    if !PROMO_CODE_RE.is_match(code) {
        return Err(AppError::ValidationError(
            "Promo code must be 3-32 characters of A-Z, 0-9, '_' or '-'".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_tier_name(name: &str) -> AppResult<()> {
    if !TIER_NAME_RE.is_match(name) {
        return Err(AppError::ValidationError(
            "Tier name must be 2-64 characters of a-z, 0-9, '_' or '-'".to_string(),
        ));
    }
    Ok(())
}
