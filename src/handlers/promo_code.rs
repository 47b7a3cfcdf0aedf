use crate::models::*;
use crate::services::PromoCodeService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/promo-codes/validate",
    tag = "promo",
    request_body = ValidatePromoCodeRequest,
    responses(
        (status = 200, description = "Validation outcome; `valid: false` for unusable codes", body = PromoValidationResponse),
        (status = 400, description = "Movie has no pricing", body = ErrorResponse),
        (status = 404, description = "Movie not found", body = ErrorResponse)
    )
)]
pub async fn validate_promo_code(
    promo_code_service: web::Data<PromoCodeService>,
    request: web::Json<ValidatePromoCodeRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    match promo_code_service
        .validate_promo_code(&request.code, request.movie_id)
        .await
    {
        Ok(validation) => Ok(HttpResponse::Ok().json(json!({
            "validation": validation
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn promo_code_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/promo-codes").route("/validate", web::post().to(validate_promo_code)),
    );
}
