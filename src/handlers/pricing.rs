use crate::models::*;
use crate::services::PricingService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/movies/{movie_id}/pricing",
    tag = "pricing",
    params(
        ("movie_id" = Uuid, Path, description = "Movie id")
    ),
    responses(
        (status = 200, description = "Pricing for the movie", body = MoviePricingResponse),
        (status = 404, description = "Movie not found", body = ErrorResponse)
    )
)]
pub async fn get_movie_pricing(
    pricing_service: web::Data<PricingService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match pricing_service.resolve_pricing(path.into_inner()).await {
        Ok(pricing) => Ok(HttpResponse::Ok().json(json!({
            "pricing": PricingView::from(pricing)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn pricing_config(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/movies/{movie_id}/pricing",
        web::get().to(get_movie_pricing),
    );
}
