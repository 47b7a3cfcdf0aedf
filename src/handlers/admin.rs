use crate::handlers::require_admin;
use crate::models::*;
use crate::services::{PricingService, PromoCodeService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

// Pricing tiers

#[utoipa::path(
    get,
    path = "/admin/pricing/tiers",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All tiers by sort order", body = [PricingTierResponse]),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    )
)]
pub async fn list_tiers(
    pricing_service: web::Data<PricingService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match pricing_service.list_tiers().await {
        Ok(tiers) => Ok(HttpResponse::Ok().json(json!({ "tiers": tiers }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/pricing/tiers/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Tier id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The tier", body = PricingTierResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_tier(
    pricing_service: web::Data<PricingService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match pricing_service.get_tier(path.into_inner()).await {
        Ok(tier) => Ok(HttpResponse::Ok().json(json!({ "tier": tier }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/pricing/tiers",
    tag = "admin",
    request_body = CreatePricingTierRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Tier created", body = PricingTierResponse),
        (status = 400, description = "Invalid tier", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    )
)]
pub async fn create_tier(
    pricing_service: web::Data<PricingService>,
    req: HttpRequest,
    request: web::Json<CreatePricingTierRequest>,
) -> Result<HttpResponse> {
    let admin = match require_admin(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match pricing_service
        .create_tier(admin.user_id, request.into_inner())
        .await
    {
        Ok(tier) => Ok(HttpResponse::Created().json(json!({ "tier": tier }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/admin/pricing/tiers/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Tier id")),
    request_body = UpdatePricingTierRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tier updated", body = PricingTierResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    )
)]
pub async fn update_tier(
    pricing_service: web::Data<PricingService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    request: web::Json<UpdatePricingTierRequest>,
) -> Result<HttpResponse> {
    let admin = match require_admin(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match pricing_service
        .update_tier(admin.user_id, path.into_inner(), request.into_inner())
        .await
    {
        Ok(tier) => Ok(HttpResponse::Ok().json(json!({ "tier": tier }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/pricing/tiers/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Tier id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Tier deleted; its movies are no longer for sale"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_tier(
    pricing_service: web::Data<PricingService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let admin = match require_admin(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match pricing_service
        .delete_tier(admin.user_id, path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/movies/{id}/pricing-tier",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Movie id")),
    request_body = AssignPricingTierRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tier assigned", body = MovieResponse),
        (status = 404, description = "Movie or tier not found", body = ErrorResponse)
    )
)]
pub async fn assign_movie_tier(
    pricing_service: web::Data<PricingService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    request: web::Json<AssignPricingTierRequest>,
) -> Result<HttpResponse> {
    let admin = match require_admin(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match pricing_service
        .assign_tier(admin.user_id, path.into_inner(), request.into_inner())
        .await
    {
        Ok(movie) => Ok(HttpResponse::Ok().json(json!({ "movie": movie }))),
        Err(e) => Ok(e.error_response()),
    }
}

// Promo codes

#[utoipa::path(
    get,
    path = "/admin/promo-codes",
    tag = "admin",
    params(
        ("page" = Option<u64>, Query, description = "Page number, from 1"),
        ("perPage" = Option<u64>, Query, description = "Page size, at most 100"),
        ("active" = Option<bool>, Query, description = "Only active or inactive codes")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Promo codes, newest first"),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    )
)]
pub async fn list_promo_codes(
    promo_code_service: web::Data<PromoCodeService>,
    req: HttpRequest,
    query: web::Query<PromoCodeQuery>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match promo_code_service.list_promo_codes(&query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "promoCodes": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/promo-codes/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Promo code id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The promo code", body = PromoCodeResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_promo_code(
    promo_code_service: web::Data<PromoCodeService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match promo_code_service.get_promo_code(path.into_inner()).await {
        Ok(promo) => Ok(HttpResponse::Ok().json(json!({ "promoCode": promo }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/promo-codes",
    tag = "admin",
    request_body = CreatePromoCodeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Promo code created", body = PromoCodeResponse),
        (status = 400, description = "Invalid promo code", body = ErrorResponse),
        (status = 409, description = "Code already exists", body = ErrorResponse)
    )
)]
pub async fn create_promo_code(
    promo_code_service: web::Data<PromoCodeService>,
    req: HttpRequest,
    request: web::Json<CreatePromoCodeRequest>,
) -> Result<HttpResponse> {
    let admin = match require_admin(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match promo_code_service
        .create_promo_code(admin.user_id, request.into_inner())
        .await
    {
        Ok(promo) => Ok(HttpResponse::Created().json(json!({ "promoCode": promo }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/admin/promo-codes/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Promo code id")),
    request_body = UpdatePromoCodeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Promo code updated", body = PromoCodeResponse),
        (status = 400, description = "Invalid change", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_promo_code(
    promo_code_service: web::Data<PromoCodeService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    request: web::Json<UpdatePromoCodeRequest>,
) -> Result<HttpResponse> {
    let admin = match require_admin(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match promo_code_service
        .update_promo_code(admin.user_id, path.into_inner(), request.into_inner())
        .await
    {
        Ok(promo) => Ok(HttpResponse::Ok().json(json!({ "promoCode": promo }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/promo-codes/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Promo code id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Promo code deleted"),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 409, description = "Code has been redeemed", body = ErrorResponse)
    )
)]
pub async fn delete_promo_code(
    promo_code_service: web::Data<PromoCodeService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let admin = match require_admin(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match promo_code_service
        .delete_promo_code(admin.user_id, path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/pricing/tiers", web::get().to(list_tiers))
            .route("/pricing/tiers", web::post().to(create_tier))
            .route("/pricing/tiers/{id}", web::get().to(get_tier))
            .route("/pricing/tiers/{id}", web::patch().to(update_tier))
            .route("/pricing/tiers/{id}", web::delete().to(delete_tier))
            .route("/movies/{id}/pricing-tier", web::put().to(assign_movie_tier))
            .route("/promo-codes", web::get().to(list_promo_codes))
            .route("/promo-codes", web::post().to(create_promo_code))
            .route("/promo-codes/{id}", web::get().to(get_promo_code))
            .route("/promo-codes/{id}", web::patch().to(update_promo_code))
            .route("/promo-codes/{id}", web::delete().to(delete_promo_code)),
    );
}
