use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::PromoDiscountType;
use crate::handlers;
use crate::models::*;
use crate::utils::PromoRejection;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::pricing::get_movie_pricing,
        handlers::promo_code::validate_promo_code,
        handlers::rental::create_rental,
        handlers::rental::list_rentals,
        handlers::admin::list_tiers,
        handlers::admin::get_tier,
        handlers::admin::create_tier,
        handlers::admin::update_tier,
        handlers::admin::delete_tier,
        handlers::admin::assign_movie_tier,
        handlers::admin::list_promo_codes,
        handlers::admin::get_promo_code,
        handlers::admin::create_promo_code,
        handlers::admin::update_promo_code,
        handlers::admin::delete_promo_code,
    ),
    components(
        schemas(
            PromoDiscountType,
            PromoRejection,
            UnavailableReason,
            DisplayName,
            PricingView,
            MoviePricingResponse,
            PricingTierResponse,
            CreatePricingTierRequest,
            UpdatePricingTierRequest,
            AssignPricingTierRequest,
            MovieResponse,
            ValidatePromoCodeRequest,
            PromoValidation,
            PromoValidationResponse,
            PromoCodeResponse,
            CreatePromoCodeRequest,
            UpdatePromoCodeRequest,
            CreateRentalRequest,
            RentalResponse,
            CreateRentalResponse,
            ErrorResponse,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "pricing", description = "Movie pricing API"),
        (name = "promo", description = "Promo code API"),
        (name = "rental", description = "Rental checkout API"),
        (name = "admin", description = "Pricing and promo code administration"),
    ),
    info(
        title = "Movie Rental Backend API",
        version = "1.0.0",
        description = "Tiered pricing, promo codes and rentals"
    ),
    servers(
        (url = "/api", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
