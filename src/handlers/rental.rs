use crate::handlers::current_user;
use crate::models::*;
use crate::services::RentalService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/rentals",
    tag = "rental",
    request_body = CreateRentalRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Rental created", body = CreateRentalResponse),
        (status = 400, description = "Movie not for sale or promo code unusable", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn create_rental(
    rental_service: web::Data<RentalService>,
    req: HttpRequest,
    request: web::Json<CreateRentalRequest>,
) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match rental_service
        .create_rental(user.user_id, request.into_inner())
        .await
    {
        Ok(rental) => Ok(HttpResponse::Created().json(json!({ "rental": rental }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/rentals",
    tag = "rental",
    params(
        ("page" = Option<u64>, Query, description = "Page number, from 1"),
        ("perPage" = Option<u64>, Query, description = "Page size, at most 100")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The caller's rentals, newest first"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn list_rentals(
    rental_service: web::Data<RentalService>,
    req: HttpRequest,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match rental_service.list_rentals(user.user_id, &query).await {
        Ok(rentals) => Ok(HttpResponse::Ok().json(json!({ "rentals": rentals }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn rental_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/rentals")
            .route("", web::post().to(create_rental))
            .route("", web::get().to(list_rentals)),
    );
}
