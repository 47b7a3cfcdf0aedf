use crate::error::AppError;
use crate::utils::{AuthenticatedUser, JwtService};
use actix_web::http::Method;
use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

const ADMIN_PREFIX: &str = "/api/admin/";

struct PublicPaths {
    exact_paths: Vec<&'static str>,
    prefix_paths: Vec<&'static str>,
    /// Public for GET only.
    read_only_prefixes: Vec<&'static str>,
}

impl PublicPaths {
    fn new() -> Self {
        Self {
            exact_paths: vec![
                "/swagger-ui",
                "/swagger-ui/",
                "/api-docs/openapi.json",
                "/api/promo-codes/validate",
            ],
            prefix_paths: vec!["/swagger-ui/", "/api-docs/"],
            read_only_prefixes: vec!["/api/movies/"],
        }
    }

    fn is_public(&self, method: &Method, path: &str) -> bool {
        if self.exact_paths.contains(&path) {
            return true;
        }
        if self
            .prefix_paths
            .iter()
            .any(|&prefix| path.starts_with(prefix))
        {
            return true;
        }
        *method == Method::GET
            && self
                .read_only_prefixes
                .iter()
                .any(|&prefix| path.starts_with(prefix))
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Verifies bearer tokens and puts the [`AuthenticatedUser`] into request
/// extensions. `/api/admin/*` additionally requires the admin role.
pub struct AuthMiddleware {
    jwt_service: JwtService,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
            public_paths: PublicPaths::new(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    jwt_service: JwtService,
    public_paths: PublicPaths,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // CORS preflight
        if req.method() == Method::OPTIONS {
            return Box::pin(self.service.call(req));
        }

        // Routing matches on the percent-decoded path, so the gates must too.
        let path = req.match_info().as_str().to_owned();

        if self.public_paths.is_public(req.method(), &path) {
            return Box::pin(self.service.call(req));
        }

        let user = match bearer_token(&req) {
            Some(token) => match self.jwt_service.verify_access_token(token) {
                Ok(user) => user,
                Err(_) => {
                    let error = AppError::AuthError("Invalid access token".to_string());
                    return Box::pin(async move { Err(error.into()) });
                }
            },
            None => {
                let error = AppError::AuthError("Missing access token".to_string());
                return Box::pin(async move { Err(error.into()) });
            }
        };

        if path.starts_with(ADMIN_PREFIX) && !user.is_admin() {
            log::warn!("User {} denied access to {}", user.user_id, path);
            return Box::pin(async move { Err(AppError::Forbidden.into()) });
        }

        req.extensions_mut().insert::<AuthenticatedUser>(user);
        Box::pin(self.service.call(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::UserRole;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse, http::StatusCode, web};
    use uuid::Uuid;

    async fn whoami(req: actix_web::HttpRequest) -> HttpResponse {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => HttpResponse::Ok().body(user.user_id.to_string()),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    fn app_routes(cfg: &mut web::ServiceConfig) {
        cfg.route("/api/movies/{id}/pricing", web::get().to(whoami))
            .route("/api/rentals", web::get().to(whoami))
            .route("/api/admin/promo-codes", web::get().to(whoami));
    }

    fn token(jwt: &JwtService, role: UserRole) -> String {
        jwt.generate_access_token(Uuid::new_v4(), role, 3600)
            .unwrap()
    }

    #[actix_web::test]
    async fn test_public_and_protected_paths() {
        let jwt = JwtService::new("test-secret");
        let app = actix_test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt.clone()))
                .configure(app_routes),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/api/movies/5b1a/pricing")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = actix_test::TestRequest::get().uri("/api/rentals").to_request();
        let resp = actix_test::try_call_service(&app, req).await;
        let status = match resp {
            Ok(resp) => resp.status(),
            Err(e) => e.as_response_error().status_code(),
        };
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let req = actix_test::TestRequest::get()
            .uri("/api/rentals")
            .insert_header(("Authorization", format!("Bearer {}", token(&jwt, UserRole::User))))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_admin_paths_require_admin_role() {
        let jwt = JwtService::new("test-secret");
        let app = actix_test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt.clone()))
                .configure(app_routes),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/api/admin/promo-codes")
            .insert_header(("Authorization", format!("Bearer {}", token(&jwt, UserRole::User))))
            .to_request();
        let status = match actix_test::try_call_service(&app, req).await {
            Ok(resp) => resp.status(),
            Err(e) => e.as_response_error().status_code(),
        };
        assert_eq!(status, StatusCode::FORBIDDEN);

        let req = actix_test::TestRequest::get()
            .uri("/api/admin/promo-codes")
            .insert_header((
                "Authorization",
                format!("Bearer {}", token(&jwt, UserRole::Admin)),
            ))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_percent_encoded_admin_path_is_still_gated() {
        let jwt = JwtService::new("test-secret");
        let app = actix_test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt.clone()))
                .configure(app_routes),
        )
        .await;

        for uri in ["/api/%61dmin/promo-codes", "/api/adm%69n/promo-codes"] {
            let req = actix_test::TestRequest::get()
                .uri(uri)
                .insert_header(("Authorization", format!("Bearer {}", token(&jwt, UserRole::User))))
                .to_request();
            let status = match actix_test::try_call_service(&app, req).await {
                Ok(resp) => resp.status(),
                Err(e) => e.as_response_error().status_code(),
            };
            assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        }
    }

    #[test]
    fn test_public_paths() {
        let paths = PublicPaths::new();
        assert!(paths.is_public(&Method::GET, "/api/movies/abc/pricing"));
        assert!(!paths.is_public(&Method::POST, "/api/movies/abc/pricing"));
        assert!(paths.is_public(&Method::POST, "/api/promo-codes/validate"));
        assert!(paths.is_public(&Method::GET, "/swagger-ui/index.html"));
        assert!(!paths.is_public(&Method::GET, "/api/admin/promo-codes"));
        assert!(!paths.is_public(&Method::POST, "/api/rentals"));
    }
}
