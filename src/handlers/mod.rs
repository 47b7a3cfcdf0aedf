pub mod admin;
pub mod pricing;
pub mod promo_code;
pub mod rental;

pub use admin::admin_config;
pub use pricing::pricing_config;
pub use promo_code::promo_code_config;
pub use rental::rental_config;

use crate::error::{AppError, AppResult};
use crate::utils::AuthenticatedUser;
use actix_web::{HttpMessage, HttpRequest};

/// The caller the auth middleware attached to this request.
pub(crate) fn current_user(req: &HttpRequest) -> AppResult<AuthenticatedUser> {
    req.extensions()
        .get::<AuthenticatedUser>()
        .copied()
        .ok_or_else(|| AppError::AuthError("Missing access token".to_string()))
}

/// The caller, who must hold the admin role.
pub(crate) fn require_admin(req: &HttpRequest) -> AppResult<AuthenticatedUser> {
    let user = current_user(req)?;
    if !user.is_admin() {
        log::warn!("User {} denied admin action {}", user.user_id, req.path());
        return Err(AppError::Forbidden);
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::UserRole;
    use actix_web::test as actix_test;
    use uuid::Uuid;

    fn request_as(role: Option<UserRole>) -> HttpRequest {
        let req = actix_test::TestRequest::default().to_http_request();
        if let Some(role) = role {
            req.extensions_mut().insert(AuthenticatedUser {
                user_id: Uuid::new_v4(),
                role,
            });
        }
        req
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(&request_as(Some(UserRole::Admin))).is_ok());
        assert!(matches!(
            require_admin(&request_as(Some(UserRole::User))),
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            require_admin(&request_as(None)),
            Err(AppError::AuthError(_))
        ));
    }
}
