//! Actix-web request extractors for authenticated callers
//!
//! A missing token yields 401, an invalid or expired one 403, and a
//! non-admin reaching an admin route 403.

use crate::jwt::JwtService;
use crate::Claims;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use lorry_core::error::AppError;
use lorry_core::models::{Actor, UserRole};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Extract the bearer token from a request
///
/// Checks the `Authorization: Bearer <token>` header first, then a cookie
/// named `token`.
fn extract_token_from_request(req: &HttpRequest) -> Option<String> {
    if let Some(auth_header) = req.headers().get("Authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                let token = token.trim();
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }

    req.cookie("token").map(|cookie| cookie.value().to_string())
}

/// Authenticated user extractor
///
/// # Examples
///
/// ```no_run
/// use actix_web::HttpResponse;
/// use lorry_auth::AuthenticatedUser;
///
/// async fn protected_handler(user: AuthenticatedUser) -> HttpResponse {
///     HttpResponse::Ok().json(serde_json::json!({
///         "username": user.claims.username,
///         "role": user.claims.role
///     }))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Verified token claims
    pub claims: Claims,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> i32 {
        self.claims.id
    }

    pub fn username(&self) -> &str {
        &self.claims.username
    }

    pub fn role(&self) -> UserRole {
        self.claims.role
    }

    pub fn is_admin(&self) -> bool {
        self.claims.is_admin()
    }

    /// Caller identity for service calls
    pub fn actor(&self) -> Actor {
        self.claims.actor()
    }

    fn authenticate(req: &HttpRequest) -> Result<Self, AppError> {
        let jwt_service = req
            .app_data::<web::Data<Arc<JwtService>>>()
            .ok_or_else(|| {
                error!("JwtService not found in app data");
                AppError::Internal("Authentication service not configured".to_string())
            })?;

        let token = extract_token_from_request(req).ok_or_else(|| {
            debug!("No authentication token found in request");
            AppError::MissingToken
        })?;

        let claims = jwt_service.validate_token(&token)?;

        debug!(
            user_id = claims.id,
            role = %claims.role,
            "User authenticated successfully"
        );

        Ok(AuthenticatedUser { claims })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::authenticate(req).map_err(actix_web::Error::from))
    }
}

/// Admin user extractor
///
/// Requires a valid token with the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

impl std::ops::Deref for AdminUser {
    type Target = AuthenticatedUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AdminUser {
    fn authorize(req: &HttpRequest) -> Result<Self, AppError> {
        let auth_user = AuthenticatedUser::authenticate(req)?;

        if !auth_user.is_admin() {
            warn!(
                username = %auth_user.username(),
                role = %auth_user.role(),
                "User attempted admin access without privileges"
            );
            return Err(AppError::Forbidden);
        }

        Ok(AdminUser(auth_user))
    }
}

impl FromRequest for AdminUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::authorize(req).map_err(actix_web::Error::from))
    }
}
