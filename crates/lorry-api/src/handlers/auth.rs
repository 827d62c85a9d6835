//! Authentication handlers

use crate::dto::{LoginRequest, LoginResponse};
use actix_web::{web, HttpResponse};
use lorry_core::AppError;
use lorry_services::AuthService;
use std::sync::Arc;
use tracing::{instrument, warn};
use validator::Validate;

/// Login endpoint
///
/// POST /api/login
#[instrument(skip(auth, req), fields(username = %req.username))]
pub async fn login(
    auth: web::Data<Arc<AuthService>>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Login validation failed: {}", e);
        AppError::Validation("Username and password are required".to_string())
    })?;

    let outcome = auth.login(&req.username, &req.password).await?;

    Ok(HttpResponse::Ok().json(LoginResponse::new(outcome.token, outcome.user)))
}

/// Configure authentication routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login));
}
