//! Agency settings handlers

use crate::dto::{SettingsMessageResponse, SettingsResponse, UpdateSettingsRequest};
use actix_web::{web, HttpResponse};
use lorry_auth::{AdminUser, AuthenticatedUser};
use lorry_core::AppError;
use lorry_services::SettingsService;
use std::sync::Arc;
use tracing::{instrument, warn};
use validator::Validate;

/// Current settings, created with defaults on first read
///
/// GET /api/settings
#[instrument(skip(settings, _user))]
pub async fn get_settings(
    settings: web::Data<Arc<SettingsService>>,
    _user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let current = settings.get().await?;
    Ok(HttpResponse::Ok().json(SettingsResponse::from(current)))
}

/// Replace the agency settings
///
/// PUT /api/settings
#[instrument(skip(settings, admin, req), fields(admin = %admin.username()))]
pub async fn update_settings(
    settings: web::Data<Arc<SettingsService>>,
    admin: AdminUser,
    req: web::Json<UpdateSettingsRequest>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    req.validate().map_err(|e| {
        warn!("Settings validation failed: {}", e);
        AppError::Validation("All fields are required".to_string())
    })?;

    let saved = settings.update(&admin.actor(), req.into_settings()?).await?;

    Ok(HttpResponse::Ok().json(SettingsMessageResponse {
        message: "Settings updated successfully".to_string(),
        settings: saved.into(),
    }))
}

/// Configure settings routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/settings")
            .route(web::get().to(get_settings))
            .route(web::put().to(update_settings)),
    );
}
