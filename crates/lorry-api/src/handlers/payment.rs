//! Payment settings handlers

use crate::dto::{payment_settings_map, MessageResponse, UpdatePaymentSettingsRequest};
use actix_web::{web, HttpResponse};
use lorry_auth::{AdminUser, AuthenticatedUser};
use lorry_core::AppError;
use lorry_services::SettingsService;
use std::sync::Arc;
use tracing::instrument;

/// Payment methods keyed by name
///
/// GET /api/payment-settings
#[instrument(skip(settings, _user))]
pub async fn get_payment_settings(
    settings: web::Data<Arc<SettingsService>>,
    _user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let list = settings.payment_settings().await?;
    Ok(HttpResponse::Ok().json(payment_settings_map(list)))
}

/// Replace all payment methods
///
/// PUT /api/payment-settings
#[instrument(skip(settings, admin, req), fields(admin = %admin.username()))]
pub async fn update_payment_settings(
    settings: web::Data<Arc<SettingsService>>,
    admin: AdminUser,
    req: web::Json<UpdatePaymentSettingsRequest>,
) -> Result<HttpResponse, AppError> {
    let update = req.into_inner().into_update()?;
    settings
        .update_payment_settings(&admin.actor(), update)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "Payment settings updated successfully",
    )))
}

/// Configure payment settings routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/payment-settings")
            .route(web::get().to(get_payment_settings))
            .route(web::put().to(update_payment_settings)),
    );
}
