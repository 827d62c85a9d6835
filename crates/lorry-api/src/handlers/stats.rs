//! Admin dashboard handlers

use crate::dto::StatsResponse;
use actix_web::{web, HttpResponse};
use lorry_auth::AdminUser;
use lorry_core::AppError;
use lorry_services::BookingService;
use std::sync::Arc;
use tracing::instrument;

/// Booking counters and confirmed revenue
///
/// GET /api/admin/stats
#[instrument(skip(bookings, admin), fields(admin = %admin.username()))]
pub async fn admin_stats(
    bookings: web::Data<Arc<BookingService>>,
    admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let stats = bookings.stats(&admin.actor()).await?;
    Ok(HttpResponse::Ok().json(StatsResponse::from(stats)))
}

/// Configure admin routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/admin").route("/stats", web::get().to(admin_stats)));
}
