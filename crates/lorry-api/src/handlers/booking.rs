//! Booking handlers
//!
//! Customers create and list their own bookings; admins see every booking and
//! move bookings through their status lifecycle.

use crate::dto::{BookingMessageResponse, BookingResponse, CreateBookingRequest, UpdateStatusRequest};
use actix_web::{web, HttpResponse};
use lorry_auth::{AdminUser, AuthenticatedUser};
use lorry_core::AppError;
use lorry_services::BookingService;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use validator::Validate;

/// List bookings visible to the caller, newest first
///
/// GET /api/bookings
#[instrument(skip(bookings, user), fields(user_id = user.user_id()))]
pub async fn list_bookings(
    bookings: web::Data<Arc<BookingService>>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let list = bookings.list_bookings(&user.actor()).await?;
    debug!("Returning {} bookings", list.len());

    let response: Vec<BookingResponse> = list.into_iter().map(BookingResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// Create a booking priced with the current settings
///
/// POST /api/bookings
#[instrument(skip(bookings, user, req), fields(user_id = user.user_id()))]
pub async fn create_booking(
    bookings: web::Data<Arc<BookingService>>,
    user: AuthenticatedUser,
    req: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    req.validate().map_err(|e| {
        warn!("Booking validation failed: {}", e);
        AppError::Validation("All fields are required".to_string())
    })?;

    let booking = bookings
        .create_booking(&user.actor(), req.into_new_booking()?)
        .await?;

    Ok(HttpResponse::Created().json(BookingMessageResponse::new(
        "Booking created successfully",
        booking,
    )))
}

/// Change the status of a booking by its public code
///
/// PUT /api/bookings/{id}/status
#[instrument(skip(bookings, admin, req), fields(admin = %admin.username()))]
pub async fn update_booking_status(
    bookings: web::Data<Arc<BookingService>>,
    admin: AdminUser,
    path: web::Path<String>,
    req: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let booking_code = path.into_inner();
    let status = req.parse_status()?;

    let booking = bookings
        .update_status(&admin.actor(), &booking_code, status)
        .await?;

    Ok(HttpResponse::Ok().json(BookingMessageResponse::new(
        "Booking status updated successfully",
        booking,
    )))
}

/// Configure booking routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bookings")
            .route("", web::get().to(list_bookings))
            .route("", web::post().to(create_booking))
            .route("/{id}/status", web::put().to(update_booking_status)),
    );
}
