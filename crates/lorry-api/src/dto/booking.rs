//! Booking DTOs
//!
//! Request and response types for booking endpoints.

use chrono::{DateTime, Utc};
use lorry_core::models::{parse_booking_date, Booking, BookingStatus, NewBooking, RentalType};
use lorry_core::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::common::deserialize_optional_decimal;

const ALL_FIELDS_REQUIRED: &str = "All fields are required";

/// Booking form submitted by a customer
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub customer_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub contact: String,

    /// Rental date as entered on the form (ISO date or date-time)
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub date: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub location: String,

    /// Vehicle name
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub vehicle: String,

    /// `hourly` or `daily`
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub rental_type: String,

    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub duration: Option<Decimal>,

    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub payment_method: String,
}

impl CreateBookingRequest {
    /// Convert the form into a typed booking request
    pub fn into_new_booking(self) -> AppResult<NewBooking> {
        let duration = self
            .duration
            .ok_or_else(|| AppError::Validation(ALL_FIELDS_REQUIRED.to_string()))?;

        let rental_type = RentalType::from_str(&self.rental_type).ok_or_else(|| {
            AppError::Validation(format!("Invalid rental type: {}", self.rental_type))
        })?;

        Ok(NewBooking {
            customer_name: self.customer_name.trim().to_string(),
            contact: self.contact.trim().to_string(),
            date: parse_booking_date(&self.date)?,
            location: self.location.trim().to_string(),
            vehicle: self.vehicle,
            rental_type,
            duration,
            payment_method: self.payment_method,
        })
    }
}

/// Status change request
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

impl UpdateStatusRequest {
    pub fn parse_status(&self) -> AppResult<BookingStatus> {
        BookingStatus::from_str(&self.status)
            .ok_or_else(|| AppError::Validation("Invalid status".to_string()))
    }
}

/// Booking as returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub booking_id: String,
    pub customer_id: i32,
    pub customer_name: String,
    pub contact: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub vehicle: String,
    pub rental_type: RentalType,
    pub duration: Decimal,
    pub cost: Decimal,
    pub payment_method: String,
    pub status: BookingStatus,
    pub timestamp: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            booking_id: booking.booking_id,
            customer_id: booking.customer_id,
            customer_name: booking.customer_name,
            contact: booking.contact,
            date: booking.date,
            location: booking.location,
            vehicle: booking.vehicle,
            rental_type: booking.rental_type,
            duration: booking.duration,
            cost: booking.cost,
            payment_method: booking.payment_method,
            status: booking.status,
            timestamp: booking.timestamp,
        }
    }
}

/// Confirmation of a booking creation or status change
#[derive(Debug, Clone, Serialize)]
pub struct BookingMessageResponse {
    pub message: String,
    pub booking: BookingResponse,
}

impl BookingMessageResponse {
    pub fn new(message: impl Into<String>, booking: Booking) -> Self {
        Self {
            message: message.into(),
            booking: booking.into(),
        }
    }
}
