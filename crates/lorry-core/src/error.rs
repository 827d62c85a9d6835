//! Unified error handling for the lorry rental backend
//!
//! This module provides a single error type that covers every failure the
//! handlers can report, with automatic HTTP response mapping.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Message returned to callers for any 5xx error
const GENERIC_INTERNAL_MESSAGE: &str = "Internal server error";

/// Main application error type
///
/// All errors in the application should be converted to this type.
/// It implements `ResponseError` for automatic HTTP response generation.
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Database Errors ====================
    #[error("Database error: {0}")]
    Database(String),

    #[error("Database pool error: {0}")]
    Pool(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    // ==================== Authentication Errors ====================
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Access token required")]
    MissingToken,

    #[error("Invalid or expired token")]
    TokenExpired,

    #[error("Invalid or expired token: {0}")]
    InvalidToken(String),

    #[error("Admin access required")]
    Forbidden,

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    // ==================== Business Logic Errors ====================
    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("Cannot delete vehicle with existing bookings. Consider marking it as unavailable instead.")]
    VehicleInUse(String),

    #[error("Vehicle is not available for booking: {0}")]
    VehicleUnavailable(String),

    #[error("Cannot change booking status from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    // ==================== Validation Errors ====================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    // ==================== Resource Errors ====================
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    // ==================== Internal Errors ====================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request (conflicts are reported as bad requests too)
            AppError::Validation(_)
            | AppError::InvalidInput(_)
            | AppError::MissingField(_)
            | AppError::AlreadyExists(_)
            | AppError::VehicleInUse(_)
            | AppError::VehicleUnavailable(_)
            | AppError::InvalidStatusTransition { .. } => StatusCode::BAD_REQUEST,

            // 401 Unauthorized
            AppError::InvalidCredentials | AppError::MissingToken => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            AppError::Forbidden | AppError::InvalidToken(_) | AppError::TokenExpired => {
                StatusCode::FORBIDDEN
            }

            // 404 Not Found
            AppError::BookingNotFound(_) | AppError::VehicleNotFound(_) => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "database_error",
            AppError::Pool(_) => "pool_error",
            AppError::Migration(_) => "migration_error",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::MissingToken => "missing_token",
            AppError::TokenExpired => "token_expired",
            AppError::InvalidToken(_) => "invalid_token",
            AppError::Forbidden => "forbidden",
            AppError::PasswordHash(_) => "password_error",
            AppError::BookingNotFound(_) => "booking_not_found",
            AppError::VehicleNotFound(_) => "vehicle_not_found",
            AppError::VehicleInUse(_) => "vehicle_in_use",
            AppError::VehicleUnavailable(_) => "vehicle_unavailable",
            AppError::InvalidStatusTransition { .. } => "invalid_status_transition",
            AppError::Validation(_) => "validation_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::MissingField(_) => "missing_field",
            AppError::AlreadyExists(_) => "already_exists",
            AppError::Internal(_) => "internal_error",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
        }
    }

    /// Message safe to show to API callers
    ///
    /// Server-side failures never leak their detail.
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            GENERIC_INTERNAL_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            error!(code = self.error_code(), detail = %self, "Request failed");
        }

        let body = json!({
            "error": self.public_message(),
            "code": self.error_code(),
            "status": status.as_u16(),
        });

        HttpResponse::build(status).json(body)
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::InvalidToken("bad".to_string()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::BookingNotFound("LR1".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::VehicleInUse("TATA LPT".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Database("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_errors_name_the_resource() {
        let booking = AppError::BookingNotFound("LR1".to_string());
        let vehicle = AppError::VehicleNotFound("7".to_string());

        assert_eq!(booking.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(vehicle.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(booking.error_code(), "booking_not_found");
        assert_eq!(vehicle.error_code(), "vehicle_not_found");
        assert_eq!(vehicle.public_message(), "Vehicle not found: 7");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::InvalidCredentials.error_code(),
            "invalid_credentials"
        );
        assert_eq!(
            AppError::InvalidStatusTransition {
                from: "confirmed".to_string(),
                to: "pending".to_string()
            }
            .error_code(),
            "invalid_status_transition"
        );
    }

    #[test]
    fn test_internal_detail_not_exposed() {
        let err = AppError::Database("relation \"bookings\" does not exist".to_string());
        assert_eq!(err.public_message(), GENERIC_INTERNAL_MESSAGE);

        let err = AppError::Validation("All fields are required".to_string());
        assert!(err.public_message().contains("All fields are required"));
    }

    #[actix_web::test]
    async fn test_error_response_body() {
        let resp = AppError::Forbidden.error_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Admin access required");
        assert_eq!(json["code"], "forbidden");
        assert_eq!(json["status"], 403);
    }
}
