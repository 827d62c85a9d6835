//! API layer for the lorry rental backend
//!
//! actix-web handlers and DTOs. Everything is mounted under `/api`; the
//! binary adds static file serving for the frontend at `/`.

pub mod dto;
pub mod handlers;
pub mod state;

use actix_web::{web, HttpRequest};
use lorry_core::AppError;
use tracing::warn;

pub use state::ApiState;

use handlers::{
    configure_auth, configure_bookings, configure_health, configure_payment_settings,
    configure_settings, configure_stats, configure_vehicles,
};

/// Largest accepted JSON body; custom QR images arrive as data URLs
pub const JSON_PAYLOAD_LIMIT: usize = 2 * 1024 * 1024;

/// Mount every API route under `/api`
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(configure_health)
            .configure(configure_auth)
            .configure(configure_bookings)
            .configure(configure_vehicles)
            .configure(configure_settings)
            .configure(configure_payment_settings)
            .configure(configure_stats),
    );
}

/// JSON extractor settings that report malformed bodies as 400s in the API error format
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_PAYLOAD_LIMIT)
        .error_handler(|err, req: &HttpRequest| {
            warn!(path = %req.path(), "Rejected JSON body: {}", err);
            AppError::InvalidInput(err.to_string()).into()
        })
}
