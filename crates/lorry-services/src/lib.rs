//! Business logic services for the lorry rental backend
//!
//! Services own `Arc<dyn ...Repository>` handles and receive the caller as an
//! [`Actor`](lorry_core::models::Actor), so authorisation rules live next to
//! the business rules rather than only in the HTTP layer.
//!
//! - `AuthService` - credential check and token issuance
//! - `BookingService` - booking creation with frozen pricing, listing, status changes, stats
//! - `VehicleService` - fleet catalogue and administration
//! - `SettingsService` - agency settings and payment methods
//! - `seed` - default data for a fresh store

pub mod auth_service;
pub mod booking_service;
pub mod seed;
pub mod settings_service;
pub mod vehicle_service;

pub use auth_service::{AuthService, LoginOutcome};
pub use booking_service::BookingService;
pub use seed::{seed_defaults, SeedReport};
pub use settings_service::{PaymentMethodInput, PaymentSettingsUpdate, SettingsService};
pub use vehicle_service::{NewVehicle, VehicleService};

use lorry_core::models::Actor;
use lorry_core::{AppError, AppResult};
use tracing::warn;

/// Reject callers without the admin role
pub(crate) fn require_admin(actor: &Actor, action: &str) -> AppResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        warn!(
            user_id = actor.user_id,
            username = %actor.username,
            action,
            "Admin action attempted by non-admin"
        );
        Err(AppError::Forbidden)
    }
}

/// Business logic constants
pub mod constants {
    /// Attempts at finding a free booking code when two bookings land in the same millisecond
    pub const BOOKING_CODE_ATTEMPTS: i64 = 5;
}
