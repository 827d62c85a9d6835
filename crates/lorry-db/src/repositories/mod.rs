//! Repository implementations
//!
//! Concrete PostgreSQL implementations of the repository traits defined in
//! lorry-core, using sqlx.

pub mod booking_repo;
pub mod payment_repo;
pub mod settings_repo;
pub mod user_repo;
pub mod vehicle_repo;

pub use booking_repo::PgBookingRepository;
pub use payment_repo::PgPaymentSettingsRepository;
pub use settings_repo::PgSettingsRepository;
pub use user_repo::PgUserRepository;
pub use vehicle_repo::PgVehicleRepository;

use lorry_core::traits::Repositories;
use sqlx::PgPool;
use std::sync::Arc;

/// Build the PostgreSQL-backed repository set sharing one pool
pub fn pg_repositories(pool: PgPool) -> Repositories {
    Repositories {
        users: Arc::new(PgUserRepository::new(pool.clone())),
        vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
        bookings: Arc::new(PgBookingRepository::new(pool.clone())),
        settings: Arc::new(PgSettingsRepository::new(pool.clone())),
        payments: Arc::new(PgPaymentSettingsRepository::new(pool)),
    }
}

/// Whether a sqlx error is a unique constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
