//! HTTP request handlers

pub mod auth;
pub mod booking;
pub mod health;
pub mod payment;
pub mod settings;
pub mod stats;
pub mod vehicle;

pub use auth::configure as configure_auth;
pub use booking::configure as configure_bookings;
pub use health::configure as configure_health;
pub use payment::configure as configure_payment_settings;
pub use settings::configure as configure_settings;
pub use stats::configure as configure_stats;
pub use vehicle::configure as configure_vehicles;
