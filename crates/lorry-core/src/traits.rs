//! Common traits for repositories
//!
//! Defines the storage abstractions the services depend on. Implementations
//! live in `lorry-db` (PostgreSQL and in-memory).

use crate::error::AppError;
use crate::models::{
    Booking, BookingStats, BookingStatus, PaymentMethod, PaymentSetting, Settings, User, Vehicle,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Login accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Store a new user, assigning its id
    async fn create(&self, user: &User) -> Result<User, AppError>;

    /// Number of stored users
    async fn count(&self) -> Result<i64, AppError>;
}

/// The rentable fleet
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Vehicle>, AppError>;

    /// Find vehicle by its unique name
    async fn find_by_name(&self, name: &str) -> Result<Option<Vehicle>, AppError>;

    /// Whole fleet, in insertion order
    async fn list_all(&self) -> Result<Vec<Vehicle>, AppError>;

    /// Store a new vehicle, assigning its id
    async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError>;

    /// Replace everything but the name and creation time
    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError>;

    /// Remove a vehicle, returning whether it existed
    async fn delete(&self, id: i32) -> Result<bool, AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}

/// Bookings, addressed by their public code
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Store a new booking; a taken code yields `AppError::AlreadyExists`
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;

    /// Find booking by its public `LR...` code
    async fn find_by_code(&self, booking_code: &str) -> Result<Option<Booking>, AppError>;

    /// Bookings owned by a customer, newest first
    async fn list_by_customer(&self, customer_id: i32) -> Result<Vec<Booking>, AppError>;

    /// Every booking, newest first
    async fn list_recent(&self) -> Result<Vec<Booking>, AppError>;

    /// Whether any booking references the vehicle name
    async fn exists_for_vehicle(&self, vehicle_name: &str) -> Result<bool, AppError>;

    /// Set the status of a booking, returning the updated record
    async fn update_status(
        &self,
        booking_code: &str,
        status: BookingStatus,
    ) -> Result<Option<Booking>, AppError>;

    /// Counters per status and confirmed revenue
    async fn stats(&self) -> Result<BookingStats, AppError>;
}

/// Settings repository (single record)
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Current settings, if a record exists
    async fn get(&self) -> Result<Option<Settings>, AppError>;

    /// Insert or replace the settings record
    async fn upsert(&self, settings: &Settings) -> Result<Settings, AppError>;
}

/// Payment settings repository (one record per method)
#[async_trait]
pub trait PaymentSettingsRepository: Send + Sync {
    /// All configured methods
    async fn list(&self) -> Result<Vec<PaymentSetting>, AppError>;

    /// Find the configuration for one method
    async fn find(&self, method: PaymentMethod) -> Result<Option<PaymentSetting>, AppError>;

    /// Insert or replace the configuration of a method
    async fn upsert(&self, setting: &PaymentSetting) -> Result<PaymentSetting, AppError>;

    /// Number of configured methods
    async fn count(&self) -> Result<i64, AppError>;
}

/// The full set of repositories backing the application
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub payments: Arc<dyn PaymentSettingsRepository>,
}
