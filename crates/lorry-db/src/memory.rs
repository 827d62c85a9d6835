//! In-memory repositories
//!
//! Process-local implementations of the repository traits, backed by
//! `tokio::sync::RwLock` maps. Used by the `memory` storage backend and by
//! the service and API tests. Data is lost on restart.

use async_trait::async_trait;
use chrono::Utc;
use lorry_core::{
    models::{
        Booking, BookingStats, BookingStatus, PaymentMethod, PaymentSetting, Settings, User,
        Vehicle,
    },
    traits::{
        BookingRepository, PaymentSettingsRepository, Repositories, SettingsRepository,
        UserRepository, VehicleRepository,
    },
    AppError, AppResult,
};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Build a repository set where every repository lives in memory
pub fn memory_repositories() -> Repositories {
    Repositories {
        users: Arc::new(MemoryUserRepository::new()),
        vehicles: Arc::new(MemoryVehicleRepository::new()),
        bookings: Arc::new(MemoryBookingRepository::new()),
        settings: Arc::new(MemorySettingsRepository::new()),
        payments: Arc::new(MemoryPaymentSettingsRepository::new()),
    }
}

// ==================== Users ====================

/// Users keyed by serial id
struct UserTable {
    next_id: i32,
    rows: BTreeMap<i32, User>,
}

pub struct MemoryUserRepository {
    data: Arc<RwLock<UserTable>>,
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(UserTable {
                next_id: 1,
                rows: BTreeMap::new(),
            })),
        }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, entity: &User) -> AppResult<User> {
        let mut table = self.data.write().await;
        if table.rows.values().any(|u| u.username == entity.username) {
            return Err(AppError::AlreadyExists(format!(
                "User {} already exists",
                entity.username
            )));
        }

        let user = User {
            id: table.next_id,
            ..entity.clone()
        };
        table.next_id += 1;
        table.rows.insert(user.id, user.clone());

        debug!("Stored user {} in memory", user.username);
        Ok(user)
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.data.read().await.rows.len() as i64)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let table = self.data.read().await;
        Ok(table.rows.values().find(|u| u.username == username).cloned())
    }
}

// ==================== Vehicles ====================

struct VehicleTable {
    next_id: i32,
    rows: BTreeMap<i32, Vehicle>,
}

pub struct MemoryVehicleRepository {
    data: Arc<RwLock<VehicleTable>>,
}

impl Default for MemoryVehicleRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryVehicleRepository {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(VehicleTable {
                next_id: 1,
                rows: BTreeMap::new(),
            })),
        }
    }
}

#[async_trait]
impl VehicleRepository for MemoryVehicleRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Vehicle>> {
        Ok(self.data.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, entity: &Vehicle) -> AppResult<Vehicle> {
        let mut table = self.data.write().await;
        if table.rows.values().any(|v| v.name == entity.name) {
            return Err(AppError::AlreadyExists(
                "Vehicle with this name already exists".to_string(),
            ));
        }

        let vehicle = Vehicle {
            id: table.next_id,
            ..entity.clone()
        };
        table.next_id += 1;
        table.rows.insert(vehicle.id, vehicle.clone());

        debug!("Stored vehicle {} in memory", vehicle.name);
        Ok(vehicle)
    }

    async fn update(&self, entity: &Vehicle) -> AppResult<Vehicle> {
        let mut table = self.data.write().await;
        match table.rows.get_mut(&entity.id) {
            Some(existing) => {
                // Name stays as stored
                let updated = Vehicle {
                    name: existing.name.clone(),
                    created_at: existing.created_at,
                    ..entity.clone()
                };
                *existing = updated.clone();
                Ok(updated)
            }
            None => Err(AppError::VehicleNotFound(entity.id.to_string())),
        }
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        Ok(self.data.write().await.rows.remove(&id).is_some())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.data.read().await.rows.len() as i64)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Vehicle>> {
        let table = self.data.read().await;
        Ok(table.rows.values().find(|v| v.name == name).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<Vehicle>> {
        Ok(self.data.read().await.rows.values().cloned().collect())
    }
}

// ==================== Bookings ====================

/// Bookings in insertion order
pub struct MemoryBookingRepository {
    data: Arc<RwLock<Vec<Booking>>>,
}

impl Default for MemoryBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBookingRepository {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Newest first; later inserts win ties on the timestamp
    fn newest_first<'a>(rows: impl DoubleEndedIterator<Item = &'a Booking>) -> Vec<Booking> {
        let mut bookings: Vec<Booking> = rows.rev().cloned().collect();
        bookings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        bookings
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    async fn create(&self, entity: &Booking) -> AppResult<Booking> {
        let mut rows = self.data.write().await;
        if rows.iter().any(|b| b.booking_id == entity.booking_id) {
            return Err(AppError::AlreadyExists(format!(
                "Booking {} already exists",
                entity.booking_id
            )));
        }

        rows.push(entity.clone());
        debug!("Stored booking {} in memory", entity.booking_id);
        Ok(entity.clone())
    }

    async fn find_by_code(&self, booking_code: &str) -> AppResult<Option<Booking>> {
        let rows = self.data.read().await;
        Ok(rows.iter().find(|b| b.booking_id == booking_code).cloned())
    }

    async fn list_by_customer(&self, customer_id: i32) -> AppResult<Vec<Booking>> {
        let rows = self.data.read().await;
        Ok(Self::newest_first(
            rows.iter().filter(|b| b.customer_id == customer_id),
        ))
    }

    async fn list_recent(&self) -> AppResult<Vec<Booking>> {
        let rows = self.data.read().await;
        Ok(Self::newest_first(rows.iter()))
    }

    async fn exists_for_vehicle(&self, vehicle_name: &str) -> AppResult<bool> {
        let rows = self.data.read().await;
        Ok(rows.iter().any(|b| b.vehicle == vehicle_name))
    }

    async fn update_status(
        &self,
        booking_code: &str,
        status: BookingStatus,
    ) -> AppResult<Option<Booking>> {
        let mut rows = self.data.write().await;
        Ok(rows
            .iter_mut()
            .find(|b| b.booking_id == booking_code)
            .map(|booking| {
                booking.status = status;
                booking.clone()
            }))
    }

    async fn stats(&self) -> AppResult<BookingStats> {
        let rows = self.data.read().await;
        let count = |status: BookingStatus| rows.iter().filter(|b| b.status == status).count() as i64;

        Ok(BookingStats {
            total_bookings: rows.len() as i64,
            pending_bookings: count(BookingStatus::Pending),
            confirmed_bookings: count(BookingStatus::Confirmed),
            cancelled_bookings: count(BookingStatus::Cancelled),
            total_revenue: rows
                .iter()
                .filter(|b| b.is_revenue())
                .map(|b| b.cost)
                .sum::<Decimal>(),
        })
    }
}

// ==================== Settings ====================

pub struct MemorySettingsRepository {
    data: Arc<RwLock<Option<Settings>>>,
}

impl Default for MemorySettingsRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySettingsRepository {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(None)),
        }
    }
}

#[async_trait]
impl SettingsRepository for MemorySettingsRepository {
    async fn get(&self) -> AppResult<Option<Settings>> {
        Ok(self.data.read().await.clone())
    }

    async fn upsert(&self, settings: &Settings) -> AppResult<Settings> {
        let stored = Settings {
            updated_at: Utc::now(),
            ..settings.clone()
        };
        *self.data.write().await = Some(stored.clone());
        Ok(stored)
    }
}

// ==================== Payment settings ====================

pub struct MemoryPaymentSettingsRepository {
    data: Arc<RwLock<HashMap<PaymentMethod, PaymentSetting>>>,
}

impl Default for MemoryPaymentSettingsRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPaymentSettingsRepository {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl PaymentSettingsRepository for MemoryPaymentSettingsRepository {
    async fn list(&self) -> AppResult<Vec<PaymentSetting>> {
        let data = self.data.read().await;
        let mut settings: Vec<PaymentSetting> = data.values().cloned().collect();
        settings.sort_by_key(|s| s.method);
        Ok(settings)
    }

    async fn find(&self, method: PaymentMethod) -> AppResult<Option<PaymentSetting>> {
        Ok(self.data.read().await.get(&method).cloned())
    }

    async fn upsert(&self, setting: &PaymentSetting) -> AppResult<PaymentSetting> {
        let stored = PaymentSetting {
            updated_at: Utc::now(),
            ..setting.clone()
        };
        self.data
            .write()
            .await
            .insert(stored.method, stored.clone());
        Ok(stored)
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.data.read().await.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use lorry_core::models::{RentalType, UserRole};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn booking(code: &str, customer_id: i32, vehicle: &str, status: BookingStatus) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            booking_id: code.to_string(),
            customer_id,
            customer_name: "Nishanth".to_string(),
            contact: "9876543210".to_string(),
            date: Utc::now(),
            location: "Pollachi".to_string(),
            vehicle: vehicle.to_string(),
            rental_type: RentalType::Daily,
            duration: dec!(2),
            cost: dec!(15900),
            payment_method: "gpay".to_string(),
            status,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_user_ids_and_unique_username() {
        let repo = MemoryUserRepository::new();
        let user = User {
            username: "nishanth".to_string(),
            role: UserRole::Customer,
            ..Default::default()
        };

        let first = repo.create(&user).await.unwrap();
        assert_eq!(first.id, 1);
        assert!(matches!(
            repo.create(&user).await,
            Err(AppError::AlreadyExists(_))
        ));
        assert_eq!(
            repo.find_by_username("nishanth").await.unwrap().map(|u| u.id),
            Some(1)
        );
    }

    #[tokio::test]
    async fn test_vehicle_update_keeps_name() {
        let repo = MemoryVehicleRepository::new();
        let created = repo
            .create(&Vehicle {
                name: "TATA LPT".to_string(),
                price_day: dec!(7000),
                price_hour: dec!(300),
                ..Default::default()
            })
            .await
            .unwrap();

        let updated = repo
            .update(&Vehicle {
                name: "Renamed".to_string(),
                price_day: dec!(7500),
                ..created.clone()
            })
            .await
            .unwrap();

        assert_eq!(updated.name, "TATA LPT");
        assert_eq!(updated.price_day, dec!(7500));
    }

    #[tokio::test]
    async fn test_fleet_lifecycle_through_repository_set() {
        let repos = memory_repositories();
        let vehicle = repos
            .vehicles
            .create(&Vehicle {
                name: "Eicher Pro 3019".to_string(),
                price_day: dec!(5000),
                price_hour: dec!(200),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(repos.vehicles.count().await.unwrap(), 1);
        assert_eq!(
            repos.vehicles.find_by_id(vehicle.id).await.unwrap().map(|v| v.name),
            Some("Eicher Pro 3019".to_string())
        );
        assert!(repos.vehicles.delete(vehicle.id).await.unwrap());
        assert!(!repos.vehicles.delete(vehicle.id).await.unwrap());
        assert!(repos.vehicles.find_by_id(vehicle.id).await.unwrap().is_none());
        assert!(matches!(
            repos.vehicles.update(&vehicle).await,
            Err(AppError::VehicleNotFound(_))
        ));
        assert_eq!(repos.users.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bookings_newest_first() {
        let repo = MemoryBookingRepository::new();
        let mut older = booking("LR1", 1, "TATA LPT", BookingStatus::Pending);
        older.timestamp = Utc::now() - Duration::hours(1);
        let newer = booking("LR2", 1, "TATA 407", BookingStatus::Pending);
        let other = booking("LR3", 2, "TATA 407", BookingStatus::Pending);

        repo.create(&older).await.unwrap();
        repo.create(&newer).await.unwrap();
        repo.create(&other).await.unwrap();

        let mine: Vec<String> = repo
            .list_by_customer(1)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.booking_id)
            .collect();
        assert_eq!(mine, vec!["LR2", "LR1"]);
        assert_eq!(repo.list_recent().await.unwrap().len(), 3);
        assert!(repo.exists_for_vehicle("TATA LPT").await.unwrap());
        assert!(!repo.exists_for_vehicle("Volvo FM 400 HD").await.unwrap());
    }

    #[tokio::test]
    async fn test_stats_sum_confirmed_revenue() {
        let repo = MemoryBookingRepository::new();
        repo.create(&booking("LR1", 1, "A", BookingStatus::Confirmed))
            .await
            .unwrap();
        repo.create(&booking("LR2", 1, "A", BookingStatus::Confirmed))
            .await
            .unwrap();
        repo.create(&booking("LR3", 1, "A", BookingStatus::Pending))
            .await
            .unwrap();
        repo.create(&booking("LR4", 1, "A", BookingStatus::Cancelled))
            .await
            .unwrap();

        let stats = repo.stats().await.unwrap();
        assert_eq!(stats.total_bookings, 4);
        assert_eq!(stats.pending_bookings, 1);
        assert_eq!(stats.confirmed_bookings, 2);
        assert_eq!(stats.cancelled_bookings, 1);
        assert_eq!(stats.total_revenue, dec!(31800));
    }

    #[tokio::test]
    async fn test_empty_stats() {
        let stats = MemoryBookingRepository::new().stats().await.unwrap();
        assert_eq!(stats, BookingStats::default());
    }

    #[tokio::test]
    async fn test_update_status_by_code() {
        let repo = MemoryBookingRepository::new();
        repo.create(&booking("LR9", 1, "A", BookingStatus::Pending))
            .await
            .unwrap();

        let updated = repo
            .update_status("LR9", BookingStatus::Confirmed)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, BookingStatus::Confirmed);
        assert_eq!(updated.cost, dec!(15900));
        assert!(repo
            .update_status("LR404", BookingStatus::Confirmed)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_payment_settings_upsert() {
        let repo = MemoryPaymentSettingsRepository::new();
        for method in PaymentMethod::ALL {
            repo.upsert(&PaymentSetting::default_for(method)).await.unwrap();
        }
        repo.upsert(&PaymentSetting::new(PaymentMethod::Gpay, "new@okaxis", None))
            .await
            .unwrap();

        assert_eq!(repo.count().await.unwrap(), 3);
        let gpay = repo.find(PaymentMethod::Gpay).await.unwrap().unwrap();
        assert_eq!(gpay.upi_id, "new@okaxis");
    }
}
