//! Booking service
//!
//! Prices bookings at creation from the vehicle's rate and a snapshot of the
//! current settings, then guards the status lifecycle.

use chrono::{DateTime, Duration, Utc};
use lorry_core::{
    config::BookingConfig,
    models::{
        booking_code, Actor, Booking, BookingStats, BookingStatus, NewBooking, Settings,
        StatusPolicy,
    },
    pricing::{quote, CostBreakdown},
    traits::{BookingRepository, Repositories, SettingsRepository, VehicleRepository},
    AppError, AppResult,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::constants::BOOKING_CODE_ATTEMPTS;
use crate::require_admin;

/// Booking lifecycle service
pub struct BookingService {
    vehicles: Arc<dyn VehicleRepository>,
    bookings: Arc<dyn BookingRepository>,
    settings: Arc<dyn SettingsRepository>,
    policy: StatusPolicy,
    reject_unavailable: bool,
}

impl BookingService {
    /// Create a new booking service
    pub fn new(repos: &Repositories, config: &BookingConfig) -> Self {
        Self {
            vehicles: repos.vehicles.clone(),
            bookings: repos.bookings.clone(),
            settings: repos.settings.clone(),
            policy: StatusPolicy::from_strict_flag(config.strict_status_transitions),
            reject_unavailable: config.reject_unavailable_vehicles,
        }
    }

    /// Status policy in force
    pub fn policy(&self) -> StatusPolicy {
        self.policy
    }

    /// Current settings, falling back to the defaults when none are stored
    async fn current_settings(&self) -> AppResult<Settings> {
        match self.settings.get().await? {
            Some(settings) => Ok(settings),
            None => {
                warn!("No settings stored, pricing with defaults");
                Ok(Settings::default())
            }
        }
    }

    /// Price a booking request without storing it
    #[instrument(skip(self, request), fields(vehicle = %request.vehicle))]
    pub async fn quote(&self, request: &NewBooking) -> AppResult<CostBreakdown> {
        let vehicle = self
            .vehicles
            .find_by_name(&request.vehicle)
            .await?
            .ok_or_else(|| {
                warn!("Booking requested for unknown vehicle: {}", request.vehicle);
                AppError::InvalidInput("Selected vehicle not found".to_string())
            })?;

        if self.reject_unavailable && !vehicle.available {
            warn!("Booking requested for unavailable vehicle: {}", vehicle.name);
            return Err(AppError::VehicleUnavailable(vehicle.name));
        }

        let pricing = self.current_settings().await?.pricing();
        let cost = quote(
            vehicle.rates(),
            request.rental_type,
            request.duration,
            &pricing,
        )?;

        debug!(
            base = %cost.base,
            tax = %cost.tax,
            maintenance_fee = %cost.maintenance_fee,
            total = %cost.total,
            "Booking priced"
        );

        Ok(cost)
    }

    /// Create a pending booking for the caller with its cost frozen
    #[instrument(skip(self, request), fields(user_id = actor.user_id, vehicle = %request.vehicle))]
    pub async fn create_booking(&self, actor: &Actor, request: NewBooking) -> AppResult<Booking> {
        self.create_booking_at(actor, request, Utc::now()).await
    }

    /// Create a booking stamped with `created_at`
    ///
    /// The code is derived from the timestamp; when it is taken, the next
    /// millisecond is tried, up to `BOOKING_CODE_ATTEMPTS` codes.
    pub(crate) async fn create_booking_at(
        &self,
        actor: &Actor,
        request: NewBooking,
        created_at: DateTime<Utc>,
    ) -> AppResult<Booking> {
        let cost = self.quote(&request).await?;

        let mut booking = Booking {
            id: Uuid::new_v4(),
            booking_id: booking_code(created_at),
            customer_id: actor.user_id,
            customer_name: request.customer_name,
            contact: request.contact,
            date: request.date,
            location: request.location,
            vehicle: request.vehicle,
            rental_type: request.rental_type,
            duration: request.duration,
            cost: cost.total,
            payment_method: request.payment_method,
            status: BookingStatus::Pending,
            timestamp: created_at,
        };

        for attempt in 1..=BOOKING_CODE_ATTEMPTS {
            match self.bookings.create(&booking).await {
                Ok(stored) => {
                    info!(
                        booking_id = %stored.booking_id,
                        cost = %stored.cost,
                        "Booking created"
                    );
                    return Ok(stored);
                }
                Err(AppError::AlreadyExists(_)) => {
                    debug!("Booking code {} taken, retrying", booking.booking_id);
                    booking.booking_id = booking_code(created_at + Duration::milliseconds(attempt));
                }
                Err(e) => return Err(e),
            }
        }

        warn!("No free booking code near {}", created_at);
        Err(AppError::Internal(
            "Could not allocate a booking code".to_string(),
        ))
    }

    /// Bookings visible to the caller, newest first
    ///
    /// Customers see their own bookings, admins see every booking.
    #[instrument(skip(self), fields(user_id = actor.user_id))]
    pub async fn list_bookings(&self, actor: &Actor) -> AppResult<Vec<Booking>> {
        let bookings = if actor.is_admin() {
            self.bookings.list_recent().await?
        } else {
            self.bookings.list_by_customer(actor.user_id).await?
        };

        debug!("Returning {} bookings", bookings.len());
        Ok(bookings)
    }

    /// Change the status of a booking identified by its public code
    #[instrument(skip(self), fields(user_id = actor.user_id))]
    pub async fn update_status(
        &self,
        actor: &Actor,
        booking_code: &str,
        status: BookingStatus,
    ) -> AppResult<Booking> {
        require_admin(actor, "update booking status")?;

        let booking = self
            .bookings
            .find_by_code(booking_code)
            .await?
            .ok_or_else(|| AppError::BookingNotFound(booking_code.to_string()))?;

        let next = booking.status.transition_to(status, self.policy)?;

        let updated = self
            .bookings
            .update_status(booking_code, next)
            .await?
            .ok_or_else(|| AppError::BookingNotFound(booking_code.to_string()))?;

        info!(
            booking_id = %updated.booking_id,
            from = %booking.status,
            to = %updated.status,
            "Booking status updated"
        );

        Ok(updated)
    }

    /// Dashboard counters
    #[instrument(skip(self), fields(user_id = actor.user_id))]
    pub async fn stats(&self, actor: &Actor) -> AppResult<BookingStats> {
        require_admin(actor, "view booking stats")?;
        self.bookings.stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use lorry_core::models::{RentalType, UserRole, Vehicle};
    use lorry_db::memory_repositories;
    use rust_decimal_macros::dec;

    fn customer() -> Actor {
        Actor::new(1, "nishanth", UserRole::Customer)
    }

    fn admin() -> Actor {
        Actor::new(2, "admin", UserRole::Admin)
    }

    fn request(vehicle: &str, rental_type: RentalType, duration: rust_decimal::Decimal) -> NewBooking {
        NewBooking {
            customer_name: "Nishanth".to_string(),
            contact: "9876543210".to_string(),
            date: Utc::now(),
            location: "Pollachi".to_string(),
            vehicle: vehicle.to_string(),
            rental_type,
            duration,
            payment_method: "gpay".to_string(),
        }
    }

    async fn setup(config: BookingConfig) -> (Repositories, BookingService) {
        let repos = memory_repositories();
        repos
            .vehicles
            .create(&Vehicle {
                name: "TATA LPT".to_string(),
                price_day: dec!(7000),
                price_hour: dec!(300),
                ..Default::default()
            })
            .await
            .unwrap();
        repos
            .vehicles
            .create(&Vehicle {
                name: "TATA 407".to_string(),
                price_day: dec!(12000),
                price_hour: dec!(500),
                available: false,
                ..Default::default()
            })
            .await
            .unwrap();
        repos.settings.upsert(&Settings::default()).await.unwrap();

        let service = BookingService::new(&repos, &config);
        (repos, service)
    }

    #[tokio::test]
    async fn test_create_booking_prices_and_stores() {
        let (_repos, service) = setup(BookingConfig::default()).await;

        let booking = service
            .create_booking(&customer(), request("TATA LPT", RentalType::Daily, dec!(2)))
            .await
            .unwrap();

        assert_eq!(booking.cost, dec!(15900));
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.customer_id, 1);
        assert!(booking.booking_id.starts_with("LR"));
    }

    #[tokio::test]
    async fn test_cost_frozen_after_settings_change() {
        let (repos, service) = setup(BookingConfig::default()).await;

        let booking = service
            .create_booking(&customer(), request("TATA LPT", RentalType::Hourly, dec!(4)))
            .await
            .unwrap();
        // 4 * 300 = 1200, +10% = 1320, +500
        assert_eq!(booking.cost, dec!(1820));

        repos
            .settings
            .upsert(&Settings {
                tax_percentage: dec!(28),
                maintenance_fee: dec!(1000),
                ..Settings::default()
            })
            .await
            .unwrap();

        let stored = service.list_bookings(&customer()).await.unwrap();
        assert_eq!(stored[0].cost, dec!(1820));

        let repriced = service
            .create_booking(&customer(), request("TATA LPT", RentalType::Hourly, dec!(4)))
            .await
            .unwrap();
        assert_eq!(repriced.cost, dec!(2536));
    }

    #[tokio::test]
    async fn test_taken_booking_code_moves_to_next_millisecond() {
        let (repos, service) = setup(BookingConfig::default()).await;
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();

        let mut codes = Vec::new();
        for _ in 0..BOOKING_CODE_ATTEMPTS {
            let booking = service
                .create_booking_at(&customer(), request("TATA LPT", RentalType::Daily, dec!(1)), at)
                .await
                .unwrap();
            codes.push(booking.booking_id);
        }

        let expected: Vec<String> = (0..BOOKING_CODE_ATTEMPTS)
            .map(|ms| booking_code(at + Duration::milliseconds(ms)))
            .collect();
        assert_eq!(codes, expected);
        assert_eq!(codes[0], "LR1717234200000");

        let result = service
            .create_booking_at(&customer(), request("TATA LPT", RentalType::Daily, dec!(1)), at)
            .await;
        assert!(matches!(result, Err(AppError::Internal(_))));
        assert_eq!(repos.bookings.list_recent().await.unwrap().len(), codes.len());
    }

    #[tokio::test]
    async fn test_fractional_duration_stored_as_priced() {
        let (repos, service) = setup(BookingConfig::default()).await;

        for (duration, cost) in [(dec!(0.001), dec!(500.33)), (dec!(2.555), dec!(1343.15))] {
            let booking = service
                .create_booking(&customer(), request("TATA LPT", RentalType::Hourly, duration))
                .await
                .unwrap();
            assert_eq!(booking.cost, cost);

            let stored = repos
                .bookings
                .find_by_code(&booking.booking_id)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(stored.duration, duration);
            assert_eq!(stored.cost, cost);
        }
    }

    #[tokio::test]
    async fn test_oversized_duration_rejected() {
        let (repos, service) = setup(BookingConfig::default()).await;

        let result = service
            .create_booking(
                &customer(),
                request("TATA LPT", RentalType::Daily, dec!(10000000000000000000000000)),
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(repos.bookings.list_recent().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_vehicle_rejected() {
        let (_repos, service) = setup(BookingConfig::default()).await;

        let result = service
            .create_booking(&customer(), request("Ghost Truck", RentalType::Daily, dec!(1)))
            .await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_non_positive_duration_rejected() {
        let (_repos, service) = setup(BookingConfig::default()).await;

        let result = service
            .create_booking(&customer(), request("TATA LPT", RentalType::Daily, dec!(0)))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_unavailable_vehicle_handling() {
        let (_repos, service) = setup(BookingConfig::default()).await;
        let result = service
            .create_booking(&customer(), request("TATA 407", RentalType::Daily, dec!(1)))
            .await;
        assert!(matches!(result, Err(AppError::VehicleUnavailable(_))));

        let (_repos, lenient) = setup(BookingConfig {
            reject_unavailable_vehicles: false,
            ..BookingConfig::default()
        })
        .await;
        let booking = lenient
            .create_booking(&customer(), request("TATA 407", RentalType::Daily, dec!(1)))
            .await
            .unwrap();
        assert_eq!(booking.cost, dec!(13700));
    }

    #[tokio::test]
    async fn test_list_bookings_scoped_by_role() {
        let (_repos, service) = setup(BookingConfig::default()).await;
        let other = Actor::new(3, "ravi", UserRole::Customer);

        service
            .create_booking(&customer(), request("TATA LPT", RentalType::Daily, dec!(1)))
            .await
            .unwrap();
        service
            .create_booking(&other, request("TATA LPT", RentalType::Daily, dec!(3)))
            .await
            .unwrap();

        let mine = service.list_bookings(&customer()).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert!(mine.iter().all(|b| b.customer_id == 1));

        let all = service.list_bookings(&admin()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].timestamp >= all[1].timestamp);
    }

    #[tokio::test]
    async fn test_update_status_requires_admin() {
        let (_repos, service) = setup(BookingConfig::default()).await;
        let booking = service
            .create_booking(&customer(), request("TATA LPT", RentalType::Daily, dec!(1)))
            .await
            .unwrap();

        let result = service
            .update_status(&customer(), &booking.booking_id, BookingStatus::Confirmed)
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));

        let updated = service
            .update_status(&admin(), &booking.booking_id, BookingStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(updated.status, BookingStatus::Confirmed);
        assert_eq!(updated.cost, booking.cost);
    }

    #[tokio::test]
    async fn test_update_status_unknown_booking() {
        let (_repos, service) = setup(BookingConfig::default()).await;

        let result = service
            .update_status(&admin(), "LR0", BookingStatus::Confirmed)
            .await;
        assert!(matches!(result, Err(AppError::BookingNotFound(_))));
    }

    #[tokio::test]
    async fn test_permissive_policy_allows_reopening() {
        let (_repos, service) = setup(BookingConfig::default()).await;
        let booking = service
            .create_booking(&customer(), request("TATA LPT", RentalType::Daily, dec!(1)))
            .await
            .unwrap();

        service
            .update_status(&admin(), &booking.booking_id, BookingStatus::Cancelled)
            .await
            .unwrap();
        let reopened = service
            .update_status(&admin(), &booking.booking_id, BookingStatus::Pending)
            .await
            .unwrap();
        assert_eq!(reopened.status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn test_strict_policy_makes_decisions_final() {
        let (_repos, service) = setup(BookingConfig {
            strict_status_transitions: true,
            ..BookingConfig::default()
        })
        .await;
        assert_eq!(service.policy(), StatusPolicy::Strict);

        let booking = service
            .create_booking(&customer(), request("TATA LPT", RentalType::Daily, dec!(1)))
            .await
            .unwrap();

        service
            .update_status(&admin(), &booking.booking_id, BookingStatus::Confirmed)
            .await
            .unwrap();

        // Re-applying is accepted, moving on is not
        service
            .update_status(&admin(), &booking.booking_id, BookingStatus::Confirmed)
            .await
            .unwrap();
        let result = service
            .update_status(&admin(), &booking.booking_id, BookingStatus::Cancelled)
            .await;
        assert!(matches!(
            result,
            Err(AppError::InvalidStatusTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_stats() {
        let (_repos, service) = setup(BookingConfig::default()).await;
        assert!(matches!(
            service.stats(&customer()).await,
            Err(AppError::Forbidden)
        ));

        let empty = service.stats(&admin()).await.unwrap();
        assert_eq!(empty.total_revenue, dec!(0));

        let first = service
            .create_booking(&customer(), request("TATA LPT", RentalType::Daily, dec!(2)))
            .await
            .unwrap();
        let second = service
            .create_booking(&customer(), request("TATA LPT", RentalType::Daily, dec!(1)))
            .await
            .unwrap();
        service
            .create_booking(&customer(), request("TATA LPT", RentalType::Hourly, dec!(3)))
            .await
            .unwrap();

        service
            .update_status(&admin(), &first.booking_id, BookingStatus::Confirmed)
            .await
            .unwrap();
        service
            .update_status(&admin(), &second.booking_id, BookingStatus::Cancelled)
            .await
            .unwrap();

        let stats = service.stats(&admin()).await.unwrap();
        assert_eq!(stats.total_bookings, 3);
        assert_eq!(stats.pending_bookings, 1);
        assert_eq!(stats.confirmed_bookings, 1);
        assert_eq!(stats.cancelled_bookings, 1);
        assert_eq!(stats.total_revenue, dec!(15900));
    }

    #[tokio::test]
    async fn test_missing_settings_fall_back_to_defaults() {
        let repos = memory_repositories();
        repos
            .vehicles
            .create(&Vehicle {
                name: "TATA LPT".to_string(),
                price_day: dec!(7000),
                price_hour: dec!(300),
                ..Default::default()
            })
            .await
            .unwrap();
        let service = BookingService::new(&repos, &BookingConfig::default());

        let cost = service
            .quote(&request("TATA LPT", RentalType::Daily, dec!(2)))
            .await
            .unwrap();
        assert_eq!(cost.total, dec!(15900));
    }
}
