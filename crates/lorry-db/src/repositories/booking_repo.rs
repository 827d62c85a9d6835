//! Booking repository implementation
//!
//! Provides PostgreSQL-backed storage for bookings, including the status
//! update by public code and the dashboard aggregate.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lorry_core::{
    models::{Booking, BookingStats, BookingStatus, RentalType},
    traits::BookingRepository,
    AppError, AppResult,
};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use super::is_unique_violation;

const BOOKING_COLUMNS: &str = r#"
    id, booking_code, customer_id, customer_name, contact, booking_date,
    location, vehicle_name, rental_type, duration, cost, payment_method,
    status, created_at
"#;

/// Database row representation of a booking
#[derive(Debug, FromRow)]
struct BookingRow {
    id: Uuid,
    booking_code: String,
    customer_id: i32,
    customer_name: String,
    contact: String,
    booking_date: DateTime<Utc>,
    location: String,
    vehicle_name: String,
    rental_type: String,
    duration: Decimal,
    cost: Decimal,
    payment_method: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            booking_id: row.booking_code,
            customer_id: row.customer_id,
            customer_name: row.customer_name,
            contact: row.contact,
            date: row.booking_date,
            location: row.location,
            vehicle: row.vehicle_name,
            rental_type: RentalType::from_str(&row.rental_type).unwrap_or(RentalType::Daily),
            duration: row.duration,
            cost: row.cost,
            payment_method: row.payment_method,
            status: BookingStatus::from_str(&row.status).unwrap_or_default(),
            timestamp: row.created_at,
        }
    }
}

/// Aggregate row for the dashboard counters
#[derive(Debug, FromRow)]
struct StatsRow {
    total: i64,
    pending: i64,
    confirmed: i64,
    cancelled: i64,
    revenue: Decimal,
}

/// PostgreSQL implementation of BookingRepository
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    /// Create a new booking repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    #[instrument(skip(self, entity), fields(booking_id = %entity.booking_id))]
    async fn create(&self, entity: &Booking) -> AppResult<Booking> {
        debug!("Creating booking for vehicle {}", entity.vehicle);

        let row = sqlx::query_as::<_, BookingRow>(&format!(
            r#"
            INSERT INTO bookings (
                id, booking_code, customer_id, customer_name, contact,
                booking_date, location, vehicle_name, rental_type, duration,
                cost, payment_method, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        ))
        .bind(entity.id)
        .bind(&entity.booking_id)
        .bind(entity.customer_id)
        .bind(&entity.customer_name)
        .bind(&entity.contact)
        .bind(entity.date)
        .bind(&entity.location)
        .bind(&entity.vehicle)
        .bind(entity.rental_type.to_string())
        .bind(entity.duration)
        .bind(entity.cost)
        .bind(&entity.payment_method)
        .bind(entity.status.to_string())
        .bind(entity.timestamp)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::AlreadyExists(format!("Booking {} already exists", entity.booking_id))
            } else {
                error!("Database error creating booking: {}", e);
                AppError::Database(format!("Failed to create booking: {}", e))
            }
        })?;

        info!(
            booking_id = %row.booking_code,
            cost = %row.cost,
            "Booking stored"
        );

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn find_by_code(&self, booking_code: &str) -> AppResult<Option<Booking>> {
        debug!("Finding booking by code: {}", booking_code);

        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings WHERE booking_code = $1",
            BOOKING_COLUMNS
        ))
        .bind(booking_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding booking {}: {}", booking_code, e);
            AppError::Database(format!("Failed to find booking: {}", e))
        })?;

        Ok(row.map(Booking::from))
    }

    #[instrument(skip(self))]
    async fn list_by_customer(&self, customer_id: i32) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings WHERE customer_id = $1 ORDER BY created_at DESC",
            BOOKING_COLUMNS
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error listing bookings for {}: {}", customer_id, e);
            AppError::Database(format!("Failed to fetch bookings: {}", e))
        })?;

        debug!("Found {} bookings for customer {}", rows.len(), customer_id);

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_recent(&self) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings ORDER BY created_at DESC",
            BOOKING_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error listing bookings: {}", e);
            AppError::Database(format!("Failed to fetch bookings: {}", e))
        })?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    #[instrument(skip(self))]
    async fn exists_for_vehicle(&self, vehicle_name: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM bookings WHERE vehicle_name = $1)")
                .bind(vehicle_name)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    error!("Database error checking bookings for {}: {}", vehicle_name, e);
                    AppError::Database(format!("Failed to check vehicle bookings: {}", e))
                })?;

        Ok(result.0)
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        booking_code: &str,
        status: BookingStatus,
    ) -> AppResult<Option<Booking>> {
        debug!("Setting booking {} to {}", booking_code, status);

        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "UPDATE bookings SET status = $2 WHERE booking_code = $1 RETURNING {}",
            BOOKING_COLUMNS
        ))
        .bind(booking_code)
        .bind(status.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error updating booking status {}: {}", booking_code, e);
            AppError::Database(format!("Failed to update booking status: {}", e))
        })?;

        Ok(row.map(Booking::from))
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> AppResult<BookingStats> {
        let row = sqlx::query_as::<_, StatsRow>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'confirmed') AS confirmed,
                COUNT(*) FILTER (WHERE status = 'cancelled') AS cancelled,
                COALESCE(SUM(cost) FILTER (WHERE status = 'confirmed'), 0) AS revenue
            FROM bookings
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error computing booking stats: {}", e);
            AppError::Database(format!("Failed to compute booking stats: {}", e))
        })?;

        Ok(BookingStats {
            total_bookings: row.total,
            pending_bookings: row.pending,
            confirmed_bookings: row.confirmed,
            cancelled_bookings: row.cancelled,
            total_revenue: row.revenue,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_row_conversion() {
        let now = Utc::now();
        let row = BookingRow {
            id: Uuid::new_v4(),
            booking_code: "LR1717000000123".to_string(),
            customer_id: 1,
            customer_name: "Nishanth".to_string(),
            contact: "9876543210".to_string(),
            booking_date: now,
            location: "Pollachi".to_string(),
            vehicle_name: "TATA LPT".to_string(),
            rental_type: "daily".to_string(),
            duration: dec!(2),
            cost: dec!(15900),
            payment_method: "gpay".to_string(),
            status: "confirmed".to_string(),
            created_at: now,
        };

        let booking = Booking::from(row);
        assert_eq!(booking.booking_id, "LR1717000000123");
        assert_eq!(booking.rental_type, RentalType::Daily);
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.cost, dec!(15900));
        assert!(booking.is_revenue());
    }
}
