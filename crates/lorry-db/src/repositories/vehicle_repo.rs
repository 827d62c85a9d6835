//! Vehicle repository implementation
//!
//! Provides PostgreSQL-backed storage for the rentable fleet.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lorry_core::{
    models::Vehicle,
    traits::VehicleRepository,
    AppError, AppResult,
};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, instrument};

use super::is_unique_violation;

const VEHICLE_COLUMNS: &str =
    "id, name, image, description, price_day, price_hour, available, created_at";

/// Database row representation of a vehicle
#[derive(Debug, FromRow)]
struct VehicleRow {
    id: i32,
    name: String,
    image: String,
    description: String,
    price_day: Decimal,
    price_hour: Decimal,
    available: bool,
    created_at: DateTime<Utc>,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Vehicle {
            id: row.id,
            name: row.name,
            image: row.image,
            description: row.description,
            price_day: row.price_day,
            price_hour: row.price_hour,
            available: row.available,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL implementation of VehicleRepository
pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    /// Create a new vehicle repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Vehicle>> {
        debug!("Finding vehicle by id: {}", id);

        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {} FROM vehicles WHERE id = $1",
            VEHICLE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding vehicle {}: {}", id, e);
            AppError::Database(format!("Failed to find vehicle: {}", e))
        })?;

        Ok(row.map(Vehicle::from))
    }

    #[instrument(skip(self, entity), fields(name = %entity.name))]
    async fn create(&self, entity: &Vehicle) -> AppResult<Vehicle> {
        debug!("Creating vehicle: {}", entity.name);

        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            INSERT INTO vehicles (name, image, description, price_day, price_hour, available, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(&entity.name)
        .bind(&entity.image)
        .bind(&entity.description)
        .bind(entity.price_day)
        .bind(entity.price_hour)
        .bind(entity.available)
        .bind(entity.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::AlreadyExists("Vehicle with this name already exists".to_string())
            } else {
                error!("Database error creating vehicle: {}", e);
                AppError::Database(format!("Failed to create vehicle: {}", e))
            }
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self, entity), fields(vehicle_id = entity.id))]
    async fn update(&self, entity: &Vehicle) -> AppResult<Vehicle> {
        debug!("Updating vehicle: {}", entity.id);

        // The name is the key bookings refer to and is never rewritten.
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            UPDATE vehicles
            SET image = $2,
                description = $3,
                price_day = $4,
                price_hour = $5,
                available = $6
            WHERE id = $1
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(entity.id)
        .bind(&entity.image)
        .bind(&entity.description)
        .bind(entity.price_day)
        .bind(entity.price_hour)
        .bind(entity.available)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error updating vehicle {}: {}", entity.id, e);
            AppError::Database(format!("Failed to update vehicle: {}", e))
        })?;

        row.map(Vehicle::from)
            .ok_or_else(|| AppError::VehicleNotFound(entity.id.to_string()))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i32) -> AppResult<bool> {
        debug!("Deleting vehicle: {}", id);

        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error deleting vehicle {}: {}", id, e);
                AppError::Database(format!("Failed to delete vehicle: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting vehicles: {}", e);
                AppError::Database(format!("Failed to count vehicles: {}", e))
            })?;

        Ok(result.0)
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Vehicle>> {
        debug!("Finding vehicle by name: {}", name);

        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {} FROM vehicles WHERE name = $1",
            VEHICLE_COLUMNS
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding vehicle by name: {}", e);
            AppError::Database(format!("Failed to find vehicle: {}", e))
        })?;

        Ok(row.map(Vehicle::from))
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> AppResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {} FROM vehicles ORDER BY id",
            VEHICLE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error listing vehicles: {}", e);
            AppError::Database(format!("Failed to fetch vehicles: {}", e))
        })?;

        debug!("Loaded {} vehicles", rows.len());

        Ok(rows.into_iter().map(Vehicle::from).collect())
    }
}
