//! Settings repository implementation
//!
//! The agency settings live in a single row with id 1.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lorry_core::{models::Settings, traits::SettingsRepository, AppError, AppResult};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, info, instrument};

/// Database row representation of the settings record
#[derive(Debug, FromRow)]
struct SettingsRow {
    tax_percentage: Decimal,
    maintenance_fee: Decimal,
    agency_name: String,
    contact_number: String,
    address: String,
    updated_at: DateTime<Utc>,
}

impl From<SettingsRow> for Settings {
    fn from(row: SettingsRow) -> Self {
        Settings {
            tax_percentage: row.tax_percentage,
            maintenance_fee: row.maintenance_fee,
            agency_name: row.agency_name,
            contact_number: row.contact_number,
            address: row.address,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL implementation of SettingsRepository
pub struct PgSettingsRepository {
    pool: PgPool,
}

impl PgSettingsRepository {
    /// Create a new settings repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PgSettingsRepository {
    #[instrument(skip(self))]
    async fn get(&self) -> AppResult<Option<Settings>> {
        debug!("Loading settings");

        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            SELECT tax_percentage, maintenance_fee, agency_name, contact_number,
                   address, updated_at
            FROM settings
            WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error loading settings: {}", e);
            AppError::Database(format!("Failed to fetch settings: {}", e))
        })?;

        Ok(row.map(Settings::from))
    }

    #[instrument(skip(self, settings))]
    async fn upsert(&self, settings: &Settings) -> AppResult<Settings> {
        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            INSERT INTO settings (
                id, tax_percentage, maintenance_fee, agency_name,
                contact_number, address, updated_at
            )
            VALUES (1, $1, $2, $3, $4, $5, NOW())
            ON CONFLICT (id) DO UPDATE
            SET tax_percentage = EXCLUDED.tax_percentage,
                maintenance_fee = EXCLUDED.maintenance_fee,
                agency_name = EXCLUDED.agency_name,
                contact_number = EXCLUDED.contact_number,
                address = EXCLUDED.address,
                updated_at = NOW()
            RETURNING tax_percentage, maintenance_fee, agency_name, contact_number,
                      address, updated_at
            "#,
        )
        .bind(settings.tax_percentage)
        .bind(settings.maintenance_fee)
        .bind(&settings.agency_name)
        .bind(&settings.contact_number)
        .bind(&settings.address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error saving settings: {}", e);
            AppError::Database(format!("Failed to update settings: {}", e))
        })?;

        info!(
            tax_percentage = %row.tax_percentage,
            maintenance_fee = %row.maintenance_fee,
            "Settings saved"
        );

        Ok(row.into())
    }
}
