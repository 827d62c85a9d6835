//! Payment settings repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lorry_core::{
    models::{PaymentMethod, PaymentSetting},
    traits::PaymentSettingsRepository,
    AppError, AppResult,
};
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, instrument, warn};

/// Database row representation of a payment method
#[derive(Debug, FromRow)]
struct PaymentSettingRow {
    method: String,
    upi_id: String,
    qr_code: String,
    custom_qr: Option<String>,
    updated_at: DateTime<Utc>,
}

impl PaymentSettingRow {
    fn into_setting(self) -> Option<PaymentSetting> {
        let Some(method) = PaymentMethod::from_str(&self.method) else {
            warn!("Ignoring unknown payment method row: {}", self.method);
            return None;
        };

        Some(PaymentSetting {
            method,
            upi_id: self.upi_id,
            qr_code: self.qr_code,
            custom_qr: self.custom_qr,
            updated_at: self.updated_at,
        })
    }
}

/// PostgreSQL implementation of PaymentSettingsRepository
pub struct PgPaymentSettingsRepository {
    pool: PgPool,
}

impl PgPaymentSettingsRepository {
    /// Create a new payment settings repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentSettingsRepository for PgPaymentSettingsRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> AppResult<Vec<PaymentSetting>> {
        let rows = sqlx::query_as::<_, PaymentSettingRow>(
            "SELECT method, upi_id, qr_code, custom_qr, updated_at FROM payment_settings ORDER BY method",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error listing payment settings: {}", e);
            AppError::Database(format!("Failed to fetch payment settings: {}", e))
        })?;

        debug!("Loaded {} payment settings", rows.len());

        Ok(rows
            .into_iter()
            .filter_map(PaymentSettingRow::into_setting)
            .collect())
    }

    #[instrument(skip(self))]
    async fn find(&self, method: PaymentMethod) -> AppResult<Option<PaymentSetting>> {
        let row = sqlx::query_as::<_, PaymentSettingRow>(
            "SELECT method, upi_id, qr_code, custom_qr, updated_at FROM payment_settings WHERE method = $1",
        )
        .bind(method.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding payment setting {}: {}", method, e);
            AppError::Database(format!("Failed to fetch payment setting: {}", e))
        })?;

        Ok(row.and_then(PaymentSettingRow::into_setting))
    }

    #[instrument(skip(self, setting), fields(method = %setting.method))]
    async fn upsert(&self, setting: &PaymentSetting) -> AppResult<PaymentSetting> {
        let row = sqlx::query_as::<_, PaymentSettingRow>(
            r#"
            INSERT INTO payment_settings (method, upi_id, qr_code, custom_qr, updated_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (method) DO UPDATE
            SET upi_id = EXCLUDED.upi_id,
                qr_code = EXCLUDED.qr_code,
                custom_qr = EXCLUDED.custom_qr,
                updated_at = NOW()
            RETURNING method, upi_id, qr_code, custom_qr, updated_at
            "#,
        )
        .bind(setting.method.to_string())
        .bind(&setting.upi_id)
        .bind(&setting.qr_code)
        .bind(&setting.custom_qr)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error saving payment setting {}: {}", setting.method, e);
            AppError::Database(format!("Failed to update payment settings: {}", e))
        })?;

        row.into_setting()
            .ok_or_else(|| AppError::Internal(format!("Unknown payment method {}", setting.method)))
    }

    #[instrument(skip(self))]
    async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM payment_settings")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting payment settings: {}", e);
                AppError::Database(format!("Failed to count payment settings: {}", e))
            })?;

        Ok(result.0)
    }
}
