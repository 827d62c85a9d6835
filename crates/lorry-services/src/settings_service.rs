//! Settings service
//!
//! Agency settings are a singleton that is created with defaults the first
//! time anyone reads it. Payment methods are replaced as a full set.

use chrono::Utc;
use lorry_core::{
    models::{Actor, PaymentMethod, PaymentSetting, Settings},
    traits::{PaymentSettingsRepository, Repositories, SettingsRepository},
    AppError, AppResult,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::require_admin;

/// UPI id and optional uploaded QR image for one method
#[derive(Debug, Clone, Default)]
pub struct PaymentMethodInput {
    pub upi_id: String,
    pub custom_qr: Option<String>,
}

/// Replacement for all payment methods at once
#[derive(Debug, Clone)]
pub struct PaymentSettingsUpdate {
    pub gpay: PaymentMethodInput,
    pub paytm: PaymentMethodInput,
    pub phonepe: PaymentMethodInput,
}

impl PaymentSettingsUpdate {
    fn entries(&self) -> [(PaymentMethod, &PaymentMethodInput); 3] {
        [
            (PaymentMethod::Gpay, &self.gpay),
            (PaymentMethod::Paytm, &self.paytm),
            (PaymentMethod::Phonepe, &self.phonepe),
        ]
    }
}

/// Agency and payment configuration
pub struct SettingsService {
    settings: Arc<dyn SettingsRepository>,
    payments: Arc<dyn PaymentSettingsRepository>,
}

impl SettingsService {
    /// Create a new settings service
    pub fn new(repos: &Repositories) -> Self {
        Self {
            settings: repos.settings.clone(),
            payments: repos.payments.clone(),
        }
    }

    /// Current settings, persisting the defaults if none exist yet
    #[instrument(skip(self))]
    pub async fn get(&self) -> AppResult<Settings> {
        if let Some(settings) = self.settings.get().await? {
            return Ok(settings);
        }

        info!("No settings stored, creating defaults");
        self.settings.upsert(&Settings::default()).await
    }

    /// Replace the agency settings
    #[instrument(skip(self, settings), fields(user_id = actor.user_id))]
    pub async fn update(&self, actor: &Actor, settings: Settings) -> AppResult<Settings> {
        require_admin(actor, "update settings")?;

        settings.pricing().validate()?;
        for (field, value) in [
            ("agencyName", &settings.agency_name),
            ("contactNumber", &settings.contact_number),
            ("address", &settings.address),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::MissingField(field.to_string()));
            }
        }

        let saved = self
            .settings
            .upsert(&Settings {
                updated_at: Utc::now(),
                ..settings
            })
            .await?;

        info!(
            tax_percentage = %saved.tax_percentage,
            maintenance_fee = %saved.maintenance_fee,
            "Settings updated"
        );
        Ok(saved)
    }

    /// Every configured payment method, ordered by method
    #[instrument(skip(self))]
    pub async fn payment_settings(&self) -> AppResult<Vec<PaymentSetting>> {
        let mut list = self.payments.list().await?;
        list.sort_by_key(|setting| setting.method);
        Ok(list)
    }

    /// Replace all three payment methods
    #[instrument(skip(self, update), fields(user_id = actor.user_id))]
    pub async fn update_payment_settings(
        &self,
        actor: &Actor,
        update: PaymentSettingsUpdate,
    ) -> AppResult<Vec<PaymentSetting>> {
        require_admin(actor, "update payment settings")?;

        for (method, input) in update.entries() {
            if input.upi_id.trim().is_empty() {
                warn!("Payment settings update without UPI id for {}", method);
                return Err(AppError::MissingField(format!("{}.upiId", method)));
            }
        }

        let mut saved = Vec::with_capacity(PaymentMethod::ALL.len());
        for (method, input) in update.entries() {
            let setting = PaymentSetting::new(method, input.upi_id.trim(), input.custom_qr.clone());
            saved.push(self.payments.upsert(&setting).await?);
        }

        info!("Payment settings updated");
        Ok(saved)
    }
}
