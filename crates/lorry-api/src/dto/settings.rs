//! Settings and payment settings DTOs

use chrono::{DateTime, Utc};
use lorry_core::models::{PaymentSetting, Settings};
use lorry_core::{AppError, AppResult};
use lorry_services::{PaymentMethodInput, PaymentSettingsUpdate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use super::common::deserialize_optional_decimal;

/// Full replacement of the agency settings
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub tax_percentage: Option<Decimal>,

    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub maintenance_fee: Option<Decimal>,

    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub agency_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub contact_number: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub address: String,
}

impl UpdateSettingsRequest {
    pub fn into_settings(self) -> AppResult<Settings> {
        let (Some(tax_percentage), Some(maintenance_fee)) = (self.tax_percentage, self.maintenance_fee)
        else {
            return Err(AppError::Validation("All fields are required".to_string()));
        };

        Ok(Settings {
            tax_percentage,
            maintenance_fee,
            agency_name: self.agency_name,
            contact_number: self.contact_number,
            address: self.address,
            updated_at: Utc::now(),
        })
    }
}

/// Agency settings as returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub tax_percentage: Decimal,
    pub maintenance_fee: Decimal,
    pub agency_name: String,
    pub contact_number: String,
    pub address: String,
    pub updated_at: DateTime<Utc>,
}

impl From<Settings> for SettingsResponse {
    fn from(settings: Settings) -> Self {
        Self {
            tax_percentage: settings.tax_percentage,
            maintenance_fee: settings.maintenance_fee,
            agency_name: settings.agency_name,
            contact_number: settings.contact_number,
            address: settings.address,
            updated_at: settings.updated_at,
        }
    }
}

/// Confirmation of a settings update
#[derive(Debug, Clone, Serialize)]
pub struct SettingsMessageResponse {
    pub message: String,
    pub settings: SettingsResponse,
}

/// One payment method in a payment settings update
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodRequest {
    #[serde(default)]
    pub upi_id: String,
    pub custom_qr: Option<String>,
}

impl From<PaymentMethodRequest> for PaymentMethodInput {
    fn from(req: PaymentMethodRequest) -> Self {
        PaymentMethodInput {
            upi_id: req.upi_id,
            custom_qr: req.custom_qr,
        }
    }
}

/// Replacement of all payment methods
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePaymentSettingsRequest {
    pub gpay: Option<PaymentMethodRequest>,
    pub paytm: Option<PaymentMethodRequest>,
    pub phonepe: Option<PaymentMethodRequest>,
}

impl UpdatePaymentSettingsRequest {
    pub fn into_update(self) -> AppResult<PaymentSettingsUpdate> {
        let (Some(gpay), Some(paytm), Some(phonepe)) = (self.gpay, self.paytm, self.phonepe) else {
            return Err(AppError::Validation(
                "All payment methods are required".to_string(),
            ));
        };

        Ok(PaymentSettingsUpdate {
            gpay: gpay.into(),
            paytm: paytm.into(),
            phonepe: phonepe.into(),
        })
    }
}

/// Payment method as returned to clients
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSettingResponse {
    pub upi_id: String,
    pub qr_code: String,
    pub custom_qr: Option<String>,
}

impl From<PaymentSetting> for PaymentSettingResponse {
    fn from(setting: PaymentSetting) -> Self {
        Self {
            upi_id: setting.upi_id,
            qr_code: setting.qr_code,
            custom_qr: setting.custom_qr,
        }
    }
}

/// Payment methods keyed by method name (`gpay`, `paytm`, `phonepe`)
pub type PaymentSettingsResponse = BTreeMap<String, PaymentSettingResponse>;

pub fn payment_settings_map(settings: Vec<PaymentSetting>) -> PaymentSettingsResponse {
    settings
        .into_iter()
        .map(|setting| (setting.method.to_string(), setting.into()))
        .collect()
}
