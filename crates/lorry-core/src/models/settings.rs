//! Agency settings and payment configuration

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pricing::PricingSettings;

/// QR code generator used when no custom image is configured
pub const QR_SERVICE_URL: &str = "https://api.qrserver.com/v1/create-qr-code/?size=200x200&data=";

/// Singleton agency settings record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub tax_percentage: Decimal,
    pub maintenance_fee: Decimal,
    pub agency_name: String,
    pub contact_number: String,
    pub address: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for Settings {
    fn default() -> Self {
        let pricing = PricingSettings::default();
        Self {
            tax_percentage: pricing.tax_percentage,
            maintenance_fee: pricing.maintenance_fee,
            agency_name: "Lorry Rental Agency".to_string(),
            contact_number: "+91 98765 43210".to_string(),
            address: "Lorry Rentals, Pollachi, Coimbatore".to_string(),
            updated_at: Utc::now(),
        }
    }
}

impl Settings {
    /// Snapshot of the values the cost calculator needs
    pub fn pricing(&self) -> PricingSettings {
        PricingSettings {
            tax_percentage: self.tax_percentage,
            maintenance_fee: self.maintenance_fee,
        }
    }
}

/// Supported UPI payment apps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Gpay,
    Paytm,
    Phonepe,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Gpay => write!(f, "gpay"),
            PaymentMethod::Paytm => write!(f, "paytm"),
            PaymentMethod::Phonepe => write!(f, "phonepe"),
        }
    }
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Gpay,
        PaymentMethod::Paytm,
        PaymentMethod::Phonepe,
    ];

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gpay" => Some(PaymentMethod::Gpay),
            "paytm" => Some(PaymentMethod::Paytm),
            "phonepe" => Some(PaymentMethod::Phonepe),
            _ => None,
        }
    }

    /// UPI id the agency ships with
    pub fn default_upi_id(&self) -> &'static str {
        match self {
            PaymentMethod::Gpay => "lorryrentalagency@okhdfcbank",
            PaymentMethod::Paytm => "lorryrentalagency@paytm",
            PaymentMethod::Phonepe => "lorryrentalagency@ybl",
        }
    }
}

/// Payment configuration for one method
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentSetting {
    pub method: PaymentMethod,
    pub upi_id: String,
    /// QR image customers scan: the custom image if set, else a generated one
    pub qr_code: String,
    /// Uploaded QR image
    pub custom_qr: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentSetting {
    pub fn new(method: PaymentMethod, upi_id: impl Into<String>, custom_qr: Option<String>) -> Self {
        let upi_id = upi_id.into();
        let custom_qr = custom_qr.filter(|qr| !qr.trim().is_empty());
        let qr_code = custom_qr
            .clone()
            .unwrap_or_else(|| qr_code_url(&upi_id));

        Self {
            method,
            upi_id,
            qr_code,
            custom_qr,
            updated_at: Utc::now(),
        }
    }

    /// Factory default for a method
    pub fn default_for(method: PaymentMethod) -> Self {
        Self::new(method, method.default_upi_id(), None)
    }
}

/// Generated QR image URL encoding a UPI id
pub fn qr_code_url(upi_id: &str) -> String {
    format!("{}UPIID:{}", QR_SERVICE_URL, upi_id)
}
