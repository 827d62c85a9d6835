//! Vehicle DTOs

use chrono::{DateTime, Utc};
use lorry_core::models::{Vehicle, VehicleUpdate};
use lorry_core::{AppError, AppResult};
use lorry_services::NewVehicle;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::deserialize_optional_decimal;

/// New vehicle form
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "All fields are required"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub image: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub description: String,

    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub price_day: Option<Decimal>,

    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub price_hour: Option<Decimal>,
}

impl CreateVehicleRequest {
    pub fn into_new_vehicle(self) -> AppResult<NewVehicle> {
        let (Some(price_day), Some(price_hour)) = (self.price_day, self.price_hour) else {
            return Err(AppError::Validation("All fields are required".to_string()));
        };

        Ok(NewVehicle {
            name: self.name,
            image: self.image,
            description: self.description,
            price_day,
            price_hour,
        })
    }
}

/// Partial vehicle edit; the name cannot be changed
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    pub image: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub price_day: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub price_hour: Option<Decimal>,
    pub available: Option<bool>,
}

impl From<UpdateVehicleRequest> for VehicleUpdate {
    fn from(req: UpdateVehicleRequest) -> Self {
        VehicleUpdate {
            image: req.image,
            description: req.description,
            price_day: req.price_day,
            price_hour: req.price_hour,
            available: req.available,
        }
    }
}

/// Vehicle as returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub description: String,
    pub price_day: Decimal,
    pub price_hour: Decimal,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            name: vehicle.name,
            image: vehicle.image,
            description: vehicle.description,
            price_day: vehicle.price_day,
            price_hour: vehicle.price_hour,
            available: vehicle.available,
            created_at: vehicle.created_at,
        }
    }
}

/// Confirmation of a vehicle creation or edit
#[derive(Debug, Clone, Serialize)]
pub struct VehicleMessageResponse {
    pub message: String,
    pub vehicle: VehicleResponse,
}

impl VehicleMessageResponse {
    pub fn new(message: impl Into<String>, vehicle: Vehicle) -> Self {
        Self {
            message: message.into(),
            vehicle: vehicle.into(),
        }
    }
}
