//! Vehicle service
//!
//! Public catalogue plus admin-only fleet management. Bookings reference
//! vehicles by name, so renames are not offered and deletion is refused
//! while any booking still names the vehicle.

use chrono::Utc;
use lorry_core::{
    models::{Actor, Vehicle, VehicleUpdate},
    pricing::check_amount,
    traits::{BookingRepository, Repositories, VehicleRepository},
    AppError, AppResult,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::require_admin;

/// Input for adding a vehicle to the fleet
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub name: String,
    pub image: String,
    pub description: String,
    pub price_day: Decimal,
    pub price_hour: Decimal,
}

/// Fleet management service
pub struct VehicleService {
    vehicles: Arc<dyn VehicleRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl VehicleService {
    /// Create a new vehicle service
    pub fn new(repos: &Repositories) -> Self {
        Self {
            vehicles: repos.vehicles.clone(),
            bookings: repos.bookings.clone(),
        }
    }

    fn check_rates(price_day: Decimal, price_hour: Decimal) -> AppResult<()> {
        check_amount("Daily rate", price_day)?;
        check_amount("Hourly rate", price_hour)
    }

    /// Whole fleet
    #[instrument(skip(self))]
    pub async fn list(&self) -> AppResult<Vec<Vehicle>> {
        self.vehicles.list_all().await
    }

    /// Single vehicle by id
    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> AppResult<Vehicle> {
        self.vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::VehicleNotFound(id.to_string()))
    }

    /// Add a vehicle; names must be unique
    #[instrument(skip(self, input), fields(user_id = actor.user_id, name = %input.name))]
    pub async fn create(&self, actor: &Actor, input: NewVehicle) -> AppResult<Vehicle> {
        require_admin(actor, "add vehicle")?;
        Self::check_rates(input.price_day, input.price_hour)?;

        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::MissingField("name".to_string()));
        }
        if self.vehicles.find_by_name(&name).await?.is_some() {
            warn!("Duplicate vehicle name: {}", name);
            return Err(AppError::AlreadyExists(
                "Vehicle with this name already exists".to_string(),
            ));
        }

        let vehicle = self
            .vehicles
            .create(&Vehicle {
                id: 0,
                name,
                image: input.image,
                description: input.description,
                price_day: input.price_day,
                price_hour: input.price_hour,
                available: true,
                created_at: Utc::now(),
            })
            .await?;

        info!(vehicle_id = vehicle.id, name = %vehicle.name, "Vehicle added");
        Ok(vehicle)
    }

    /// Edit rates, description, image or availability
    #[instrument(skip(self, update), fields(user_id = actor.user_id))]
    pub async fn update(&self, actor: &Actor, id: i32, update: VehicleUpdate) -> AppResult<Vehicle> {
        require_admin(actor, "update vehicle")?;

        let mut vehicle = self.get(id).await?;
        if update.is_empty() {
            debug!("Empty vehicle update for {}", id);
            return Ok(vehicle);
        }

        update.apply_to(&mut vehicle);
        Self::check_rates(vehicle.price_day, vehicle.price_hour)?;

        let updated = self.vehicles.update(&vehicle).await?;
        info!(
            vehicle_id = updated.id,
            available = updated.available,
            "Vehicle updated"
        );
        Ok(updated)
    }

    /// Remove a vehicle no booking refers to
    #[instrument(skip(self), fields(user_id = actor.user_id))]
    pub async fn delete(&self, actor: &Actor, id: i32) -> AppResult<()> {
        require_admin(actor, "delete vehicle")?;

        let vehicle = self.get(id).await?;
        if self.bookings.exists_for_vehicle(&vehicle.name).await? {
            warn!("Refusing to delete vehicle {} with bookings", vehicle.name);
            return Err(AppError::VehicleInUse(vehicle.name));
        }

        if !self.vehicles.delete(id).await? {
            return Err(AppError::VehicleNotFound(id.to_string()));
        }

        info!(vehicle_id = id, name = %vehicle.name, "Vehicle deleted");
        Ok(())
    }
}
