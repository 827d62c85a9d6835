//! Vehicle model
//!
//! A rentable lorry with hourly and daily rates. Bookings reference vehicles
//! by name, so the name is the stable business key.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::RentalType;
use crate::pricing::VehicleRates;

/// Vehicle entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    /// Unique identifier
    pub id: i32,

    /// Display name, unique across the fleet
    pub name: String,

    /// Image URL shown in the catalogue
    pub image: String,

    /// Short description
    pub description: String,

    /// Rate charged per day
    pub price_day: Decimal,

    /// Rate charged per hour
    pub price_hour: Decimal,

    /// Whether the vehicle can currently be booked
    pub available: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Rates used by the cost calculator
    pub fn rates(&self) -> VehicleRates {
        VehicleRates {
            hourly: self.price_hour,
            daily: self.price_day,
        }
    }

    /// Rate that applies to the given rental type
    pub fn rate_for(&self, rental_type: RentalType) -> Decimal {
        self.rates().for_type(rental_type)
    }
}

impl Default for Vehicle {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            image: String::new(),
            description: String::new(),
            price_day: Decimal::ZERO,
            price_hour: Decimal::ZERO,
            available: true,
            created_at: Utc::now(),
        }
    }
}

/// Partial update applied by administrators
///
/// No name field: bookings reference vehicles by name.
#[derive(Debug, Clone, Default)]
pub struct VehicleUpdate {
    pub image: Option<String>,
    pub description: Option<String>,
    pub price_day: Option<Decimal>,
    pub price_hour: Option<Decimal>,
    pub available: Option<bool>,
}

impl VehicleUpdate {
    /// Apply the present fields onto a vehicle
    pub fn apply_to(&self, vehicle: &mut Vehicle) {
        if let Some(image) = &self.image {
            vehicle.image = image.clone();
        }
        if let Some(description) = &self.description {
            vehicle.description = description.clone();
        }
        if let Some(price_day) = self.price_day {
            vehicle.price_day = price_day;
        }
        if let Some(price_hour) = self.price_hour {
            vehicle.price_hour = price_hour;
        }
        if let Some(available) = self.available {
            vehicle.available = available;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.image.is_none()
            && self.description.is_none()
            && self.price_day.is_none()
            && self.price_hour.is_none()
            && self.available.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rate_for_rental_type() {
        let vehicle = Vehicle {
            name: "TATA LPT".to_string(),
            price_day: dec!(7000),
            price_hour: dec!(300),
            ..Default::default()
        };

        assert_eq!(vehicle.rate_for(RentalType::Daily), dec!(7000));
        assert_eq!(vehicle.rate_for(RentalType::Hourly), dec!(300));
    }

    #[test]
    fn test_update_applies_only_present_fields() {
        let mut vehicle = Vehicle {
            name: "TATA 407".to_string(),
            description: "A Heavy-Duty Truck".to_string(),
            price_day: dec!(12000),
            price_hour: dec!(500),
            ..Default::default()
        };

        let update = VehicleUpdate {
            price_hour: Some(dec!(550)),
            available: Some(false),
            ..Default::default()
        };
        assert!(!update.is_empty());
        update.apply_to(&mut vehicle);

        assert_eq!(vehicle.price_hour, dec!(550));
        assert_eq!(vehicle.price_day, dec!(12000));
        assert_eq!(vehicle.description, "A Heavy-Duty Truck");
        assert!(!vehicle.available);
        assert!(VehicleUpdate::default().is_empty());
    }
}
