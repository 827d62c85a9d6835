//! Booking cost calculation
//!
//! The charge for a booking is computed once, at creation, from the
//! vehicle's rate for the chosen rental type and a snapshot of the pricing
//! settings:
//!
//! ```text
//! base  = duration * rate
//! tax   = base * tax_percentage / 100
//! total = base + tax + maintenance_fee
//! ```
//!
//! The snapshot is passed in explicitly; nothing here reads shared state, so
//! later settings changes can never reach an existing booking.
//!
//! Every input is bounded (see [`MAX_DURATION`], [`MAX_AMOUNT`] and
//! [`MAX_TAX_PERCENTAGE`]) and the arithmetic is checked, so no request can
//! overflow the charge.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::RentalType;
use crate::{AppError, AppResult};

/// Longest booking accepted, in hours or days depending on the rental type
pub const MAX_DURATION: i64 = 10_000;

/// Largest rate or maintenance fee accepted
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Largest tax percentage accepted
pub const MAX_TAX_PERCENTAGE: i64 = 100;

/// Reject a negative or oversized rate or fee
pub fn check_amount(label: &str, value: Decimal) -> AppResult<()> {
    if value < Decimal::ZERO {
        return Err(AppError::Validation(format!("{} cannot be negative", label)));
    }
    if value > Decimal::from(MAX_AMOUNT) {
        return Err(AppError::Validation(format!(
            "{} cannot exceed {}",
            label, MAX_AMOUNT
        )));
    }
    Ok(())
}

/// Tax and fee values in force when a booking is priced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Tax applied to the base charge, in percent
    pub tax_percentage: Decimal,

    /// Flat fee added to every booking
    pub maintenance_fee: Decimal,
}

impl PricingSettings {
    /// Reject values outside the accepted ranges
    pub fn validate(&self) -> AppResult<()> {
        if self.tax_percentage < Decimal::ZERO
            || self.tax_percentage > Decimal::from(MAX_TAX_PERCENTAGE)
        {
            return Err(AppError::Validation(format!(
                "Tax percentage must be between 0 and {}",
                MAX_TAX_PERCENTAGE
            )));
        }
        check_amount("Maintenance fee", self.maintenance_fee)
    }
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            tax_percentage: Decimal::from(10),
            maintenance_fee: Decimal::from(500),
        }
    }
}

/// Hourly and daily rate of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleRates {
    pub hourly: Decimal,
    pub daily: Decimal,
}

impl VehicleRates {
    #[inline]
    pub fn for_type(&self, rental_type: RentalType) -> Decimal {
        match rental_type {
            RentalType::Hourly => self.hourly,
            RentalType::Daily => self.daily,
        }
    }
}

/// Itemised charge for a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    pub base: Decimal,
    pub tax: Decimal,
    pub maintenance_fee: Decimal,
    pub total: Decimal,
}

/// Compute the charge for a booking
///
/// # Errors
///
/// Returns `AppError::Validation` if the duration is not in
/// `(0, MAX_DURATION]`, if the rate or settings are out of range, or if the
/// charge cannot be represented.
pub fn quote(
    rates: VehicleRates,
    rental_type: RentalType,
    duration: Decimal,
    pricing: &PricingSettings,
) -> AppResult<CostBreakdown> {
    if duration <= Decimal::ZERO {
        return Err(AppError::Validation(
            "Duration must be greater than zero".to_string(),
        ));
    }
    if duration > Decimal::from(MAX_DURATION) {
        return Err(AppError::Validation(format!(
            "Duration cannot exceed {}",
            MAX_DURATION
        )));
    }

    let rate = rates.for_type(rental_type);
    check_amount(&format!("Vehicle {} rate", rental_type), rate)?;
    pricing.validate()?;

    let out_of_range = || AppError::Validation("Booking cost is out of range".to_string());

    let base = duration.checked_mul(rate).ok_or_else(out_of_range)?;
    let tax = base
        .checked_mul(pricing.tax_percentage)
        .and_then(|t| t.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(out_of_range)?;
    let total = base
        .checked_add(tax)
        .and_then(|t| t.checked_add(pricing.maintenance_fee))
        .ok_or_else(out_of_range)?;

    Ok(CostBreakdown {
        base,
        tax,
        maintenance_fee: pricing.maintenance_fee,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tata_lpt() -> VehicleRates {
        VehicleRates {
            hourly: dec!(300),
            daily: dec!(7000),
        }
    }

    fn pricing(tax: Decimal, fee: Decimal) -> PricingSettings {
        PricingSettings {
            tax_percentage: tax,
            maintenance_fee: fee,
        }
    }

    #[test]
    fn test_daily_quote_example() {
        let cost = quote(
            tata_lpt(),
            RentalType::Daily,
            dec!(2),
            &pricing(dec!(10), dec!(500)),
        )
        .unwrap();

        assert_eq!(cost.base, dec!(14000));
        assert_eq!(cost.tax, dec!(1400));
        assert_eq!(cost.maintenance_fee, dec!(500));
        assert_eq!(cost.total, dec!(15900));
    }

    #[test]
    fn test_hourly_quote_uses_hourly_rate() {
        let cost = quote(
            tata_lpt(),
            RentalType::Hourly,
            dec!(5),
            &pricing(dec!(10), dec!(500)),
        )
        .unwrap();

        // 5 * 300 = 1500, tax 150, fee 500
        assert_eq!(cost.total, dec!(2150));
    }

    #[test]
    fn test_quote_matches_closed_form() {
        let rates = VehicleRates {
            hourly: dec!(1000),
            daily: dec!(25000),
        };
        let settings = pricing(dec!(18), dec!(750));

        for rental_type in [RentalType::Hourly, RentalType::Daily] {
            for duration in [dec!(1), dec!(3), dec!(2.5), dec!(12)] {
                let cost = quote(rates, rental_type, duration, &settings).unwrap();
                let rate = rates.for_type(rental_type);
                let expected = duration * rate * (Decimal::ONE + dec!(18) / dec!(100)) + dec!(750);
                assert_eq!(cost.total, expected, "{rental_type} x {duration}");
            }
        }
    }

    #[test]
    fn test_fractional_duration_and_tax() {
        let cost = quote(
            tata_lpt(),
            RentalType::Hourly,
            dec!(1.5),
            &pricing(dec!(12.5), dec!(0)),
        )
        .unwrap();

        assert_eq!(cost.base, dec!(450));
        assert_eq!(cost.tax, dec!(56.25));
        assert_eq!(cost.total, dec!(506.25));
    }

    #[test]
    fn test_zero_tax_only_adds_fee() {
        let cost = quote(
            tata_lpt(),
            RentalType::Daily,
            dec!(1),
            &pricing(dec!(0), dec!(500)),
        )
        .unwrap();
        assert_eq!(cost.total, dec!(7500));
    }

    #[test]
    fn test_non_positive_duration_rejected() {
        let settings = PricingSettings::default();

        for duration in [dec!(0), dec!(-1), dec!(-0.5)] {
            let result = quote(tata_lpt(), RentalType::Daily, duration, &settings);
            assert!(matches!(result, Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn test_negative_settings_rejected() {
        let result = quote(
            tata_lpt(),
            RentalType::Daily,
            dec!(1),
            &pricing(dec!(-5), dec!(500)),
        );
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_huge_duration_rejected_without_panicking() {
        let settings = PricingSettings::default();

        for duration in [Decimal::MAX, dec!(10000000000000000000000000), dec!(10000.01)] {
            let result = quote(tata_lpt(), RentalType::Daily, duration, &settings);
            assert!(
                matches!(result, Err(AppError::Validation(_))),
                "duration {duration}"
            );
        }

        let longest = quote(
            tata_lpt(),
            RentalType::Daily,
            Decimal::from(MAX_DURATION),
            &settings,
        )
        .unwrap();
        assert_eq!(longest.base, dec!(70000000));
    }

    #[test]
    fn test_out_of_range_rates_and_settings_rejected() {
        let huge_rate = VehicleRates {
            hourly: Decimal::MAX,
            daily: Decimal::MAX,
        };
        assert!(matches!(
            quote(huge_rate, RentalType::Hourly, dec!(2), &PricingSettings::default()),
            Err(AppError::Validation(_))
        ));

        for settings in [
            pricing(dec!(100.01), dec!(500)),
            pricing(Decimal::MAX, dec!(500)),
            pricing(dec!(10), Decimal::MAX),
        ] {
            assert!(matches!(
                quote(tata_lpt(), RentalType::Daily, dec!(1), &settings),
                Err(AppError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_largest_inputs_still_priced() {
        let rates = VehicleRates {
            hourly: Decimal::from(MAX_AMOUNT),
            daily: Decimal::from(MAX_AMOUNT),
        };
        let settings = pricing(
            Decimal::from(MAX_TAX_PERCENTAGE),
            Decimal::from(MAX_AMOUNT),
        );

        let cost = quote(rates, RentalType::Daily, Decimal::from(MAX_DURATION), &settings).unwrap();
        assert_eq!(cost.base, dec!(10000000000000000));
        assert_eq!(cost.tax, cost.base);
        assert_eq!(cost.total, dec!(20001000000000000));
    }

    #[test]
    fn test_check_amount_bounds() {
        assert!(check_amount("Rate", dec!(0)).is_ok());
        assert!(check_amount("Rate", Decimal::from(MAX_AMOUNT)).is_ok());
        assert!(check_amount("Rate", dec!(-1)).is_err());
        assert!(check_amount("Rate", Decimal::from(MAX_AMOUNT) + dec!(1)).is_err());
    }

    #[test]
    fn test_default_pricing_settings() {
        let settings = PricingSettings::default();
        assert_eq!(settings.tax_percentage, dec!(10));
        assert_eq!(settings.maintenance_fee, dec!(500));
    }
}
