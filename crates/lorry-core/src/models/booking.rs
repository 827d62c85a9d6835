//! Booking model and lifecycle
//!
//! A booking holds a frozen cost computed at creation and moves through
//! `pending -> confirmed | cancelled`. How strictly that lifecycle is enforced
//! is decided by [`StatusPolicy`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::{AppError, AppResult};

/// Prefix of the public booking code
pub const BOOKING_CODE_PREFIX: &str = "LR";

/// Billing mode selecting which vehicle rate applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RentalType {
    Hourly,
    Daily,
}

impl fmt::Display for RentalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RentalType::Hourly => write!(f, "hourly"),
            RentalType::Daily => write!(f, "daily"),
        }
    }
}

impl RentalType {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hourly" => Some(RentalType::Hourly),
            "daily" => Some(RentalType::Daily),
            _ => None,
        }
    }
}

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting an administrator's decision
    #[default]
    Pending,
    /// Accepted; counts towards revenue
    Confirmed,
    /// Rejected or withdrawn
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
    ];

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// Confirmed and cancelled bookings are final under the strict policy
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Confirmed | BookingStatus::Cancelled)
    }

    /// Check whether moving to `next` is allowed
    ///
    /// Re-applying the current status is always allowed.
    pub fn can_transition_to(&self, next: BookingStatus, policy: StatusPolicy) -> bool {
        if *self == next {
            return true;
        }

        match policy {
            StatusPolicy::Permissive => true,
            StatusPolicy::Strict => !self.is_terminal() && next.is_terminal(),
        }
    }

    /// Validate a transition and return the new status
    pub fn transition_to(&self, next: BookingStatus, policy: StatusPolicy) -> AppResult<Self> {
        if self.can_transition_to(next, policy) {
            Ok(next)
        } else {
            Err(AppError::InvalidStatusTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }
}

/// How booking status changes are constrained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Any of the three statuses may follow any other
    #[default]
    Permissive,
    /// Only pending bookings may change, and only to confirmed or cancelled
    Strict,
}

impl StatusPolicy {
    pub fn from_strict_flag(strict: bool) -> Self {
        if strict {
            StatusPolicy::Strict
        } else {
            StatusPolicy::Permissive
        }
    }
}

/// Booking entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    /// Internal identifier
    pub id: Uuid,

    /// Public booking code (`LR<epoch millis>`)
    pub booking_id: String,

    /// Owning customer
    pub customer_id: i32,

    /// Customer name as entered on the form
    pub customer_name: String,

    /// Customer contact number
    pub contact: String,

    /// Requested rental date
    pub date: DateTime<Utc>,

    /// Pickup location
    pub location: String,

    /// Vehicle name (vehicles are referenced by name)
    pub vehicle: String,

    /// Billing mode
    pub rental_type: RentalType,

    /// Number of hours or days
    pub duration: Decimal,

    /// Total charge, frozen at creation
    pub cost: Decimal,

    /// Payment method chosen by the customer
    pub payment_method: String,

    /// Lifecycle status
    pub status: BookingStatus,

    /// Creation timestamp
    pub timestamp: DateTime<Utc>,
}

impl Booking {
    /// Whether the booking counts towards revenue
    pub fn is_revenue(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }
}

/// Validated booking request, before pricing
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer_name: String,
    pub contact: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub vehicle: String,
    pub rental_type: RentalType,
    pub duration: Decimal,
    pub payment_method: String,
}

/// Aggregate booking counters for the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookingStats {
    pub total_bookings: i64,
    pub pending_bookings: i64,
    pub confirmed_bookings: i64,
    pub cancelled_bookings: i64,
    /// Sum of the cost of confirmed bookings
    pub total_revenue: Decimal,
}

/// Build the public booking code for a creation instant
pub fn booking_code(at: DateTime<Utc>) -> String {
    format!("{}{}", BOOKING_CODE_PREFIX, at.timestamp_millis())
}

/// Parse a requested date as sent by the booking form
///
/// Accepts RFC 3339 timestamps, `datetime-local` values (`2024-05-01T09:30`),
/// and plain dates (`2024-05-01`, interpreted as midnight UTC).
pub fn parse_booking_date(raw: &str) -> AppResult<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(AppError::Validation(format!("Invalid booking date: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    #[test]
    fn test_status_parsing() {
        assert_eq!(BookingStatus::from_str("pending"), Some(BookingStatus::Pending));
        assert_eq!(BookingStatus::from_str("CONFIRMED"), Some(BookingStatus::Confirmed));
        assert_eq!(BookingStatus::from_str("cancelled"), Some(BookingStatus::Cancelled));
        assert_eq!(BookingStatus::from_str("refunded"), None);
    }

    #[test]
    fn test_permissive_policy_allows_everything() {
        for from in BookingStatus::ALL {
            for to in BookingStatus::ALL {
                assert!(from.can_transition_to(to, StatusPolicy::Permissive));
            }
        }
    }

    #[test]
    fn test_strict_policy() {
        let strict = StatusPolicy::Strict;

        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Confirmed, strict));
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Cancelled, strict));
        assert!(!BookingStatus::Confirmed.can_transition_to(BookingStatus::Pending, strict));
        assert!(!BookingStatus::Confirmed.can_transition_to(BookingStatus::Cancelled, strict));
        assert!(!BookingStatus::Cancelled.can_transition_to(BookingStatus::Confirmed, strict));

        // Idempotent re-application
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Confirmed, strict));
    }

    #[test]
    fn test_transition_error() {
        let result =
            BookingStatus::Cancelled.transition_to(BookingStatus::Pending, StatusPolicy::Strict);
        match result {
            Err(AppError::InvalidStatusTransition { from, to }) => {
                assert_eq!(from, "cancelled");
                assert_eq!(to, "pending");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_policy_from_flag() {
        assert_eq!(StatusPolicy::from_strict_flag(true), StatusPolicy::Strict);
        assert_eq!(StatusPolicy::from_strict_flag(false), StatusPolicy::Permissive);
    }

    #[test]
    fn test_booking_code() {
        let at = Utc.timestamp_millis_opt(1_717_000_000_123).unwrap();
        assert_eq!(booking_code(at), "LR1717000000123");
    }

    #[test]
    fn test_parse_booking_date_formats() {
        let date = parse_booking_date("2024-05-01").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 5, 1));
        assert_eq!(date.hour(), 0);

        let local = parse_booking_date("2024-05-01T09:30").unwrap();
        assert_eq!((local.hour(), local.minute()), (9, 30));

        let rfc = parse_booking_date("2024-05-01T09:30:00+05:30").unwrap();
        assert_eq!(rfc.hour(), 4);

        assert!(matches!(
            parse_booking_date("next tuesday"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_rental_type_serialization() {
        assert_eq!(serde_json::to_string(&RentalType::Hourly).unwrap(), "\"hourly\"");
        assert_eq!(RentalType::from_str("Daily"), Some(RentalType::Daily));
        assert_eq!(RentalType::from_str("weekly"), None);
    }
}
