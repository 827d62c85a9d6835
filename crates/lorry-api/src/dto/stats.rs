//! Admin dashboard DTOs

use lorry_core::models::BookingStats;
use rust_decimal::Decimal;
use serde::Serialize;

/// Booking counters shown on the admin dashboard
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_bookings: i64,
    pub pending_bookings: i64,
    pub confirmed_bookings: i64,
    pub cancelled_bookings: i64,
    /// Sum of confirmed booking costs
    pub total_revenue: Decimal,
}

impl From<BookingStats> for StatsResponse {
    fn from(stats: BookingStats) -> Self {
        Self {
            total_bookings: stats.total_bookings,
            pending_bookings: stats.pending_bookings,
            confirmed_bookings: stats.confirmed_bookings,
            cancelled_bookings: stats.cancelled_bookings,
            total_revenue: stats.total_revenue,
        }
    }
}
