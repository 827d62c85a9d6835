//! Domain models for the lorry rental backend

pub mod booking;
pub mod settings;
pub mod user;
pub mod vehicle;

pub use booking::{
    booking_code, parse_booking_date, Booking, BookingStats, BookingStatus, NewBooking,
    RentalType, StatusPolicy,
};
pub use settings::{qr_code_url, PaymentMethod, PaymentSetting, Settings};
pub use user::{Actor, User, UserInfo, UserRole};
pub use vehicle::{Vehicle, VehicleUpdate};
