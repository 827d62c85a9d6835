//! Data Transfer Objects (DTOs) for API requests and responses
//!
//! Wire format is camelCase JSON; the domain models stay snake_case.

pub mod auth;
pub mod booking;
pub mod common;
pub mod settings;
pub mod stats;
pub mod vehicle;

pub use auth::*;
pub use booking::*;
pub use common::*;
pub use settings::*;
pub use stats::*;
pub use vehicle::*;
