//! Lorry Rental Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the lorry rental backend. It includes:
//!
//! - Domain models (User, Vehicle, Booking, Settings, PaymentSetting)
//! - The booking cost calculator and status transition guard
//! - Repository traits implemented by the storage layer
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod traits;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
