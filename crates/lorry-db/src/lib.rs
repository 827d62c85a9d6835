//! Lorry Rental Storage Layer
//!
//! This crate provides the repository implementations behind the traits in
//! `lorry-core`. It includes:
//!
//! - PostgreSQL connection pool management and embedded migrations (sqlx)
//! - `Pg*Repository` implementations for every domain entity
//! - In-memory repositories for local runs and tests

pub mod memory;
pub mod pool;
pub mod repositories;

pub use memory::memory_repositories;
pub use pool::{create_pool, run_migrations};
pub use repositories::*;

// Re-export commonly used types
pub use lorry_core::{AppError, AppResult};
pub use sqlx::PgPool;
