//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Directory holding the static frontend (index.html and assets)
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_static_dir() -> String {
    "./public".to_string()
}

/// Storage backend selection
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// PostgreSQL through sqlx
    #[default]
    Postgres,
    /// Process-local store, lost on restart
    Memory,
}

/// Database configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Which store backs the repositories
    #[serde(default)]
    pub backend: StorageBackend,

    /// PostgreSQL connection URL
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Idle connection timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

fn default_database_url() -> String {
    "postgresql://localhost/lorry_transport".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    2
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

/// Authentication configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// JWT signing secret
    pub jwt_secret: String,

    /// JWT token expiration in hours
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration_hours: i64,
}

fn default_jwt_expiration() -> i64 {
    24
}

impl AuthConfig {
    /// Token lifetime in seconds
    pub fn expiration_secs(&self) -> i64 {
        self.jwt_expiration_hours * 3600
    }
}

/// Booking rules that are product decisions rather than invariants
#[derive(Debug, Deserialize, Clone)]
pub struct BookingConfig {
    /// Only allow pending -> confirmed | cancelled and treat those as terminal
    #[serde(default)]
    pub strict_status_transitions: bool,

    /// Refuse bookings for vehicles flagged unavailable
    #[serde(default = "default_reject_unavailable")]
    pub reject_unavailable_vehicles: bool,
}

fn default_reject_unavailable() -> bool {
    true
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            strict_status_transitions: false,
            reject_unavailable_vehicles: true,
        }
    }
}

/// Startup data seeding
#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    /// Insert default users, vehicles, and settings into empty tables
    #[serde(default = "default_seed_enabled")]
    pub enabled: bool,
}

fn default_seed_enabled() -> bool {
    true
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.workers", num_cpus::get() as i64)?
            .set_default("server.static_dir", "./public")?
            .set_default("database.backend", "postgres")?
            .set_default("database.url", default_database_url())?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("auth.jwt_secret", "your_jwt_secret_key_here")?
            .set_default("auth.jwt_expiration_hours", 24)?
            .set_default("booking.strict_status_transitions", false)?
            .set_default("booking.reject_unavailable_vehicles", true)?
            .set_default("seed.enabled", true)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with LORRY_ prefix
            .add_source(
                Environment::with_prefix("LORRY")
                    .separator("__")
                    .try_parsing(true),
            );

        // Plain variables used by existing deployments
        if let Ok(url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", url)?;
        }
        if let Ok(secret) = env::var("JWT_SECRET") {
            builder = builder.set_override("auth.jwt_secret", secret)?;
        }
        if let Ok(port) = env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("LORRY").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
