//! User repository implementation
//!
//! Provides PostgreSQL-backed storage for login accounts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lorry_core::{
    models::{User, UserRole},
    traits::UserRepository,
    AppError, AppResult,
};
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, instrument};

use super::is_unique_violation;

/// Database row representation of a user
#[derive(Debug, FromRow)]
struct UserRow {
    id: i32,
    username: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            role: PgUserRepository::parse_role(&row.role),
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL implementation of UserRepository
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Parse user role from string
    fn parse_role(s: &str) -> UserRole {
        UserRole::from_str(s).unwrap_or(UserRole::Customer)
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        debug!("Finding user by username: {}", username);

        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash, role, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding user by username: {}", e);
            AppError::Database(format!("Failed to find user: {}", e))
        })?;

        Ok(row.map(User::from))
    }

    #[instrument(skip(self, entity), fields(username = %entity.username))]
    async fn create(&self, entity: &User) -> AppResult<User> {
        debug!("Creating user: {}", entity.username);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, role, created_at
            "#,
        )
        .bind(&entity.username)
        .bind(&entity.password_hash)
        .bind(entity.role.to_string())
        .bind(entity.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::AlreadyExists(format!("User {} already exists", entity.username))
            } else {
                error!("Database error creating user: {}", e);
                AppError::Database(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting users: {}", e);
                AppError::Database(format!("Failed to count users: {}", e))
            })?;

        Ok(result.0)
    }
}
