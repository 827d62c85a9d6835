//! JWT Claims structure
//!
//! Tokens carry the user's id, username and role so handlers can authorise
//! without a user lookup.

use chrono::{Duration, Utc};
use lorry_core::models::{Actor, UserRole};
use serde::{Deserialize, Serialize};

/// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// User id
    pub id: i32,

    /// Username
    pub username: String,

    /// User role
    pub role: UserRole,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create new claims for a user
    ///
    /// The expiration is left at zero and filled in by `JwtService`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lorry_auth::Claims;
    /// use lorry_core::models::UserRole;
    ///
    /// let claims = Claims::new(2, "admin", UserRole::Admin);
    /// assert_eq!(claims.username, "admin");
    /// assert_eq!(claims.role, UserRole::Admin);
    /// ```
    pub fn new(id: i32, username: &str, role: UserRole) -> Self {
        Self {
            id,
            username: username.to_string(),
            role,
            iat: Utc::now().timestamp(),
            exp: 0,
        }
    }

    /// Create new claims with custom expiration duration
    pub fn with_expiration(id: i32, username: &str, role: UserRole, expires_in_secs: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::seconds(expires_in_secs);

        Self {
            id,
            username: username.to_string(),
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }

    /// Check if user has admin privileges
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// The caller identity handed to the services
    pub fn actor(&self) -> Actor {
        Actor::new(self.id, self.username.as_str(), self.role)
    }
}
