//! Authentication service

use lorry_auth::{JwtService, PasswordService};
use lorry_core::{
    models::UserInfo,
    traits::{Repositories, UserRepository},
    AppError, AppResult,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Successful login: signed token plus the public view of the user
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: UserInfo,
}

/// Credential check and token issuance
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt: Arc<JwtService>,
    passwords: PasswordService,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(repos: &Repositories, jwt: Arc<JwtService>, passwords: PasswordService) -> Self {
        Self {
            users: repos.users.clone(),
            jwt,
            passwords,
        }
    }

    /// Verify credentials and issue a token
    ///
    /// Unknown users and wrong passwords fail the same way.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        let username = username.trim();
        debug!(username = %username, "Processing login request");

        let user = self.users.find_by_username(username).await?.ok_or_else(|| {
            info!(username = %username, "Login failed: user not found");
            AppError::InvalidCredentials
        })?;

        let valid = self
            .passwords
            .verify_password(password, &user.password_hash)
            .map_err(|e| {
                error!("Password verification error: {}", e);
                AppError::Internal("Password verification failed".to_string())
            })?;

        if !valid {
            info!(username = %username, "Login failed: invalid password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self
            .jwt
            .create_token_for_user(user.id, &user.username, user.role)?;

        info!(username = %username, role = %user.role, "Login successful");

        Ok(LoginOutcome {
            token,
            user: UserInfo::from(&user),
        })
    }
}
