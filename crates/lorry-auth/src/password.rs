//! Password hashing and verification using Argon2

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lorry_core::error::AppError;
use rand_core::OsRng;
use tracing::{debug, error};

/// Password hashing service using Argon2id with default parameters
#[derive(Debug, Clone)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hash a password into a PHC string
    ///
    /// # Errors
    ///
    /// Returns `AppError::PasswordHash` if hashing fails
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, "Failed to hash password");
                AppError::PasswordHash(format!("Password hashing failed: {}", e))
            })?;

        Ok(password_hash.to_string())
    }

    /// Verify a password against a stored hash
    ///
    /// Returns `Ok(false)` on a mismatch and an error only if the stored hash
    /// cannot be parsed or verification itself fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use lorry_auth::PasswordService;
    ///
    /// let passwords = PasswordService::new();
    /// let hash = passwords.hash_password("admin123")?;
    /// assert!(passwords.verify_password("admin123", &hash)?);
    /// assert!(!passwords.verify_password("admin", &hash)?);
    /// # Ok::<(), lorry_core::error::AppError>(())
    /// ```
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            error!(error = %e, "Failed to parse password hash");
            AppError::PasswordHash(format!("Invalid password hash format: {}", e))
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => {
                debug!("Password verification failed: incorrect password");
                Ok(false)
            }
            Err(e) => {
                error!(error = %e, "Password verification error");
                Err(AppError::PasswordHash(format!(
                    "Password verification failed: {}",
                    e
                )))
            }
        }
    }
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password() {
        let service = PasswordService::new();
        let hash = service.hash_password("nishanth").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(!hash.contains("nishanth"));
    }

    #[test]
    fn test_verify_password() {
        let service = PasswordService::new();
        let hash = service.hash_password("admin123").unwrap();

        assert!(service.verify_password("admin123", &hash).unwrap());
        assert!(!service.verify_password("admin124", &hash).unwrap());
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let service = PasswordService::new();

        let hash1 = service.hash_password("same_password").unwrap();
        let hash2 = service.hash_password("same_password").unwrap();
        assert_ne!(hash1, hash2);
        assert!(service.verify_password("same_password", &hash2).unwrap());
    }

    #[test]
    fn test_invalid_hash_format() {
        let service = PasswordService::new();
        let result = service.verify_password("password", "$2a$10$not-an-argon-hash");

        assert!(matches!(result, Err(AppError::PasswordHash(_))));
    }
}
