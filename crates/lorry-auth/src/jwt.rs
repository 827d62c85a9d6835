//! JWT token creation and validation service

use crate::claims::Claims;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lorry_core::error::AppError;
use lorry_core::models::UserRole;
use tracing::{debug, error, warn};

/// JWT Service for token creation and validation
#[derive(Clone)]
pub struct JwtService {
    /// Default token expiration time in seconds
    expiration_secs: i64,

    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Create a new JWT service
    ///
    /// # Examples
    ///
    /// ```
    /// use lorry_auth::JwtService;
    ///
    /// let jwt_service = JwtService::new("my-secret-key", 86_400);
    /// ```
    pub fn new(secret: &str, expiration_secs: i64) -> Self {
        Self {
            expiration_secs,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Create a signed token from claims
    ///
    /// Claims without an expiration get the service default.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if signing fails
    pub fn create_token(&self, claims: &Claims) -> Result<String, AppError> {
        let mut token_claims = claims.clone();

        if token_claims.exp == 0 {
            let exp = Utc::now() + Duration::seconds(self.expiration_secs);
            token_claims.exp = exp.timestamp();
        }

        debug!(
            user_id = token_claims.id,
            username = %token_claims.username,
            role = %token_claims.role,
            exp = token_claims.exp,
            "Creating JWT token"
        );

        encode(&Header::default(), &token_claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "Failed to create JWT token");
            AppError::Internal(format!("Token creation failed: {}", e))
        })
    }

    /// Create a token for a user
    pub fn create_token_for_user(
        &self,
        id: i32,
        username: &str,
        role: UserRole,
    ) -> Result<String, AppError> {
        self.create_token(&Claims::new(id, username, role))
    }

    /// Validate a token and extract its claims
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `AppError::TokenExpired` if the token has expired
    /// - `AppError::InvalidToken` if the token is malformed or badly signed
    ///
    /// # Examples
    ///
    /// ```
    /// use lorry_auth::JwtService;
    /// use lorry_core::models::UserRole;
    ///
    /// let jwt_service = JwtService::new("secret", 3600);
    /// let token = jwt_service.create_token_for_user(1, "nishanth", UserRole::Customer)?;
    /// let claims = jwt_service.validate_token(&token)?;
    /// assert_eq!(claims.username, "nishanth");
    /// # Ok::<(), lorry_core::error::AppError>(())
    /// ```
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        warn!("Token expired");
                        AppError::TokenExpired
                    }
                    _ => {
                        warn!(error = %e, "Invalid token");
                        AppError::InvalidToken(format!("Token validation failed: {}", e))
                    }
                }
            })?;

        let claims = token_data.claims;

        // Validation allows some leeway on `exp`
        if claims.is_expired() {
            warn!(username = %claims.username, "Token expired");
            return Err(AppError::TokenExpired);
        }

        debug!(
            user_id = claims.id,
            role = %claims.role,
            "Token validated successfully"
        );

        Ok(claims)
    }

    /// Lifetime of tokens created by this service
    pub fn expiration_secs(&self) -> i64 {
        self.expiration_secs
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration_secs", &self.expiration_secs)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-12345";

    #[test]
    fn test_create_and_validate_token() {
        let jwt_service = JwtService::new(TEST_SECRET, 3600);
        let token = jwt_service
            .create_token_for_user(1, "nishanth", UserRole::Customer)
            .unwrap();
        assert!(!token.is_empty());

        let decoded = jwt_service.validate_token(&token).unwrap();
        assert_eq!(decoded.id, 1);
        assert_eq!(decoded.username, "nishanth");
        assert_eq!(decoded.role, UserRole::Customer);
    }

    #[test]
    fn test_default_expiration_is_applied() {
        let jwt_service = JwtService::new(TEST_SECRET, 86_400);
        let token = jwt_service
            .create_token_for_user(2, "admin", UserRole::Admin)
            .unwrap();
        let decoded = jwt_service.validate_token(&token).unwrap();

        let now = Utc::now().timestamp();
        assert!(decoded.exp > now + 86_000);
        assert!(decoded.exp <= now + 86_400);
    }

    #[test]
    fn test_expired_token() {
        let jwt_service = JwtService::new(TEST_SECRET, 3600);
        let claims = Claims::with_expiration(1, "user", UserRole::Customer, -10);
        let token = jwt_service.create_token(&claims).unwrap();

        let result = jwt_service.validate_token(&token);
        assert!(matches!(result, Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_long_expired_token() {
        let jwt_service = JwtService::new(TEST_SECRET, 3600);
        let claims = Claims::with_expiration(1, "user", UserRole::Customer, -7200);
        let token = jwt_service.create_token(&claims).unwrap();

        let result = jwt_service.validate_token(&token);
        assert!(matches!(result, Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_invalid_token() {
        let jwt_service = JwtService::new(TEST_SECRET, 3600);

        let result = jwt_service.validate_token("invalid.token.here");
        assert!(matches!(result, Err(AppError::InvalidToken(_))));
    }

    #[test]
    fn test_token_with_different_secret() {
        let issuer = JwtService::new("secret1", 3600);
        let verifier = JwtService::new("secret2", 3600);

        let token = issuer
            .create_token_for_user(1, "user", UserRole::Customer)
            .unwrap();

        let result = verifier.validate_token(&token);
        assert!(matches!(result, Err(AppError::InvalidToken(_))));
    }

    #[test]
    fn test_debug_impl_hides_secret() {
        let jwt_service = JwtService::new(TEST_SECRET, 3600);
        let debug_str = format!("{:?}", jwt_service);

        assert!(debug_str.contains("3600"));
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains(TEST_SECRET));
    }
}
