//! Authentication DTOs

use lorry_core::models::UserInfo;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username and password are required"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Username and password are required"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub message: String,

    /// Signed token to send as `Authorization: Bearer <token>`
    pub token: String,

    pub user: UserInfo,
}

impl LoginResponse {
    pub fn new(token: String, user: UserInfo) -> Self {
        Self {
            message: "Login successful".to_string(),
            token,
            user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorry_core::models::UserRole;

    #[test]
    fn test_login_request_validation() {
        let valid: LoginRequest =
            serde_json::from_str(r#"{"username": "admin", "password": "admin123"}"#).unwrap();
        assert!(valid.validate().is_ok());

        let missing: LoginRequest = serde_json::from_str(r#"{"username": "admin"}"#).unwrap();
        assert!(missing.validate().is_err());
    }

    #[test]
    fn test_login_response_shape() {
        let response = LoginResponse::new(
            "token".to_string(),
            UserInfo {
                id: 2,
                username: "admin".to_string(),
                role: UserRole::Admin,
            },
        );
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["message"], "Login successful");
        assert_eq!(body["user"]["role"], "admin");
        assert_eq!(body["user"]["id"], 2);
    }
}
