//! Authentication and authorization for the lorry rental backend
//!
//! This crate provides JWT-based authentication, password hashing with Argon2,
//! and Actix-web extractors for role-based access control.
//!
//! # Examples
//!
//! ## Issuing a token at login
//!
//! ```no_run
//! use lorry_auth::JwtService;
//! use lorry_core::models::UserRole;
//!
//! let jwt_service = JwtService::new("your-secret-key", 24 * 3600);
//! let token = jwt_service.create_token_for_user(2, "admin", UserRole::Admin)?;
//! # Ok::<(), lorry_core::error::AppError>(())
//! ```
//!
//! ## Using extractors in Actix-web
//!
//! ```no_run
//! use actix_web::HttpResponse;
//! use lorry_auth::{AdminUser, AuthenticatedUser};
//!
//! async fn protected_route(user: AuthenticatedUser) -> HttpResponse {
//!     HttpResponse::Ok().json(serde_json::json!({ "username": user.username() }))
//! }
//!
//! async fn admin_route(_admin: AdminUser) -> HttpResponse {
//!     HttpResponse::Ok().json(serde_json::json!({ "message": "Admin access granted" }))
//! }
//! ```

pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use claims::Claims;
pub use jwt::JwtService;
pub use middleware::{AdminUser, AuthenticatedUser};
pub use password::PasswordService;

#[cfg(test)]
mod tests {
    use super::*;
    use lorry_core::models::UserRole;

    #[test]
    fn test_integration_jwt_and_password() {
        let password_service = PasswordService::new();
        let jwt_service = JwtService::new("test-secret-key-12345", 3600);

        let hash = password_service.hash_password("nishanth").unwrap();
        assert!(password_service.verify_password("nishanth", &hash).unwrap());

        let token = jwt_service
            .create_token_for_user(1, "nishanth", UserRole::Customer)
            .unwrap();
        let claims = jwt_service.validate_token(&token).unwrap();

        assert_eq!(claims.username, "nishanth");
        assert_eq!(claims.role, UserRole::Customer);
    }
}
