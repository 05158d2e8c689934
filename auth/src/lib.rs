//! Authentication utilities library
//!
//! Provides the authentication core shared by services:
//! - Password hashing (bcrypt, cost 10)
//! - Stateless access tokens (HMAC-signed JWT) behind the `TokenCodec` trait
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{AuthorizationClaims, JwtHandler, SigningContext, TokenCodec};
//! use chrono::Duration;
//!
//! let context = SigningContext::new("secret_key_at_least_32_bytes_long!", Duration::hours(24));
//! let handler = JwtHandler::new(&context);
//! let claims = AuthorizationClaims::new("user123").with_issuer("my-service");
//! let token = handler.generate_token(&claims).unwrap();
//! let decoded = handler.validate_token(&token).unwrap();
//! assert_eq!(decoded.subject, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{AuthorizationClaims, Authenticator, SigningContext};
//! use chrono::Duration;
//!
//! let context = SigningContext::new("secret_key_at_least_32_bytes_long!", Duration::hours(24));
//! let auth = Authenticator::new(&context);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Sign in: verify and issue token
//! let claims = AuthorizationClaims::new("user123").with_issuer("my-service");
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! // Validate token
//! let decoded = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.subject, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::AuthorizationClaims;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SigningContext;
pub use jwt::TokenCodec;
pub use password::PasswordError;
pub use password::PasswordHasher;
