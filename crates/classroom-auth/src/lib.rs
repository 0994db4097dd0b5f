//! # Classroom Auth
//!
//! Access-token claims and JWT helpers for the Classroom API.
//!
//! The service issues a single kind of token: a signed access token carrying
//! the account id, username and staff flag. There are no refresh tokens.
//!
//! # Example
//!
//! ```ignore
//! use classroom_auth::{create_access_token, verify_token};
//! use classroom_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "ana@x.com", false, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert!(!claims.is_staff);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
