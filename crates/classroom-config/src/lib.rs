//! # Classroom Config
//!
//! Configuration types for the Classroom API, loaded from environment variables:
//!
//! - [`jwt`]: JWT signing secret and access-token lifetime
//! - [`cors`]: allowed browser origins
//! - [`rate_limit`]: token endpoint rate limiting
//! - [`provisioning`]: student account provisioning
//! - [`server`]: listener addresses
//!
//! # Example
//!
//! ```ignore
//! use classroom_config::{JwtConfig, CorsConfig, ProvisioningConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let provisioning = ProvisioningConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod provisioning;
pub mod rate_limit;
pub mod server;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use provisioning::ProvisioningConfig;
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;
