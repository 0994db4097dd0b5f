//! Application configuration.
//!
//! Re-exports the environment-driven settings from the `classroom-config` crate.

pub use classroom_config::{
    CorsConfig, JwtConfig, ProvisioningConfig, RateLimitConfig, ServerConfig, cors, jwt,
    provisioning, rate_limit, server,
};
