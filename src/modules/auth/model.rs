//! Token issuance models.

pub use classroom_models::auth::*;
