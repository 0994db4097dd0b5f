//! Feature modules. Each one follows the same layout:
//!
//! - `controller.rs`: HTTP handlers with OpenAPI annotations
//! - `service.rs`: queries and business rules
//! - `model.rs`: re-exported models and DTOs
//! - `router.rs`: Axum router configuration

pub mod auth;
pub mod enrollments;
pub mod programs;
pub mod resources;
pub mod sections;
pub mod students;
