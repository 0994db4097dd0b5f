//! # Classroom Core
//!
//! Core types, errors, and utilities for the Classroom API.
//!
//! - [`errors`]: Application error type with structured HTTP responses
//! - [`password`]: Password hashing and the default-password rule
//! - [`serde`]: Custom serde helpers for partial updates
//!
//! # Example
//!
//! ```ignore
//! use classroom_core::errors::AppError;
//! use classroom_core::password::{default_password, hash_password};
//!
//! let error = AppError::validation("email", "Already taken.");
//! let hash = hash_password(&default_password("Ana", "@123"))?;
//! ```

pub mod errors;
pub mod password;
pub mod serde;

pub use errors::{AppError, ErrorResponse, FieldErrors};
pub use password::{default_password, hash_password, verify_password};
