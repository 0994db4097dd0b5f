//! Student models and DTOs, re-exported from the `classroom-models` crate.

pub use classroom_models::students::*;
