//! Resource models, DTOs and the student visibility rule.

pub use classroom_models::resources::*;
