//! # Classroom CLI
//!
//! Administrative commands and database seeding for the Classroom API.
//!
//! ## Usage
//!
//! ```ignore
//! use classroom_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(3); // 3 programs with defaults
//! seed_all(&pool, config, "@123").await?;
//! ```

pub mod admin;
pub mod seeder;
