//! Shared helpers for the feature modules.
//!
//! - [`db`]: classification of PostgreSQL constraint violations

pub mod db;

use chrono::NaiveDate;

/// The server's local calendar date, against which resource visibility is
/// evaluated.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
