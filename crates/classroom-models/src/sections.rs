//! Section (class) models and DTOs.

use chrono::NaiveDate;
use classroom_core::serde::deserialize_nullable;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub const COMPLETION_BEFORE_START: &str =
    "The completion date must not be earlier than the start date.";

/// A section of a program.
///
/// `program_name` is denormalized and `student_count` is the number of
/// enrollments; both are read-only.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Section {
    pub id: Uuid,
    pub program_id: Uuid,
    pub program_name: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub completion_date: Option<NaiveDate>,
    pub access_link: Option<String>,
    pub student_count: i64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSectionDto {
    pub program_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters."))]
    pub name: String,
    pub start_date: NaiveDate,
    pub completion_date: Option<NaiveDate>,
    #[validate(
        url(message = "Enter a valid URL."),
        length(max = 200, message = "Access link must be at most 200 characters.")
    )]
    pub access_link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSectionDto {
    pub program_id: Option<Uuid>,
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters."))]
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<NaiveDate>)]
    pub completion_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<String>)]
    #[validate(
        url(message = "Enter a valid URL."),
        length(max = 200, message = "Access link must be at most 200 characters.")
    )]
    pub access_link: Option<Option<String>>,
}

impl From<CreateSectionDto> for UpdateSectionDto {
    fn from(dto: CreateSectionDto) -> Self {
        Self {
            program_id: Some(dto.program_id),
            name: Some(dto.name),
            start_date: Some(dto.start_date),
            completion_date: Some(dto.completion_date),
            access_link: Some(dto.access_link),
        }
    }
}

/// A section may not finish before it starts.
pub fn dates_are_consistent(start_date: NaiveDate, completion_date: Option<NaiveDate>) -> bool {
    completion_date.is_none_or(|completion| completion >= start_date)
}
