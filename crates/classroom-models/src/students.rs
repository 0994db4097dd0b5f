//! Student domain models and DTOs.
//!
//! A student is always paired one-to-one with a login account. Creating a
//! student provisions that account (and optionally an enrollment) in the same
//! transaction; see the students service in the API crate.

use classroom_core::serde::deserialize_nullable;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A student as exposed on the wire. `id` and `user_id` are read-only.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// DTO for creating a student.
///
/// When `section_id` is supplied the student is also enrolled into that
/// section, atomically with the account and student rows.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters."))]
    pub name: String,
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Email must be at most 254 characters.")
    )]
    pub email: String,
    #[validate(length(max = 15, message = "Phone must be at most 15 characters."))]
    pub phone: Option<String>,
    pub section_id: Option<Uuid>,
}

/// Full replacement (`PUT`) of a student's editable fields.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ReplaceStudentDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters."))]
    pub name: String,
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Email must be at most 254 characters.")
    )]
    pub email: String,
    #[validate(length(max = 15, message = "Phone must be at most 15 characters."))]
    pub phone: Option<String>,
}

/// Partial update (`PATCH`). Only supplied fields change; `phone: null` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters."))]
    pub name: Option<String>,
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Email must be at most 254 characters.")
    )]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 15, message = "Phone must be at most 15 characters."))]
    pub phone: Option<Option<String>>,
}

impl From<ReplaceStudentDto> for UpdateStudentDto {
    fn from(dto: ReplaceStudentDto) -> Self {
        Self {
            name: Some(dto.name),
            email: Some(dto.email),
            phone: Some(dto.phone),
        }
    }
}

/// Envelope returned by student creation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentCreatedResponse {
    pub detail: String,
    pub data: Student,
}
