use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub const ALREADY_ENROLLED: &str = "This student is already enrolled in this section.";

/// Link between a student and a section. Immutable once created.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub section_id: Uuid,
    pub section_name: String,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEnrollmentDto {
    pub student_id: Uuid,
    pub section_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_enrollment_dto_requires_both_ids() {
        let missing: Result<CreateEnrollmentDto, _> =
            serde_json::from_str(&format!(r#"{{"student_id":"{}"}}"#, Uuid::new_v4()));
        assert!(missing.is_err());
    }

    #[test]
    fn test_enrollment_serializes_denormalized_names() {
        let enrollment = Enrollment {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            student_name: "Ana".to_string(),
            section_id: Uuid::new_v4(),
            section_name: "Turma A".to_string(),
            enrolled_at: Utc::now(),
        };
        let value = serde_json::to_value(&enrollment).unwrap();
        assert_eq!(value["student_name"], "Ana");
        assert_eq!(value["section_name"], "Turma A");
    }
}
