//! Learning resources attached to sections.
//!
//! Students only see a resource when it is published (`draft == false`) and
//! either its section has started or the resource is flagged `pre_access`.

use chrono::{DateTime, NaiveDate, Utc};
use classroom_core::serde::deserialize_nullable;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "resource_kind", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ResourceKind {
    Pdf,
    Video,
    Zip,
}

impl ResourceKind {
    /// Human-readable label shown next to the stored code.
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Pdf => "PDF",
            ResourceKind::Video => "Video",
            ResourceKind::Zip => "ZIP archive",
        }
    }
}

/// Row shape read from the database, joined with the owning section.
#[derive(Debug, Clone, FromRow)]
pub struct ResourceRecord {
    pub id: Uuid,
    pub section_id: Uuid,
    pub section_name: String,
    pub section_start_date: NaiveDate,
    pub kind: ResourceKind,
    pub name: String,
    pub description: Option<String>,
    pub pre_access: bool,
    pub draft: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResourceRecord {
    pub fn is_visible_to_students(&self, today: NaiveDate) -> bool {
        is_visible_to_students(self.draft, self.pre_access, self.section_start_date, today)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Resource {
    pub id: Uuid,
    pub section_id: Uuid,
    pub section_name: String,
    pub kind: ResourceKind,
    pub kind_label: String,
    pub name: String,
    pub description: Option<String>,
    pub pre_access: bool,
    pub draft: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResourceRecord> for Resource {
    fn from(record: ResourceRecord) -> Self {
        Self {
            id: record.id,
            section_id: record.section_id,
            section_name: record.section_name,
            kind: record.kind,
            kind_label: record.kind.label().to_string(),
            name: record.name,
            description: record.description,
            pre_access: record.pre_access,
            draft: record.draft,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateResourceDto {
    pub section_id: Uuid,
    pub kind: ResourceKind,
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters."))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub pre_access: bool,
    #[serde(default)]
    pub draft: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateResourceDto {
    pub section_id: Option<Uuid>,
    pub kind: Option<ResourceKind>,
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters."))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub pre_access: Option<bool>,
    pub draft: Option<bool>,
}

impl From<CreateResourceDto> for UpdateResourceDto {
    fn from(dto: CreateResourceDto) -> Self {
        Self {
            section_id: Some(dto.section_id),
            kind: Some(dto.kind),
            name: Some(dto.name),
            description: Some(dto.description),
            pre_access: Some(dto.pre_access),
            draft: Some(dto.draft),
        }
    }
}

/// Whether a student enrolled in the owning section may see the resource today.
pub fn is_visible_to_students(
    draft: bool,
    pre_access: bool,
    section_start: NaiveDate,
    today: NaiveDate,
) -> bool {
    !draft && (today >= section_start || pre_access)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_draft_is_never_visible() {
        let start = date(2025, 1, 1);
        assert!(!is_visible_to_students(true, false, start, date(2025, 2, 1)));
        assert!(!is_visible_to_students(true, true, start, date(2024, 12, 1)));
    }

    #[test]
    fn test_published_visible_once_section_started() {
        let start = date(2025, 1, 1);
        assert!(is_visible_to_students(false, false, start, start));
        assert!(is_visible_to_students(false, false, start, date(2025, 3, 1)));
        assert!(!is_visible_to_students(false, false, start, date(2024, 12, 31)));
    }

    #[test]
    fn test_pre_access_visible_before_start() {
        let start = date(2025, 1, 1);
        assert!(is_visible_to_students(false, true, start, date(2024, 12, 1)));
    }

    #[test]
    fn test_kind_labels_and_wire_codes() {
        assert_eq!(ResourceKind::Pdf.label(), "PDF");
        assert_eq!(ResourceKind::Video.label(), "Video");
        assert_eq!(ResourceKind::Zip.label(), "ZIP archive");
        assert_eq!(serde_json::to_value(ResourceKind::Video).unwrap(), "VIDEO");
        let kind: ResourceKind = serde_json::from_str(r#""ZIP""#).unwrap();
        assert_eq!(kind, ResourceKind::Zip);
        assert!(serde_json::from_str::<ResourceKind>(r#""DOC""#).is_err());
    }

    #[test]
    fn test_create_resource_dto_flags_default_false() {
        let json = format!(
            r#"{{"section_id":"{}","kind":"PDF","name":"Slides"}}"#,
            Uuid::new_v4()
        );
        let dto: CreateResourceDto = serde_json::from_str(&json).unwrap();
        assert!(!dto.pre_access);
        assert!(!dto.draft);
    }

    #[test]
    fn test_record_converts_with_label() {
        let now = Utc::now();
        let record = ResourceRecord {
            id: Uuid::new_v4(),
            section_id: Uuid::new_v4(),
            section_name: "Turma A".to_string(),
            section_start_date: date(2025, 1, 1),
            kind: ResourceKind::Zip,
            name: "Starter".to_string(),
            description: None,
            pre_access: false,
            draft: false,
            created_at: now,
            updated_at: now,
        };
        assert!(record.is_visible_to_students(date(2025, 1, 2)));
        let resource = Resource::from(record);
        assert_eq!(resource.kind_label, "ZIP archive");
    }
}
