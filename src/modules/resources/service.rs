use chrono::NaiveDate;
use classroom_core::AppError;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::policy::Scope;
use crate::modules::resources::model::{CreateResourceDto, ResourceRecord, UpdateResourceDto};
use crate::utils::db::{Violation, violation};

const RESOURCE_SELECT: &str = r#"
    SELECT r.id, r.section_id, sec.name AS section_name, sec.start_date AS section_start_date,
           r.kind, r.name, r.description, r.pre_access, r.draft, r.created_at, r.updated_at
    FROM resources r
    JOIN sections sec ON sec.id = r.section_id
"#;

const ENROLLED_FILTER: &str = "($1::uuid IS NULL OR EXISTS (
        SELECT 1 FROM enrollments en WHERE en.section_id = r.section_id AND en.student_id = $1
    ))";

/// Same rule as `is_visible_to_students`, applied only to student scopes.
const VISIBLE_FILTER: &str =
    "($1::uuid IS NULL OR (NOT r.draft AND (sec.start_date <= $2 OR r.pre_access)))";

pub struct ResourceService;

impl ResourceService {
    /// Resources a member of `scope` may see on `today`, optionally narrowed
    /// to one section. Staff scopes are not filtered for visibility.
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        scope: Scope,
        today: NaiveDate,
        section_id: Option<Uuid>,
    ) -> Result<Vec<ResourceRecord>, AppError> {
        let Some(student_id) = scope.student_filter() else {
            return Ok(Vec::new());
        };

        sqlx::query_as::<_, ResourceRecord>(&format!(
            "{} WHERE {} AND {} AND ($3::uuid IS NULL OR r.section_id = $3)
             ORDER BY r.created_at DESC",
            RESOURCE_SELECT, ENROLLED_FILTER, VISIBLE_FILTER
        ))
        .bind(student_id)
        .bind(today)
        .bind(section_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    /// Looks a resource up among the sections of `scope`. Visibility is left
    /// to the object-level policy.
    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, scope: Scope, id: Uuid) -> Result<ResourceRecord, AppError> {
        let not_found = || AppError::not_found(anyhow::anyhow!("Resource not found"));
        let student_id = scope.student_filter().ok_or_else(not_found)?;

        sqlx::query_as::<_, ResourceRecord>(&format!(
            "{} WHERE {} AND r.id = $2",
            RESOURCE_SELECT, ENROLLED_FILTER
        ))
        .bind(student_id)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(not_found)
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateResourceDto) -> Result<ResourceRecord, AppError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO resources (section_id, kind, name, description, pre_access, draft)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(dto.section_id)
        .bind(dto.kind)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.pre_access)
        .bind(dto.draft)
        .fetch_one(db)
        .await
        .map_err(map_write_error)?;

        Self::get(db, Scope::All, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateResourceDto,
    ) -> Result<ResourceRecord, AppError> {
        let existing = Self::get(db, Scope::All, id).await?;

        let section_id = dto.section_id.unwrap_or(existing.section_id);
        let kind = dto.kind.unwrap_or(existing.kind);
        let name = dto.name.unwrap_or(existing.name);
        let description = dto.description.unwrap_or(existing.description);
        let pre_access = dto.pre_access.unwrap_or(existing.pre_access);
        let draft = dto.draft.unwrap_or(existing.draft);

        sqlx::query(
            r#"
            UPDATE resources
            SET section_id = $1, kind = $2, name = $3, description = $4,
                pre_access = $5, draft = $6, updated_at = NOW()
            WHERE id = $7
            "#,
        )
        .bind(section_id)
        .bind(kind)
        .bind(&name)
        .bind(&description)
        .bind(pre_access)
        .bind(draft)
        .bind(id)
        .execute(db)
        .await
        .map_err(map_write_error)?;

        Self::get(db, Scope::All, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Resource not found")));
        }

        Ok(())
    }
}

fn map_write_error(e: sqlx::Error) -> AppError {
    match violation(&e) {
        Some((Violation::ForeignKey, _)) => {
            AppError::validation("section_id", "Section not found.")
        }
        _ => AppError::database(e),
    }
}
