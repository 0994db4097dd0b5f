use classroom_core::AppError;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::policy::Scope;
use crate::modules::sections::model::{
    COMPLETION_BEFORE_START, CreateSectionDto, Section, UpdateSectionDto, dates_are_consistent,
};
use crate::utils::db::{Violation, violation};

const SECTION_SELECT: &str = r#"
    SELECT sec.id, sec.program_id, p.name AS program_name, sec.name,
           sec.start_date, sec.completion_date, sec.access_link,
           (SELECT COUNT(*) FROM enrollments e WHERE e.section_id = sec.id) AS student_count
    FROM sections sec
    JOIN programs p ON p.id = sec.program_id
"#;

const ENROLLED_FILTER: &str = "($1::uuid IS NULL OR EXISTS (
        SELECT 1 FROM enrollments en WHERE en.section_id = sec.id AND en.student_id = $1
    ))";

pub struct SectionService;

impl SectionService {
    /// Sections within `scope`, optionally narrowed to one program.
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        scope: Scope,
        program_id: Option<Uuid>,
    ) -> Result<Vec<Section>, AppError> {
        let Some(student_id) = scope.student_filter() else {
            return Ok(Vec::new());
        };

        sqlx::query_as::<_, Section>(&format!(
            "{} WHERE {} AND ($2::uuid IS NULL OR sec.program_id = $2)
             ORDER BY sec.start_date DESC, sec.name",
            SECTION_SELECT, ENROLLED_FILTER
        ))
        .bind(student_id)
        .bind(program_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, scope: Scope, id: Uuid) -> Result<Section, AppError> {
        let not_found = || AppError::not_found(anyhow::anyhow!("Section not found"));
        let student_id = scope.student_filter().ok_or_else(not_found)?;

        sqlx::query_as::<_, Section>(&format!(
            "{} WHERE {} AND sec.id = $2",
            SECTION_SELECT, ENROLLED_FILTER
        ))
        .bind(student_id)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(not_found)
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateSectionDto) -> Result<Section, AppError> {
        if !dates_are_consistent(dto.start_date, dto.completion_date) {
            return Err(AppError::validation("completion_date", COMPLETION_BEFORE_START));
        }

        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO sections (program_id, name, start_date, completion_date, access_link)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(dto.program_id)
        .bind(&dto.name)
        .bind(dto.start_date)
        .bind(dto.completion_date)
        .bind(&dto.access_link)
        .fetch_one(db)
        .await
        .map_err(map_write_error)?;

        Self::get(db, Scope::All, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: Uuid, dto: UpdateSectionDto) -> Result<Section, AppError> {
        let existing = Self::get(db, Scope::All, id).await?;

        let program_id = dto.program_id.unwrap_or(existing.program_id);
        let name = dto.name.unwrap_or(existing.name);
        let start_date = dto.start_date.unwrap_or(existing.start_date);
        let completion_date = dto.completion_date.unwrap_or(existing.completion_date);
        let access_link = dto.access_link.unwrap_or(existing.access_link);

        if !dates_are_consistent(start_date, completion_date) {
            return Err(AppError::validation("completion_date", COMPLETION_BEFORE_START));
        }

        sqlx::query(
            r#"
            UPDATE sections
            SET program_id = $1, name = $2, start_date = $3, completion_date = $4, access_link = $5
            WHERE id = $6
            "#,
        )
        .bind(program_id)
        .bind(&name)
        .bind(start_date)
        .bind(completion_date)
        .bind(&access_link)
        .bind(id)
        .execute(db)
        .await
        .map_err(map_write_error)?;

        Self::get(db, Scope::All, id).await
    }

    /// Enrollments and resources of the section are removed with it.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Section not found")));
        }

        Ok(())
    }
}

fn map_write_error(e: sqlx::Error) -> AppError {
    match violation(&e) {
        Some((Violation::ForeignKey, _)) => {
            AppError::validation("program_id", "Program not found.")
        }
        Some((Violation::Check, _)) => {
            AppError::validation("completion_date", COMPLETION_BEFORE_START)
        }
        _ => AppError::database(e),
    }
}
