use classroom_core::{AppError, errors::NON_FIELD_ERRORS};
use sqlx::{PgExecutor, PgPool};
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::track_enrollment_created;
use crate::middleware::policy::Scope;
use crate::modules::enrollments::model::{ALREADY_ENROLLED, CreateEnrollmentDto, Enrollment};
use crate::utils::db::{Violation, violation};

pub(crate) const ENROLLMENT_SELECT: &str = r#"
    SELECT e.id, e.student_id, st.name AS student_name,
           e.section_id, sec.name AS section_name, e.enrolled_at
    FROM enrollments e
    JOIN students st ON st.id = e.student_id
    JOIN sections sec ON sec.id = e.section_id
"#;

pub struct EnrollmentService;

impl EnrollmentService {
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, scope: Scope) -> Result<Vec<Enrollment>, AppError> {
        let Some(student_id) = scope.student_filter() else {
            return Ok(Vec::new());
        };

        sqlx::query_as::<_, Enrollment>(&format!(
            "{} WHERE ($1::uuid IS NULL OR e.student_id = $1) ORDER BY e.enrolled_at DESC",
            ENROLLMENT_SELECT
        ))
        .bind(student_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, scope: Scope, id: Uuid) -> Result<Enrollment, AppError> {
        let not_found = || AppError::not_found(anyhow::anyhow!("Enrollment not found"));
        let student_id = scope.student_filter().ok_or_else(not_found)?;

        sqlx::query_as::<_, Enrollment>(&format!(
            "{} WHERE e.id = $1 AND ($2::uuid IS NULL OR e.student_id = $2)",
            ENROLLMENT_SELECT
        ))
        .bind(id)
        .bind(student_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(not_found)
    }

    #[instrument(skip(db))]
    pub async fn list_for_student(
        db: &PgPool,
        student_id: Uuid,
    ) -> Result<Vec<Enrollment>, AppError> {
        sqlx::query_as::<_, Enrollment>(&format!(
            "{} WHERE e.student_id = $1 ORDER BY e.enrolled_at DESC",
            ENROLLMENT_SELECT
        ))
        .bind(student_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn list_for_section(
        db: &PgPool,
        section_id: Uuid,
    ) -> Result<Vec<Enrollment>, AppError> {
        sqlx::query_as::<_, Enrollment>(&format!(
            "{} WHERE e.section_id = $1 ORDER BY st.name",
            ENROLLMENT_SELECT
        ))
        .bind(section_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn create(db: &PgPool, dto: CreateEnrollmentDto) -> Result<Enrollment, AppError> {
        let already_enrolled = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM enrollments WHERE student_id = $1 AND section_id = $2)",
        )
        .bind(dto.student_id)
        .bind(dto.section_id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        if already_enrolled {
            return Err(AppError::validation(NON_FIELD_ERRORS, ALREADY_ENROLLED));
        }

        let id = Self::insert(db, dto.student_id, dto.section_id).await?;
        Self::get(db, Scope::All, id).await
    }

    /// Inserts one enrollment, mapping constraint violations to field errors.
    pub(crate) async fn insert<'e, E>(
        executor: E,
        student_id: Uuid,
        section_id: Uuid,
    ) -> Result<Uuid, AppError>
    where
        E: PgExecutor<'e>,
    {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO enrollments (student_id, section_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(student_id)
        .bind(section_id)
        .fetch_one(executor)
        .await
        .map_err(|e| match violation(&e) {
            Some((Violation::Unique, _)) => {
                AppError::validation(NON_FIELD_ERRORS, ALREADY_ENROLLED)
            }
            Some((Violation::ForeignKey, Some(constraint)))
                if constraint == "enrollments_student_id_fkey" =>
            {
                AppError::validation("student_id", "Student not found.")
            }
            Some((Violation::ForeignKey, _)) => {
                AppError::validation("section_id", "Section not found.")
            }
            _ => AppError::database(e),
        })?;

        track_enrollment_created();
        Ok(id)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Enrollment not found")));
        }

        Ok(())
    }
}
