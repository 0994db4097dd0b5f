use classroom_config::ProvisioningConfig;
use classroom_core::{AppError, default_password, hash_password};
use sqlx::{PgConnection, PgPool};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::metrics::track_student_provisioned;
use crate::middleware::policy::Scope;
use crate::modules::enrollments::service::EnrollmentService;
use crate::modules::students::model::{CreateStudentDto, Student, UpdateStudentDto};
use crate::utils::db::{Violation, violation};

const EMAIL_TAKEN: &str = "A user or student with this email already exists.";

const STUDENT_SELECT: &str = "SELECT s.id, s.user_id, s.name, s.email, s.phone FROM students s";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, scope: Scope) -> Result<Vec<Student>, AppError> {
        let Some(student_id) = scope.student_filter() else {
            return Ok(Vec::new());
        };

        sqlx::query_as::<_, Student>(&format!(
            "{} WHERE ($1::uuid IS NULL OR s.id = $1) ORDER BY s.name",
            STUDENT_SELECT
        ))
        .bind(student_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, scope: Scope, id: Uuid) -> Result<Student, AppError> {
        let not_found = || AppError::not_found(anyhow::anyhow!("Student not found"));
        let student_id = scope.student_filter().ok_or_else(not_found)?;

        sqlx::query_as::<_, Student>(&format!(
            "{} WHERE s.id = $1 AND ($2::uuid IS NULL OR s.id = $2)",
            STUDENT_SELECT
        ))
        .bind(id)
        .bind(student_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(not_found)
    }

    /// Provisions the login account, the student and, when `section_id` is
    /// given, its first enrollment. All rows are written in one transaction.
    #[instrument(skip(db, dto, provisioning), fields(email = %dto.email))]
    pub async fn create(
        db: &PgPool,
        dto: CreateStudentDto,
        provisioning: &ProvisioningConfig,
    ) -> Result<Student, AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        ensure_email_available(&mut tx, &dto.email, None).await?;

        if let Some(section_id) = dto.section_id {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM sections WHERE id = $1)",
            )
            .bind(section_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::database)?;

            if !exists {
                return Err(AppError::validation("section_id", "Section not found."));
            }
        }

        let password = default_password(&dto.name, &provisioning.default_password_suffix);
        let hashed_password = hash_password(&password)?;

        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (username, email, first_name, password)
            VALUES ($1, $1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&dto.email)
        .bind(&dto.name)
        .bind(&hashed_password)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_email_conflict)?;

        let student = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (user_id, name, email, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, name, email, phone
            "#,
        )
        .bind(user_id)
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_email_conflict)?;

        if let Some(section_id) = dto.section_id {
            EnrollmentService::insert(&mut *tx, student.id, section_id).await?;
        }

        tx.commit().await.map_err(AppError::database)?;

        track_student_provisioned(dto.section_id.is_some());
        info!(student_id = %student.id, "Student provisioned");

        Ok(student)
    }

    /// Applies the supplied fields and mirrors email and name changes onto
    /// the linked account.
    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: Uuid, dto: UpdateStudentDto) -> Result<Student, AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        let existing = sqlx::query_as::<_, Student>(&format!(
            "{} WHERE s.id = $1 FOR UPDATE",
            STUDENT_SELECT
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        let name = dto.name.unwrap_or_else(|| existing.name.clone());
        let email = dto.email.unwrap_or_else(|| existing.email.clone());
        let phone = dto.phone.unwrap_or_else(|| existing.phone.clone());

        let email_changed = email != existing.email;
        if email_changed {
            ensure_email_available(&mut tx, &email, Some(&existing)).await?;
        }

        let student = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students SET name = $1, email = $2, phone = $3
            WHERE id = $4
            RETURNING id, user_id, name, email, phone
            "#,
        )
        .bind(&name)
        .bind(&email)
        .bind(&phone)
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_email_conflict)?;

        if email_changed {
            sqlx::query(
                "UPDATE users SET username = $1, email = $1, updated_at = NOW() WHERE id = $2",
            )
            .bind(&email)
            .bind(existing.user_id)
            .execute(&mut *tx)
            .await
            .map_err(map_email_conflict)?;
        }

        if name != existing.name {
            sqlx::query("UPDATE users SET first_name = $1, updated_at = NOW() WHERE id = $2")
                .bind(&name)
                .bind(existing.user_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::database)?;
        }

        tx.commit().await.map_err(AppError::database)?;
        Ok(student)
    }

    /// Deletes the student's login account, which cascades to the student
    /// and its enrollments.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "DELETE FROM users WHERE id = (SELECT user_id FROM students WHERE id = $1)",
        )
        .bind(id)
        .execute(db)
        .await
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Ok(())
    }
}

/// Email must be unused by every account username and every student, apart
/// from `current` and its own account.
async fn ensure_email_available(
    conn: &mut PgConnection,
    email: &str,
    current: Option<&Student>,
) -> Result<(), AppError> {
    let taken = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 AND ($2::uuid IS NULL OR id <> $2))
            OR EXISTS(SELECT 1 FROM students WHERE email = $1 AND ($3::uuid IS NULL OR id <> $3))
        "#,
    )
    .bind(email)
    .bind(current.map(|s| s.user_id))
    .bind(current.map(|s| s.id))
    .fetch_one(conn)
    .await
    .map_err(AppError::database)?;

    if taken {
        return Err(AppError::validation("email", EMAIL_TAKEN));
    }

    Ok(())
}

fn map_email_conflict(e: sqlx::Error) -> AppError {
    match violation(&e) {
        Some((Violation::Unique, _)) => AppError::validation("email", EMAIL_TAKEN),
        _ => AppError::database(e),
    }
}
