use classroom_core::AppError;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::programs::model::{CreateProgramDto, Program, UpdateProgramDto};

const PROGRAM_SELECT: &str = r#"
    SELECT p.id, p.name, p.description,
           (SELECT COUNT(*) FROM sections sec WHERE sec.program_id = p.id) AS section_count
    FROM programs p
"#;

pub struct ProgramService;

impl ProgramService {
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool) -> Result<Vec<Program>, AppError> {
        sqlx::query_as::<_, Program>(&format!("{} ORDER BY p.name", PROGRAM_SELECT))
            .fetch_all(db)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Program, AppError> {
        sqlx::query_as::<_, Program>(&format!("{} WHERE p.id = $1", PROGRAM_SELECT))
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Program not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateProgramDto) -> Result<Program, AppError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO programs (name, description) VALUES ($1, $2) RETURNING id",
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Self::get(db, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: Uuid, dto: UpdateProgramDto) -> Result<Program, AppError> {
        let existing = Self::get(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let description = dto.description.unwrap_or(existing.description);

        sqlx::query("UPDATE programs SET name = $1, description = $2 WHERE id = $3")
            .bind(&name)
            .bind(&description)
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        Self::get(db, id).await
    }

    /// Sections, their enrollments and resources go with the program.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM programs WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Program not found")));
        }

        Ok(())
    }
}
