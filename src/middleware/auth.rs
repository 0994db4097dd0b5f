use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{header, request::Parts},
};
use classroom_auth::{Claims, verify_token};
use classroom_core::AppError;
use sqlx::{FromRow, PgPool};
use tracing::warn;
use uuid::Uuid;

use crate::middleware::policy::Scope;
use crate::state::AppState;

/// Extractor that validates the bearer token and exposes its claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        self.0
            .user_id()
            .ok_or_else(|| AppError::unauthorized("Invalid user ID in token"))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// The linked student of a non-staff account, with its enrolled sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentProfile {
    pub student_id: Uuid,
    pub section_ids: Vec<Uuid>,
}

/// The authenticated caller, passed explicitly into every policy check and
/// scoped query.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: Uuid,
    pub username: String,
    pub is_staff: bool,
    pub student: Option<StudentProfile>,
}

impl Actor {
    pub fn student_id(&self) -> Option<Uuid> {
        self.student.as_ref().map(|profile| profile.student_id)
    }

    pub fn is_enrolled_in(&self, section_id: Uuid) -> bool {
        self.student
            .as_ref()
            .is_some_and(|profile| profile.section_ids.contains(&section_id))
    }

    pub fn scope(&self) -> Scope {
        if self.is_staff {
            Scope::All
        } else {
            match self.student_id() {
                Some(student_id) => Scope::Student(student_id),
                None => Scope::Nothing,
            }
        }
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    username: String,
    is_staff: bool,
    student_id: Option<Uuid>,
}

impl FromRequestParts<AppState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        let user_id = auth_user.user_id()?;

        let account = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT u.username, u.is_staff, s.id AS student_id
            FROM users u
            LEFT JOIN students s ON s.user_id = u.id
            WHERE u.id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&state.db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;

        let student = match (account.is_staff, account.student_id) {
            (false, Some(student_id)) => load_student_profile(&state.db, student_id).await,
            _ => None,
        };

        Ok(Actor {
            user_id,
            username: account.username,
            is_staff: account.is_staff,
            student,
        })
    }
}

/// Absent `Authorization` header yields `None`; a present but invalid one is
/// still rejected.
impl OptionalFromRequestParts<AppState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        if !parts.headers.contains_key(header::AUTHORIZATION) {
            return Ok(None);
        }
        <Actor as FromRequestParts<AppState>>::from_request_parts(parts, state)
            .await
            .map(Some)
    }
}

/// A failed lookup resolves to "no profile", which every student-scoped
/// policy treats as denial.
async fn load_student_profile(db: &PgPool, student_id: Uuid) -> Option<StudentProfile> {
    let section_ids = sqlx::query_scalar::<_, Uuid>(
        "SELECT section_id FROM enrollments WHERE student_id = $1",
    )
    .bind(student_id)
    .fetch_all(db)
    .await;

    match section_ids {
        Ok(section_ids) => Some(StudentProfile {
            student_id,
            section_ids,
        }),
        Err(e) => {
            warn!(%student_id, error = %e, "Failed to load student profile");
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn admin() -> Actor {
        Actor {
            user_id: Uuid::new_v4(),
            username: "admin".to_string(),
            is_staff: true,
            student: None,
        }
    }

    pub(crate) fn student_in(section_ids: Vec<Uuid>) -> Actor {
        Actor {
            user_id: Uuid::new_v4(),
            username: "ana@x.com".to_string(),
            is_staff: false,
            student: Some(StudentProfile {
                student_id: Uuid::new_v4(),
                section_ids,
            }),
        }
    }

    pub(crate) fn profileless() -> Actor {
        Actor {
            user_id: Uuid::new_v4(),
            username: "orphan".to_string(),
            is_staff: false,
            student: None,
        }
    }

    #[test]
    fn test_scope_follows_staff_flag_and_profile() {
        assert_eq!(admin().scope(), Scope::All);
        let student = student_in(vec![]);
        assert_eq!(student.scope(), Scope::Student(student.student_id().unwrap()));
        assert_eq!(profileless().scope(), Scope::Nothing);
    }

    #[test]
    fn test_is_enrolled_in() {
        let section = Uuid::new_v4();
        let student = student_in(vec![section]);
        assert!(student.is_enrolled_in(section));
        assert!(!student.is_enrolled_in(Uuid::new_v4()));
        assert!(!profileless().is_enrolled_in(section));
    }
}
