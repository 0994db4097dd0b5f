//! Login identities.
//!
//! Accounts are the authentication side of the system: students get one
//! provisioned automatically, administrators are created from the CLI.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct AccountWithPassword {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub is_staff: bool,
}
