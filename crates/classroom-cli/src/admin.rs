//! Staff account provisioning.

use classroom_core::hash_password;
use classroom_models::Account;
use sqlx::PgPool;

/// Creates a staff account whose username is its email address.
pub async fn create_admin(
    db: &PgPool,
    first_name: &str,
    email: &str,
    password: &str,
) -> Result<Account, Box<dyn std::error::Error>> {
    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let account = sqlx::query_as::<_, Account>(
        "INSERT INTO users (username, email, first_name, password, is_staff)
         VALUES ($1, $1, $2, $3, true)
         ON CONFLICT (username) DO NOTHING
         RETURNING id, username, email, first_name, is_staff, created_at",
    )
    .bind(email)
    .bind(first_name)
    .bind(&hashed_password)
    .fetch_optional(db)
    .await?;

    account.ok_or_else(|| "An account with this email already exists".into())
}
