//! Password hashing and the default-password rule for provisioned students.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to verify password: {}", e)))
}

/// Builds the initial password handed to a newly provisioned student.
///
/// The first three characters of the trimmed, lower-cased name followed by
/// `suffix`. Names shorter than three characters use the whole name.
pub fn default_password(name: &str, suffix: &str) -> String {
    let prefix: String = name.trim().to_lowercase().chars().take(3).collect();
    format!("{}{}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_password_uses_first_three_lowercase_chars() {
        assert_eq!(default_password("Ana Souza", "@123"), "ana@123");
        assert_eq!(default_password("  MARIA ", "@123"), "mar@123");
    }

    #[test]
    fn test_default_password_short_name() {
        assert_eq!(default_password("Jo", "@123"), "jo@123");
    }

    #[test]
    fn test_default_password_multibyte_name() {
        assert_eq!(default_password("Érica", "!x"), "éri!x");
    }

    #[test]
    fn test_default_password_custom_suffix() {
        assert_eq!(default_password("Bruno", "#2024"), "bru#2024");
    }

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("ana@123").unwrap();
        assert_ne!(hashed, "ana@123");
        assert!(verify_password("ana@123", &hashed).unwrap());
        assert!(!verify_password("ana@124", &hashed).unwrap());
    }

    #[test]
    fn test_verify_invalid_hash_is_error() {
        assert!(verify_password("secret", "not_a_bcrypt_hash").is_err());
    }
}
