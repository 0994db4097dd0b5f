use std::env;

/// Suffix appended to the name prefix when generating a student's first password.
pub const DEFAULT_PASSWORD_SUFFIX: &str = "@123";

/// Settings for accounts created alongside students.
#[derive(Clone, Debug)]
pub struct ProvisioningConfig {
    pub default_password_suffix: String,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            default_password_suffix: DEFAULT_PASSWORD_SUFFIX.to_string(),
        }
    }
}

impl ProvisioningConfig {
    pub fn from_env() -> Self {
        Self {
            default_password_suffix: env::var("DEFAULT_PASSWORD_SUFFIX")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_PASSWORD_SUFFIX.to_string()),
        }
    }
}
