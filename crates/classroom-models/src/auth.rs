use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TokenRequest {
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

/// Access credential only; there is no refresh token.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IsAdminResponse {
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_request_requires_both_fields() {
        let ok = TokenRequest {
            username: "ana@x.com".to_string(),
            password: "ana@123".to_string(),
        };
        assert!(ok.validate().is_ok());

        let missing = TokenRequest {
            username: String::new(),
            password: String::new(),
        };
        let errors = missing.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_token_response_shape() {
        let body = serde_json::to_value(TokenResponse {
            access: "jwt".to_string(),
            is_admin: true,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"access": "jwt", "is_admin": true}));
    }
}
