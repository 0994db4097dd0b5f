use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use classroom_core::AppError;
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body extractor that runs `validator` rules after deserializing.
///
/// Every failure is a 400; field-level problems carry a per-field message map.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value
            .validate()
            .map_err(|errors| AppError::from_validation(&errors))?;

        Ok(ValidatedJson(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow::anyhow!(
            "Missing 'Content-Type: application/json' header"
        ));
    }

    let error_msg = rejection.body_text();

    if let Some(field) = quoted_after(&error_msg, "missing field `") {
        return AppError::validation(field, "This field is required.");
    }

    if let Some(value) = quoted_after(&error_msg, "unknown variant `") {
        return AppError::bad_request(anyhow::anyhow!("\"{}\" is not a valid choice", value));
    }

    if error_msg.contains("invalid type") || error_msg.contains("invalid value") {
        return AppError::bad_request(anyhow::anyhow!("Invalid field type in request"));
    }

    AppError::bad_request(anyhow::anyhow!("Invalid request body"))
}

/// Returns the text between `marker` and the next backtick.
fn quoted_after<'a>(message: &'a str, marker: &str) -> Option<&'a str> {
    message
        .split(marker)
        .nth(1)
        .and_then(|rest| rest.split('`').next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_after_extracts_field_name() {
        let msg = "Failed to deserialize the JSON body into the target type: missing field `email` at line 1 column 2";
        assert_eq!(quoted_after(msg, "missing field `"), Some("email"));
        assert_eq!(quoted_after(msg, "unknown variant `"), None);
    }
}
