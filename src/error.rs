use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Serialize, Debug, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Thought {0} not found")]
    NotFound(String),

    #[error("Failed to read thoughts: {0}")]
    Retrieval(#[source] mongodb::error::Error),

    #[error("Failed to write thought: {0}")]
    Persistence(#[source] mongodb::error::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Retrieval { .. } | AppError::Persistence { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn details(&self) -> Value {
        match self {
            AppError::Validation(errors) => json!(errors),
            other => json!(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = json!({
            "message": "Error",
            "error": self.details(),
        });

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_error() -> mongodb::error::Error {
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused").into()
    }

    #[test]
    fn test_status_codes() {
        let validation = AppError::Validation(vec![FieldError {
            field: "message",
            message: "too short".to_string(),
        }]);

        assert_eq!(validation.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            AppError::NotFound("abc".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Retrieval(store_error()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Persistence(store_error()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_details_keep_field_errors() {
        let error = AppError::Validation(vec![FieldError {
            field: "message",
            message: "Message must be at least 5 characters".to_string(),
        }]);

        let details = error.details();
        assert_eq!(details[0]["field"], "message");
        assert_eq!(details[0]["message"], "Message must be at least 5 characters");
    }

    #[test]
    fn test_not_found_details_name_the_id() {
        let details = AppError::NotFound("6529f0".to_string()).details();

        assert_eq!(details, json!("Thought 6529f0 not found"));
    }
}
