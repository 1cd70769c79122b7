/// Error types for Post Service
///
/// Every error is converted into a JSON body `{"error": ..., "status": ...}`
/// at the request boundary. Storage failures keep their detail in the logs
/// and only expose the generic message to clients.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for post-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing required field, blank text, rejected upload
    #[error("{0}")]
    Validation(String),

    /// Post or user does not exist
    #[error("{0}")]
    NotFound(String),

    /// Object storage failure; the message is what clients see
    #[error("{message}")]
    Storage { message: String, source: StorageError },

    /// Unexpected failure
    #[error("Something went wrong!")]
    Internal(String),
}

/// Failure reported by an object storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("object storage request failed: {0}")]
    Request(String),

    #[error("object storage unavailable: {0}")]
    Unavailable(String),
}

impl From<s3_utils::S3Error> for StorageError {
    fn from(err: s3_utils::S3Error) -> Self {
        match err {
            s3_utils::S3Error::Config(msg) => StorageError::Unavailable(msg),
            s3_utils::S3Error::Request(msg) => StorageError::Request(msg),
        }
    }
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn post_not_found() -> Self {
        AppError::NotFound("Post not found".to_string())
    }

    pub fn user_not_found() -> Self {
        AppError::NotFound("User not found".to_string())
    }

    /// Wrap a storage failure behind the generic message of the failed operation
    pub fn storage(message: impl Into<String>, source: StorageError) -> Self {
        AppError::Storage {
            message: message.into(),
            source,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        match self {
            AppError::Storage { source, .. } => {
                tracing::error!(error = %source, "Object storage error");
            }
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "Unhandled error");
            }
            _ => {}
        }

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, _)| field.to_string())
            .collect();

        match fields.as_slice() {
            [] => AppError::Validation("Invalid request".to_string()),
            [field] => AppError::Validation(format!("{} is required", capitalize(field))),
            _ => AppError::Validation(format!("Invalid fields: {}", fields.join(", "))),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_rt::test]
    async fn storage_error_hides_detail() {
        let err = AppError::storage(
            "Failed to create post",
            StorageError::Request("AccessDenied: bucket policy".to_string()),
        );
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Failed to create post");
        assert_eq!(json["status"], 500);
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            AppError::validation("Username is required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::post_not_found().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Internal("boom".into()).to_string(),
            "Something went wrong!"
        );
    }
}
