//! Error responses for infrastructure failures.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::IngestionError;

/// Infrastructure failure surfaced as `{"error": message}` with a non-200 status.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    /// A 500 response carrying `message`.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    /// Status code the response will carry.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<IngestionError> for AppError {
    fn from(err: IngestionError) -> Self {
        Self::internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!(status = %self.status, error = %self.message, "request failed");
        let body = serde_json::json!({
            "error": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ingestion_errors_become_500_json() {
        let err = AppError::from(IngestionError::Malformed {
            message: "row 3: expected 2 fields, found more".to_string(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "error": "malformed input: row 3: expected 2 fields, found more" })
        );
    }
}
