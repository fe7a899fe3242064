//! Central error type + Axum integration.
//!
//! Every failure a handler can produce maps onto one of these variants, and
//! every variant renders as a `{"message": ...}` JSON body with the matching
//! HTTP status. Storage-layer detail is logged server-side and never echoed
//! to the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Generic client-facing message for unexpected failures.
const INTERNAL_MESSAGE: &str = "Erro interno no servidor.";

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed input (400).
    #[error("{0}")]
    Validation(String),

    /// Missing, malformed, or invalid credentials/token (401).
    #[error("{0}")]
    Unauthenticated(String),

    /// Authenticated but not allowed (403).
    #[error("{0}")]
    Forbidden(String),

    /// Resource does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness conflict, e.g. duplicate e-mail (409).
    #[error("{0}")]
    Conflict(String),

    /// Unexpected failure (500). `message` is what the client sees; the
    /// underlying cause is only logged.
    #[error("{message}")]
    Internal {
        message: String,
        cause: anyhow::Error,
    },
}

impl AppError {
    /// Wrap an unexpected error with the generic client message.
    pub fn internal(cause: impl Into<anyhow::Error>) -> Self {
        AppError::Internal {
            message: INTERNAL_MESSAGE.to_string(),
            cause: cause.into(),
        }
    }

    /// Replace the client-facing message, but only for internal errors.
    /// Domain errors keep their own message and status.
    pub fn or_internal_message(self, message: &str) -> Self {
        match self {
            AppError::Internal { cause, .. } => AppError::Internal {
                message: message.to_string(),
                cause,
            },
            other => other,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(err)
    }
}

impl From<tokio_postgres::Error> for AppError {
    fn from(err: tokio_postgres::Error) -> Self {
        AppError::internal(err)
    }
}

impl From<deadpool_postgres::PoolError> for AppError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        AppError::internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal { cause, .. } = &self {
            tracing::error!("internal error: {cause:#}");
        }

        let status = self.status_code();
        let body = json!({ "message": self.to_string() });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_map_to_expected_status_codes() {
        assert_eq!(
            AppError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthenticated("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::internal(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn response_body_is_message_only() {
        let response = AppError::Conflict("E-mail já cadastrado.".into()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "message": "E-mail já cadastrado." }));
    }

    #[tokio::test]
    async fn internal_detail_is_not_leaked() {
        let err = AppError::internal(anyhow::anyhow!("connection refused to db at 10.0.0.1"));
        let response = err.into_response();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Erro interno no servidor.");
    }

    #[test]
    fn or_internal_message_keeps_domain_errors_intact() {
        let err = AppError::NotFound("Aviso não encontrado.".into())
            .or_internal_message("Erro ao remover aviso.");
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Aviso não encontrado."));

        let err = AppError::internal(anyhow::anyhow!("boom")).or_internal_message("Erro ao remover aviso.");
        assert_eq!(err.to_string(), "Erro ao remover aviso.");
    }
}
