use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cablewatch_core::error::CoreError;
use serde::Serialize;

/// PostgreSQL `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL `restrict_violation`, raised by the append-only triggers.
const PG_RESTRICT_VIOLATION: &str = "23001";

/// Error type returned by every handler.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A request body that failed field validation.
    #[error("Invalid request: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// A body that could not be read or parsed, e.g. an unknown scope tag.
    #[error("Malformed JSON body: {0}")]
    Json(#[from] JsonRejection),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl AppError {
    /// HTTP status, machine-readable code, and client-facing message.
    ///
    /// Internal failures are logged here and never leak their detail.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", errors.to_string())
            }
            AppError::Json(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                rejection.body_text(),
            ),
            AppError::Json(rejection) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", rejection.body_text())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.parts();
        (status, Json(ErrorBody { error, code })).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Map a sqlx error to a response.
///
/// - `RowNotFound` is 404.
/// - Unique violations on a `uq_` constraint are 409.
/// - Writes rejected by an append-only table are 409 `IMMUTABLE_RECORD`.
/// - Everything else is a sanitized 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some(PG_UNIQUE_VIOLATION)
                if db_err.constraint().is_some_and(|c| c.starts_with("uq_")) =>
            {
                (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!(
                        "Duplicate value violates unique constraint: {}",
                        db_err.constraint().unwrap_or_default()
                    ),
                )
            }
            Some(PG_RESTRICT_VIOLATION) => (
                StatusCode::CONFLICT,
                "IMMUTABLE_RECORD",
                db_err.message().to_string(),
            ),
            _ => {
                tracing::error!(error = %db_err, "Database error");
                internal()
            }
        },
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_client_statuses() {
        let not_found = AppError::Core(CoreError::not_found("Submission", 7));
        assert_eq!(
            not_found.parts(),
            (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Submission with id 7 not found".to_string()
            )
        );

        let invalid = AppError::Core(CoreError::Validation("Duplicate codes".to_string()));
        assert_eq!(invalid.parts().0, StatusCode::BAD_REQUEST);
        assert_eq!(invalid.parts().1, "VALIDATION_ERROR");
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let (status, code, message) = AppError::InternalError("pool exploded".to_string()).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "INTERNAL_ERROR");
        assert!(!message.contains("pool"));

        let (status, _, _) = AppError::Database(sqlx::Error::PoolTimedOut).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_row_is_404() {
        let (status, code, _) = AppError::Database(sqlx::Error::RowNotFound).parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
    }
}
