use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ecotrack_core::error::TrackerError;

// ---------------------------------------------------------------------------
// Internal sentinels for request-level errors
// ---------------------------------------------------------------------------

/// Carries an explicit HTTP 400 through the `anyhow::Error` chain for
/// requests that never reach validation (e.g. unparseable JSON).
#[derive(Debug)]
struct BadRequestError(String);

impl std::fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BadRequestError {}

/// Carries an explicit HTTP 404 for paths that cannot name an action.
#[derive(Debug)]
struct NotFoundError(String);

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for NotFoundError {}

pub const NOT_FOUND_MESSAGE: &str = "Not found";

// ---------------------------------------------------------------------------
// AppError - unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(BadRequestError(msg.into()).into())
    }

    /// Construct a 404 Not Found error.
    pub fn not_found() -> Self {
        Self(NotFoundError(NOT_FOUND_MESSAGE.to_string()).into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(b) = self.0.downcast_ref::<BadRequestError>() {
            let body = serde_json::json!({ "error": b.0.clone() });
            return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
        }
        if let Some(n) = self.0.downcast_ref::<NotFoundError>() {
            let body = serde_json::json!({ "error": n.0.clone() });
            return (StatusCode::NOT_FOUND, axum::Json(body)).into_response();
        }

        match self.0.downcast_ref::<TrackerError>() {
            Some(TrackerError::Validation(fields)) => {
                (StatusCode::BAD_REQUEST, axum::Json(fields.clone())).into_response()
            }
            Some(TrackerError::ActionNotFound(_)) => {
                let body = serde_json::json!({ "error": NOT_FOUND_MESSAGE });
                (StatusCode::NOT_FOUND, axum::Json(body)).into_response()
            }
            Some(
                TrackerError::StorageCorrupt { .. }
                | TrackerError::IdsExhausted(_)
                | TrackerError::StoreUnavailable(_)
                | TrackerError::Io(_)
                | TrackerError::Yaml(_)
                | TrackerError::Json(_),
            )
            | None => {
                tracing::error!(error = %format!("{:#}", self.0), "request failed");
                let body = serde_json::json!({ "error": self.0.to_string() });
                (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
            }
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecotrack_core::validation::FieldErrors;
    use std::path::PathBuf;

    #[test]
    fn validation_maps_to_400() {
        let mut fields = FieldErrors::new();
        fields.insert("action".into(), vec!["This field is required.".into()]);
        let err = AppError(TrackerError::Validation(fields).into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn action_not_found_maps_to_404() {
        let err = AppError(TrackerError::ActionNotFound(3).into());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn corrupt_store_maps_to_500() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AppError(
            TrackerError::StorageCorrupt {
                path: PathBuf::from("actions.json"),
                source,
            }
            .into(),
        );
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn io_error_maps_to_500() {
        let io_err = std::io::Error::other("disk full");
        let err = AppError(TrackerError::Io(io_err).into());
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn non_tracker_error_maps_to_500() {
        let err = AppError(anyhow::anyhow!("something unexpected"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn constructors_map_to_their_status() {
        assert_eq!(
            AppError::bad_request("bad json").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found().into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn response_body_is_json() {
        let response = AppError(TrackerError::ActionNotFound(1).into()).into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(
            ct.to_str().unwrap().contains("application/json"),
            "expected JSON content type, got {:?}",
            ct
        );
    }
}
