//! Mapping of core outcomes to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::ArboladoError;

/// Error surfaced by an API handler. Wraps the core error; status codes and
/// the JSON envelope are decided here, never in the core.
#[derive(Debug)]
pub struct ApiError(pub ArboladoError);

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            ArboladoError::NotFound { .. } => StatusCode::NOT_FOUND,
            ArboladoError::Io(_) | ArboladoError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl From<ArboladoError> for ApiError {
    fn from(err: ArboladoError) -> Self {
        ApiError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EntityKind;
    use uuid::Uuid;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError(ArboladoError::not_found(EntityKind::Tree, Uuid::new_v4()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_io_maps_to_500() {
        let err = ApiError(ArboladoError::Io(std::io::Error::other("boom")));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
