//! Uniform wire shape for endpoint errors.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use linkpeek_core::LinkpeekError;
use serde::Serialize;

/// Error payload returned to callers.
///
/// Serializes as `{"code": ..., "message": ...}`; the HTTP status is carried
/// on the response itself.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip)]
    pub status: u16,
}

impl From<LinkpeekError> for ApiError {
    fn from(err: LinkpeekError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            status: err.http_status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_core_errors_onto_wire_shape() {
        let err = ApiError::from(LinkpeekError::NoResponse);
        assert_eq!(err.code, "no_response");
        assert_eq!(err.message, "Not found.");
        assert_eq!(err.status, 404);
    }

    #[test]
    fn test_status_is_not_serialized() {
        let err = ApiError::from(LinkpeekError::Forbidden);
        let json = serde_json::to_value(&err).unwrap();
        assert!(json.get("status").is_none());
        assert_eq!(json.get("code").unwrap(), "rest_user_cannot_view");
    }
}
