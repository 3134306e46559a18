//! Permission wiring for the url-details endpoint.
//!
//! The authorization decision is supplied from outside the core: this module
//! only adapts the configured credential check onto the [`ViewPolicy`] seam.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use linkpeek_core::ViewPolicy;

/// Viewer derived from a request's `Authorization` header.
///
/// With no token configured every caller may view; otherwise the request must
/// carry `Authorization: Bearer <token>` with the configured value.
pub struct BearerViewer {
    allowed: bool,
}

impl BearerViewer {
    pub fn from_headers(expected: Option<&str>, headers: &HeaderMap) -> Self {
        let allowed = match expected {
            None => true,
            Some(token) => headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .is_some_and(|presented| presented == token),
        };
        Self { allowed }
    }
}

impl ViewPolicy for BearerViewer {
    fn can_view(&self) -> bool {
        self.allowed
    }
}
