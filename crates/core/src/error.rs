//! Error types for URL details lookups.
//!
//! This module defines the main error type [`LinkpeekError`] which represents
//! every failure a lookup can surface to a caller. All variants are expected,
//! recoverable-at-the-boundary conditions: none are retried internally and
//! none are fatal.
//!
//! # Example
//!
//! ```rust
//! use linkpeek_core::{LinkpeekError, Result};
//!
//! fn require_body(body: &[u8]) -> Result<&[u8]> {
//!     if body.is_empty() {
//!         return Err(LinkpeekError::NoContent);
//!     }
//!     Ok(body)
//! }
//! ```

use thiserror::Error;

/// Main error type for URL details lookups.
///
/// Each variant carries a stable machine-readable code (see
/// [`LinkpeekError::code`]) and an outward-facing HTTP status (see
/// [`LinkpeekError::http_status`]); the `Display` implementation is the
/// human-readable message.
///
/// # Example
///
/// ```rust
/// use linkpeek_core::LinkpeekError;
///
/// let err = LinkpeekError::NoResponse;
/// assert_eq!(err.code(), "no_response");
/// assert_eq!(err.http_status(), 404);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkpeekError {
    /// The caller lacks the capability to process remote URLs.
    ///
    /// Produced by the orchestrator's permission check before any validation
    /// or network activity takes place.
    #[error("You are not allowed to process remote URLs.")]
    Forbidden,

    /// The named request parameter is missing, empty, of the wrong type, or
    /// not an absolute http(s) URL.
    #[error("Invalid parameter(s): {param}")]
    InvalidParam {
        /// Name of the failing parameter.
        param: &'static str,
    },

    /// No usable response was obtained from the remote host.
    ///
    /// Covers transport failures (DNS, connect, timeout) as well as any
    /// non-2xx status. All of these collapse to one outward 404-shaped error.
    #[error("Not found.")]
    NoResponse,

    /// The remote host answered with a success status but an empty body.
    #[error("Unable to retrieve body from response at this URL.")]
    NoContent,
}

impl LinkpeekError {
    /// Stable machine-readable error code for API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Forbidden => "rest_user_cannot_view",
            Self::InvalidParam { .. } => "rest_invalid_param",
            Self::NoResponse => "no_response",
            Self::NoContent => "no_content",
        }
    }

    /// Outward-facing HTTP status for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Forbidden => 403,
            Self::InvalidParam { .. } => 400,
            Self::NoResponse | Self::NoContent => 404,
        }
    }
}

/// Result type alias for LinkpeekError.
///
/// This is a convenience alias for `std::result::Result<T, LinkpeekError>`.
pub type Result<T> = std::result::Result<T, LinkpeekError>;
