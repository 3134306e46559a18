//! Validation of the caller-supplied `url` parameter.
//!
//! Validation is purely syntactic: no DNS resolution and no network access
//! happen here. The input arrives as a [`serde_json::Value`] because the
//! caller-supplied value is of unknown type until proven to be a string.

use serde_json::Value;
use url::Url;

use crate::{LinkpeekError, Result};

/// Validates a raw parameter value of unknown type.
///
/// Non-string values (numbers, booleans, null, arrays, objects) are rejected
/// outright; strings are passed on to [`validate_url`].
///
/// # Example
///
/// ```rust
/// use linkpeek_core::validate_url_param;
/// use serde_json::json;
///
/// assert!(validate_url_param(&json!("https://example.com")).is_ok());
/// assert!(validate_url_param(&json!(1234456)).is_err());
/// ```
pub fn validate_url_param(value: &Value) -> Result<Url> {
    match value {
        Value::String(raw) => validate_url(raw),
        _ => Err(invalid_url()),
    }
}

/// Validates that a string is a fetchable absolute URL.
///
/// The string must be non-empty after trimming, parse as an absolute URL, use
/// the `http` or `https` scheme, and carry a non-empty host. A string like
/// `invalid.proto://example.com` parses but fails the scheme check.
pub fn validate_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid_url());
    }

    let url = Url::parse(trimmed).map_err(|_| invalid_url())?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid_url());
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(invalid_url()),
    }
}

fn invalid_url() -> LinkpeekError {
    LinkpeekError::InvalidParam { param: "url" }
}
