//! Lookup orchestration.
//!
//! [`DetailsService`] wires the pieces of a lookup into one linear pipeline
//! with early exits: permission check, URL validation, bounded fetch, outcome
//! classification, extraction. Every terminal condition maps to exactly one
//! [`LinkpeekError`] variant; there are no retries and no partial successes.
//!
//! Each call is stateless and self-contained, so concurrent lookups need no
//! coordination.

use serde_json::Value;
use url::Url;

use crate::extract::{PageDetails, extract};
use crate::fetch::{FetchOutcome, Fetcher};
use crate::validate::validate_url_param;
use crate::{LinkpeekError, Result};

/// Answers whether the current caller may look up details for remote URLs.
///
/// This is the injected permission collaborator: the authorization decision
/// itself (roles, tokens, sessions) lives outside this crate.
pub trait ViewPolicy: Send + Sync {
    /// Returns `true` when the caller may process remote URLs.
    fn can_view(&self) -> bool;
}

/// Policy that admits every caller. Used by the CLI and in tests.
pub struct AllowAll;

impl ViewPolicy for AllowAll {
    fn can_view(&self) -> bool {
        true
    }
}

/// Orchestrates a single URL details lookup.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use linkpeek_core::{AllowAll, DetailsService, Fetcher, ReqwestTransport};
/// use serde_json::json;
///
/// # async fn example() -> linkpeek_core::Result<()> {
/// let service = DetailsService::new(Fetcher::new(Arc::new(ReqwestTransport::default())));
/// let details = service.lookup(&AllowAll, &json!("https://example.com")).await?;
/// println!("title: {}", details.title);
/// # Ok(())
/// # }
/// ```
pub struct DetailsService {
    fetcher: Fetcher,
}

impl DetailsService {
    /// Creates a service around the given fetcher.
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    /// Runs a full lookup for a caller-supplied parameter of unknown type.
    ///
    /// # Errors
    ///
    /// - [`LinkpeekError::Forbidden`] when `viewer` denies access. The check
    ///   runs first: no validation or network activity happens for a denied
    ///   caller.
    /// - [`LinkpeekError::InvalidParam`] when `url_param` is not a fetchable
    ///   http(s) URL.
    /// - [`LinkpeekError::NoResponse`] / [`LinkpeekError::NoContent`] per the
    ///   fetch outcome.
    pub async fn lookup(&self, viewer: &dyn ViewPolicy, url_param: &Value) -> Result<PageDetails> {
        if !viewer.can_view() {
            return Err(LinkpeekError::Forbidden);
        }

        let url = validate_url_param(url_param)?;
        self.lookup_url(&url).await
    }

    /// Fetches and extracts details for an already-validated URL.
    pub async fn lookup_url(&self, url: &Url) -> Result<PageDetails> {
        match self.fetcher.fetch(url).await {
            FetchOutcome::Success { body, .. } => Ok(extract(&body)),
            FetchOutcome::RemoteError { .. } => Err(LinkpeekError::NoResponse),
            FetchOutcome::EmptyBody => Err(LinkpeekError::NoContent),
        }
    }
}
