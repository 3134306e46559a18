//! Bounded fetching of remote URL content.
//!
//! This module performs the single outbound HTTP GET of a lookup. The request
//! is bounded in two ways: a configurable timeout and a response-size cap
//! beyond which the body is truncated rather than buffered. The outcome of a
//! fetch is classified into [`FetchOutcome`] exactly once; nothing here
//! retries or caches.
//!
//! The actual HTTP call goes through the [`Transport`] trait so that callers
//! can substitute a fake transport in tests and inspect the request that was
//! sent. [`ReqwestTransport`] is the production implementation.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default response-size cap in bytes (150 KB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 150 * 1024;

/// Options for a single outbound fetch.
///
/// Defaults: 10 second timeout, 153600 byte body cap, no extra headers.
/// The effective options for a request may be rewritten by an
/// [`OptionsFilter`] before the transport sees them.
///
/// # Example
///
/// ```rust
/// use linkpeek_core::FetchOptions;
///
/// let options = FetchOptions::default();
/// assert_eq!(options.timeout, 10);
/// assert_eq!(options.max_body_bytes, 153600);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Response bodies are truncated beyond this many bytes.
    pub max_body_bytes: usize,
    /// Extra request headers sent verbatim, in order.
    pub headers: Vec<(String, String)>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_SECS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            headers: Vec::new(),
        }
    }
}

/// Extension point invoked with the default options and the target URL before
/// every outbound request. Whatever it returns is what is actually sent.
pub type OptionsFilter = Arc<dyn Fn(FetchOptions, &Url) -> FetchOptions + Send + Sync>;

/// Classification of a single remote-fetch attempt.
///
/// Produced once per request and consumed once by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 2xx response with a non-empty body (already capped).
    Success { status: u16, body: Vec<u8> },
    /// Transport failure or non-2xx status. When no response was obtained at
    /// all the status defaults to 404.
    RemoteError { status: u16 },
    /// 2xx response with a zero-length body.
    EmptyBody,
}

/// Raw reply from a [`Transport`], before classification.
#[derive(Debug, Clone)]
pub struct TransportReply {
    /// HTTP status code of the response.
    pub status: u16,
    /// Response body, honoring the request's `max_body_bytes`.
    pub body: Vec<u8>,
}

/// Failure to obtain any response: DNS, connect, TLS, or timeout.
#[derive(Error, Debug)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

/// A single outbound GET request.
///
/// Implementations must honor `options.timeout` and must not buffer more than
/// `options.max_body_bytes` of the response body. Tests substitute a
/// recording implementation to assert on the request actually sent.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues one GET request to `url` with the given options.
    async fn get(&self, url: &Url, options: &FetchOptions)
        -> Result<TransportReply, TransportError>;
}

/// Production [`Transport`] backed by reqwest.
///
/// Each request gets a fresh client so the per-request timeout applies
/// cleanly. Redirect handling is left to the client defaults. The body is
/// read chunk by chunk and truncated at the configured cap.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    /// User-Agent string sent with every request.
    pub user_agent: String,
}

#[cfg(feature = "fetch")]
impl Default for ReqwestTransport {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; Linkpeek/1.0; +https://github.com/stormlightlabs/linkpeek)"
                .to_string(),
        }
    }
}

#[cfg(feature = "fetch")]
#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url, options: &FetchOptions)
        -> Result<TransportReply, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(options.timeout))
            .build()
            .map_err(|e| TransportError(e.to_string()))?;

        let mut request = client
            .get(url.clone())
            .header("User-Agent", &self.user_agent)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.9");

        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let mut response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError(format!("timed out after {} seconds", options.timeout))
            } else {
                TransportError(e.to_string())
            }
        })?;

        let status = response.status().as_u16();

        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| TransportError(e.to_string()))?
        {
            if body.len() + chunk.len() >= options.max_body_bytes {
                let take = options.max_body_bytes - body.len();
                body.extend_from_slice(&chunk[..take]);
                break;
            }
            body.extend_from_slice(&chunk);
        }

        Ok(TransportReply { status, body })
    }
}

/// Performs bounded fetches and classifies their outcome.
///
/// Built from an injected [`Transport`], a set of default [`FetchOptions`],
/// and an optional [`OptionsFilter`] that may rewrite the options per call.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use linkpeek_core::{FetchOptions, Fetcher, ReqwestTransport};
///
/// let fetcher = Fetcher::new(Arc::new(ReqwestTransport::default()))
///     .with_defaults(FetchOptions { timeout: 5, ..FetchOptions::default() });
/// ```
pub struct Fetcher {
    transport: Arc<dyn Transport>,
    defaults: FetchOptions,
    filter: Option<OptionsFilter>,
}

impl Fetcher {
    /// Creates a fetcher with default options and no filter.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport, defaults: FetchOptions::default(), filter: None }
    }

    /// Replaces the default options used for every fetch.
    pub fn with_defaults(mut self, defaults: FetchOptions) -> Self {
        self.defaults = defaults;
        self
    }

    /// Installs an options filter, invoked before every outbound request.
    pub fn with_options_filter(mut self, filter: OptionsFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Issues exactly one GET request to `url` and classifies the result.
    pub async fn fetch(&self, url: &Url) -> FetchOutcome {
        let mut options = self.defaults.clone();
        if let Some(filter) = &self.filter {
            options = filter(options, url);
        }

        match self.transport.get(url, &options).await {
            Err(_) => FetchOutcome::RemoteError { status: 404 },
            Ok(reply) if !(200..300).contains(&reply.status) => {
                FetchOutcome::RemoteError { status: reply.status }
            }
            Ok(mut reply) => {
                // The cap must hold even for transports that do not stream.
                reply.body.truncate(options.max_body_bytes);
                if reply.body.is_empty() {
                    FetchOutcome::EmptyBody
                } else {
                    FetchOutcome::Success { status: reply.status, body: reply.body }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedTransport {
        reply: Result<(u16, Vec<u8>), String>,
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn get(&self, _url: &Url, _options: &FetchOptions)
            -> Result<TransportReply, TransportError> {
            match &self.reply {
                Ok((status, body)) => Ok(TransportReply { status: *status, body: body.clone() }),
                Err(msg) => Err(TransportError(msg.clone())),
            }
        }
    }

    fn fetcher_returning(reply: Result<(u16, Vec<u8>), String>) -> Fetcher {
        Fetcher::new(Arc::new(CannedTransport { reply }))
    }

    fn target() -> Url {
        Url::parse("https://dummysite.com").unwrap()
    }

    #[tokio::test]
    async fn test_transport_failure_defaults_to_404() {
        let fetcher = fetcher_returning(Err("dns failure".to_string()));
        let outcome = fetcher.fetch(&target()).await;
        assert_eq!(outcome, FetchOutcome::RemoteError { status: 404 });
    }

    #[tokio::test]
    async fn test_non_2xx_status_is_remote_error() {
        let fetcher = fetcher_returning(Ok((500, b"<html></html>".to_vec())));
        let outcome = fetcher.fetch(&target()).await;
        assert_eq!(outcome, FetchOutcome::RemoteError { status: 500 });
    }

    #[tokio::test]
    async fn test_2xx_empty_body_is_empty_body() {
        let fetcher = fetcher_returning(Ok((200, Vec::new())));
        let outcome = fetcher.fetch(&target()).await;
        assert_eq!(outcome, FetchOutcome::EmptyBody);
    }

    #[tokio::test]
    async fn test_2xx_with_body_is_success() {
        let fetcher = fetcher_returning(Ok((200, b"<title>ok</title>".to_vec())));
        match fetcher.fetch(&target()).await {
            FetchOutcome::Success { status, body } => {
                assert_eq!(status, 200);
                assert_eq!(body, b"<title>ok</title>");
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_body_is_capped_at_max_body_bytes() {
        let fetcher = fetcher_returning(Ok((200, vec![b'a'; 4096])))
            .with_defaults(FetchOptions { max_body_bytes: 16, ..FetchOptions::default() });
        match fetcher.fetch(&target()).await {
            FetchOutcome::Success { body, .. } => assert_eq!(body.len(), 16),
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_options_filter_rewrites_options() {
        let fetcher = fetcher_returning(Ok((200, b"body".to_vec())))
            .with_options_filter(Arc::new(|mut options, _url| {
                options.timeout = 27;
                options
            }));
        // Classification is unaffected; the rewritten options are observed
        // through a recording transport in the integration tests.
        let outcome = fetcher.fetch(&target()).await;
        assert!(matches!(outcome, FetchOutcome::Success { .. }));
    }

    #[test]
    fn test_default_options() {
        let options = FetchOptions::default();
        assert_eq!(options.timeout, DEFAULT_TIMEOUT_SECS);
        assert_eq!(options.max_body_bytes, 153600);
        assert!(options.headers.is_empty());
    }
}
