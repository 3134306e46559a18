pub mod error;
pub mod extract;
pub mod fetch;
pub mod service;
pub mod validate;

pub use error::{LinkpeekError, Result};
pub use extract::{PageDetails, extract, extract_from_str};
#[cfg(feature = "fetch")]
pub use fetch::ReqwestTransport;
pub use fetch::{
    DEFAULT_MAX_BODY_BYTES, DEFAULT_TIMEOUT_SECS, FetchOptions, FetchOutcome, Fetcher,
    OptionsFilter, Transport, TransportError, TransportReply,
};
pub use service::{AllowAll, DetailsService, ViewPolicy};
pub use validate::{validate_url, validate_url_param};
