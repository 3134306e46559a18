//! End-to-end lookup tests against an injected fake transport.
//!
//! The recording transport stands in for the remote host and captures the
//! exact request it received, so the tests can assert on the options actually
//! sent without any global state.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use linkpeek_core::{
    AllowAll, DetailsService, FetchOptions, Fetcher, LinkpeekError, Transport, TransportError,
    TransportReply, ViewPolicy,
};
use serde_json::json;
use url::Url;

const FIXTURE: &str = "../../tests/fixtures/example-website.html";
const DECODED_TITLE: &str = "Example Website \u{2014} - with encoded content.";

fn fixture_body() -> Vec<u8> {
    std::fs::read(FIXTURE).expect("fixture should be readable")
}

/// Fake remote host: returns a canned reply and records each request.
struct RecordingTransport {
    reply: Result<(u16, Vec<u8>), String>,
    seen: Mutex<Vec<(Url, FetchOptions)>>,
}

impl RecordingTransport {
    fn new(reply: Result<(u16, Vec<u8>), String>) -> Arc<Self> {
        Arc::new(Self { reply, seen: Mutex::new(Vec::new()) })
    }

    fn last_request(&self) -> (Url, FetchOptions) {
        self.seen.lock().unwrap().last().cloned().expect("a request should have been sent")
    }

    fn request_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get(&self, url: &Url, options: &FetchOptions)
        -> Result<TransportReply, TransportError> {
        self.seen.lock().unwrap().push((url.clone(), options.clone()));
        match &self.reply {
            Ok((status, body)) => Ok(TransportReply { status: *status, body: body.clone() }),
            Err(msg) => Err(TransportError(msg.clone())),
        }
    }
}

struct DenyAll;

impl ViewPolicy for DenyAll {
    fn can_view(&self) -> bool {
        false
    }
}

fn service_with(transport: Arc<RecordingTransport>) -> DetailsService {
    DetailsService::new(Fetcher::new(transport))
}

#[tokio::test]
async fn test_success_returns_decoded_title() {
    let transport = RecordingTransport::new(Ok((200, fixture_body())));
    let service = service_with(transport.clone());

    let details = service
        .lookup(&AllowAll, &json!("https://dummysite.com"))
        .await
        .expect("lookup should succeed");

    assert_eq!(details.title, DECODED_TITLE);
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_forbidden_regardless_of_remote_outcome() {
    let transport = RecordingTransport::new(Ok((200, fixture_body())));
    let service = service_with(transport.clone());

    let err = service
        .lookup(&DenyAll, &json!("https://dummysite.com"))
        .await
        .unwrap_err();

    assert_eq!(err, LinkpeekError::Forbidden);
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_remote_404_maps_to_no_response() {
    let transport = RecordingTransport::new(Ok((404, Vec::new())));
    let service = service_with(transport);

    let err = service
        .lookup(&AllowAll, &json!("https://dummysite.com"))
        .await
        .unwrap_err();

    assert_eq!(err, LinkpeekError::NoResponse);
    assert_eq!(err.code(), "no_response");
}

#[tokio::test]
async fn test_network_failure_maps_to_no_response() {
    let transport = RecordingTransport::new(Err("connection refused".to_string()));
    let service = service_with(transport);

    let err = service
        .lookup(&AllowAll, &json!("https://dummysite.com"))
        .await
        .unwrap_err();

    assert_eq!(err, LinkpeekError::NoResponse);
}

#[tokio::test]
async fn test_empty_body_maps_to_no_content() {
    let transport = RecordingTransport::new(Ok((200, Vec::new())));
    let service = service_with(transport);

    let err = service
        .lookup(&AllowAll, &json!("https://dummysite.com"))
        .await
        .unwrap_err();

    assert_eq!(err, LinkpeekError::NoContent);
    assert_eq!(err.code(), "no_content");
}

#[tokio::test]
async fn test_options_filter_overrides_are_what_is_sent() {
    let transport = RecordingTransport::new(Ok((200, fixture_body())));
    let fetcher = Fetcher::new(transport.clone()).with_options_filter(Arc::new(|mut options, url| {
        options.timeout = 27;
        options.headers.push(("x-requested-for".to_string(), url.to_string()));
        options
    }));
    let service = DetailsService::new(fetcher);

    service
        .lookup(&AllowAll, &json!("https://dummysite.com"))
        .await
        .expect("lookup should succeed");

    let (url, sent) = transport.last_request();
    assert_eq!(sent.timeout, 27);
    // The field the filter left alone keeps its default.
    assert_eq!(sent.max_body_bytes, 153600);
    assert_eq!(
        sent.headers,
        vec![("x-requested-for".to_string(), "https://dummysite.com/".to_string())]
    );
    assert_eq!(url.as_str(), "https://dummysite.com/");
}

#[tokio::test]
async fn test_repeated_lookups_are_idempotent() {
    let transport = RecordingTransport::new(Ok((200, fixture_body())));
    let service = service_with(transport.clone());

    let first = service.lookup(&AllowAll, &json!("https://dummysite.com")).await.unwrap();
    let second = service.lookup(&AllowAll, &json!("https://dummysite.com")).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(transport.request_count(), 2);
}
