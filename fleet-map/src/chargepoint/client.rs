//! ChargePoint SOAP transport.
//!
//! The pipeline talks to the web service through the [`Transport`] trait so
//! that the catalog and status stages can be exercised against scripted
//! responses. [`SoapClient`] is the real implementation: a single pooled
//! `reqwest` client shared by every request, with a fixed timeout and a
//! bounded retry budget.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

use super::error::TransportError;
use super::retry::retry_with_backoff;

/// Production ChargePoint web services endpoint (API 5.1).
pub const DEFAULT_ENDPOINT: &str =
    "https://webservices.chargepoint.com/webservices/chargepoint/services/5.1";

/// Maximum length of response text kept in error messages.
const SNIPPET_LEN: usize = 200;

/// Submits an encoded request and returns the raw response body.
///
/// Implementations must be safe to call concurrently: the status poller
/// issues many requests through one shared transport.
pub trait Transport {
    fn submit(
        &self,
        payload: Vec<u8>,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

/// Configuration for the SOAP client.
#[derive(Debug, Clone)]
pub struct SoapClientConfig {
    /// Endpoint URL (defaults to production ChargePoint)
    pub endpoint: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Attempts per request before giving up
    pub max_attempts: u32,
    /// Back-off after the first failure; doubles after each further failure
    pub backoff: Duration,
}

impl SoapClientConfig {
    /// Create a config for the given endpoint with production defaults.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_secs: 60,
            max_attempts: 3,
            backoff: Duration::from_secs(1),
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the number of attempts per request.
    pub fn with_max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    /// Set the initial back-off delay.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }
}

impl Default for SoapClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

/// HTTP client for the ChargePoint SOAP endpoint.
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct SoapClient {
    http: reqwest::Client,
    endpoint: String,
    max_attempts: u32,
    backoff: Duration,
}

impl SoapClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SoapClientConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/xml; charset=UTF-8"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
            max_attempts: config.max_attempts,
            backoff: config.backoff,
        })
    }

    /// One POST, without retries.
    async fn post_once(&self, payload: &[u8]) -> Result<Vec<u8>, TransportError> {
        let response = self
            .http
            .post(&self.endpoint)
            .body(payload.to_vec())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: body.chars().take(SNIPPET_LEN).collect(),
            });
        }

        let body = response.bytes().await?.to_vec();
        if let Some(snippet) = fault_snippet(&body) {
            return Err(TransportError::Fault { snippet });
        }
        Ok(body)
    }
}

impl Transport for SoapClient {
    async fn submit(&self, payload: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        retry_with_backoff(self.max_attempts, self.backoff, || self.post_once(&payload)).await
    }
}

/// Returns the text around a SOAP fault marker, if the body contains one.
fn fault_snippet(body: &[u8]) -> Option<String> {
    let start = find(body, b"<Fault").or_else(|| find(body, b":Fault"))?;
    let end = (start + SNIPPET_LEN).min(body.len());
    Some(String::from_utf8_lossy(&body[start..end]).into_owned())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const OK_BODY: &str = "<Envelope><Body><ok/></Body></Envelope>";
    const FAULT_BODY: &str = "<soap:Envelope><soap:Body><soap:Fault><faultstring>Invalid credentials</faultstring></soap:Fault></soap:Body></soap:Envelope>";

    fn test_client(uri: &str) -> SoapClient {
        let config = SoapClientConfig::new(uri)
            .with_timeout(5)
            .with_backoff(Duration::ZERO);
        SoapClient::new(config).unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = SoapClientConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.backoff, Duration::from_secs(1));
    }

    #[test]
    fn config_builder() {
        let config = SoapClientConfig::new("http://localhost:8080")
            .with_timeout(10)
            .with_max_attempts(5)
            .with_backoff(Duration::from_millis(50));
        assert_eq!(config.endpoint, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.backoff, Duration::from_millis(50));
    }

    #[test]
    fn detects_fault_markers() {
        assert!(fault_snippet(FAULT_BODY.as_bytes()).is_some());
        assert!(fault_snippet(b"<Fault>x</Fault>").is_some());
        assert!(fault_snippet(OK_BODY.as_bytes()).is_none());
        assert!(fault_snippet(b"").is_none());
    }

    #[tokio::test]
    async fn posts_xml_and_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("content-type", "text/xml; charset=UTF-8"))
            .respond_with(ResponseTemplate::new(200).set_body_string(OK_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let body = client.submit(b"<Envelope/>".to_vec()).await.unwrap();
        assert_eq!(body, OK_BODY.as_bytes());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].body, b"<Envelope/>");
    }

    #[tokio::test]
    async fn retries_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(OK_BODY))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let body = client.submit(b"<Envelope/>".to_vec()).await.unwrap();
        assert_eq!(body, OK_BODY.as_bytes());
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn fault_is_error_after_retries() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FAULT_BODY))
            .expect(3)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.submit(b"<Envelope/>".to_vec()).await.unwrap_err();
        match err {
            TransportError::Fault { snippet } => assert!(snippet.contains("Fault")),
            other => panic!("expected fault, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn status_error_carries_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("denied"))
            .mount(&server)
            .await;

        let client = SoapClient::new(
            SoapClientConfig::new(server.uri())
                .with_max_attempts(1)
                .with_backoff(Duration::ZERO),
        )
        .unwrap();
        let err = client.submit(b"<Envelope/>".to_vec()).await.unwrap_err();
        assert!(matches!(
            err,
            TransportError::Status { status: 401, ref body } if body == "denied"
        ));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_http_error() {
        let client = SoapClient::new(
            SoapClientConfig::new("http://127.0.0.1:1")
                .with_max_attempts(2)
                .with_backoff(Duration::ZERO),
        )
        .unwrap();
        let err = client.submit(Vec::new()).await.unwrap_err();
        assert!(matches!(err, TransportError::Http(_)));
    }
}
