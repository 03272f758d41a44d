//! Scripted transport for exercising the pipeline without API access.
//!
//! Requests are answered by a closure that sees the encoded request as
//! text, so a test can route on the operation name or on parameters such
//! as `startRecord` (see [`request_field`]).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::client::Transport;
use super::error::TransportError;

type Handler = dyn Fn(&str) -> Result<Vec<u8>, TransportError> + Send + Sync;

/// Transport that answers from a closure and records what it was sent.
#[derive(Clone)]
pub struct MockTransport {
    handler: Arc<Handler>,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockTransport {
    /// Create a mock that answers every request with `handler`.
    pub fn new(
        handler: impl Fn(&str) -> Result<Vec<u8>, TransportError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Arc::new(handler),
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of requests submitted so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request submitted so far, in submission order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Transport for MockTransport {
    async fn submit(&self, payload: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let request = String::from_utf8_lossy(&payload).into_owned();
        let response = (self.handler)(&request);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        response
    }
}

/// Text of the first `<tag>...</tag>` in a request, e.g. `startRecord`.
pub fn request_field<'a>(request: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = request.find(&open)? + open.len();
    let len = request[start..].find(&close)?;
    Some(&request[start..start + len])
}

/// Wrap response XML in a SOAP envelope.
pub fn soap_response(body: &str) -> Vec<u8> {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ns1="urn:dictionary:com.chargepoint.webservices">
<SOAP-ENV:Body>{body}</SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#
    )
    .into_bytes()
}
