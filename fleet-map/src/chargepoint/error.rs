//! ChargePoint web service error types.

/// Errors from submitting a request to the ChargePoint SOAP endpoint.
///
/// Returned only after the client's retry budget has been exhausted.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status code
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body carried a SOAP fault
    #[error("SOAP fault returned: {snippet}")]
    Fault { snippet: String },
}

/// Errors from parsing a SOAP response body.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Body is not well-formed XML
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Body is not valid UTF-8
    #[error("response is not UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Start and end tags do not pair up
    #[error("unbalanced XML element: {0}")]
    Unbalanced(String),

    /// A coordinate field is present but not a number
    #[error("invalid {field} value: {value:?}")]
    InvalidCoordinate { field: &'static str, value: String },
}
