//! Status polling errors.

use crate::chargepoint::{ParseError, TransportError};

/// Failure to fetch one station's status.
///
/// Never escapes the poller: the station is logged and left without status.
#[derive(Debug, thiserror::Error)]
pub enum StatusFetchError {
    /// Request failed after all retries
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Response could not be parsed
    #[error("malformed status response: {0}")]
    Parse(#[from] ParseError),
}
