//! Catalog build errors.

use crate::chargepoint::{ParseError, TransportError};

/// Errors that abort the station catalog build.
///
/// Pagination is sequential and every page is load-bearing, so any failure
/// here is fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A page could not be fetched after all retries
    #[error("getStations page at startRecord={start_record} failed: {source}")]
    Transport {
        start_record: usize,
        #[source]
        source: TransportError,
    },

    /// A page was fetched but could not be parsed
    #[error("getStations page at startRecord={start_record} is malformed: {source}")]
    Parse {
        start_record: usize,
        #[source]
        source: ParseError,
    },

    /// The search returned no stations at all
    #[error("no station metadata retrieved")]
    Empty,
}
