//! ChargePoint web services client.
//!
//! The service speaks SOAP 1.1 with WS-Security username tokens. Two
//! operations are used:
//! - `getStations`: paginated station metadata, one `stationData` per
//!   station with a `Port` child per connector
//! - `getStationStatus`: live status of each port of one station
//!
//! Responses are parsed into the raw records in [`types`]; the catalog and
//! status stages aggregate them.

mod client;
mod envelope;
mod error;
pub mod mock;
mod parse;
mod retry;
mod types;
pub(crate) mod xml;

pub use client::{DEFAULT_ENDPOINT, SoapClient, SoapClientConfig, Transport};
pub use envelope::{Operation, RequestEncoder, StationQuery};
pub use error::{ParseError, TransportError};
pub use mock::MockTransport;
pub use parse::{parse_stations, parse_status};
pub use types::{PortStationRecord, StatusRecord};
