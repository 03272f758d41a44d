//! Raw records parsed from ChargePoint responses.
//!
//! These map one-to-one onto the XML the service returns and are consumed
//! immediately by the catalog and status stages. Optional fields use
//! `Option` and are already normalized: absent or blank text is `None`.

use crate::domain::StationId;

/// One physical charging port from a `getStations` page.
///
/// A station with several ports yields several records sharing the same
/// station-level fields; a station with no ports yields one record with
/// `port_number: None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortStationRecord {
    pub station_id: StationId,
    pub station_name: Option<String>,
    pub station_model: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    /// Station-group name (`sgName`), used for the map legend.
    pub group_name: Option<String>,
    /// Lower-case `sgname` variant; only used when no row of the station
    /// carries `sgName`.
    pub group_name_fallback: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub port_number: Option<String>,
}

/// One port's live status from a `getStationStatus` response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusRecord {
    pub station_id: StationId,
    pub port_number: String,
    pub port_status: String,
    pub fault_reason: String,
    /// Raw timestamp text; may be empty or malformed.
    pub timestamp: String,
    /// Station-level `networkStatus`, repeated on every port.
    pub network_status: String,
}
