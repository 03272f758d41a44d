//! Aggregated station record.

use serde::Serialize;

use crate::domain::{ChargerType, StationId};
use crate::output::CsvRow;

/// One row per unique station, as written to the station cache CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRecord {
    #[serde(rename = "stationID")]
    pub station_id: StationId,
    #[serde(rename = "stationName")]
    pub station_name: Option<String>,
    #[serde(rename = "stationModel")]
    pub station_model: Option<String>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "State")]
    pub state: Option<String>,
    #[serde(rename = "postalCode")]
    pub postal_code: Option<String>,
    #[serde(rename = "sgName")]
    pub group_name: Option<String>,
    #[serde(rename = "Lat")]
    pub latitude: Option<f64>,
    #[serde(rename = "Long")]
    pub longitude: Option<f64>,
    #[serde(rename = "Charger type")]
    pub charger_type: ChargerType,
    /// `None` for gateways.
    #[serde(rename = "Charger type (legend)")]
    pub charger_legend: Option<String>,
}

impl CsvRow for StationRecord {
    const HEADER: &'static [&'static str] = &[
        "stationID",
        "stationName",
        "stationModel",
        "Address",
        "City",
        "State",
        "postalCode",
        "sgName",
        "Lat",
        "Long",
        "Charger type",
        "Charger type (legend)",
    ];
}
