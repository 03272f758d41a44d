//! Slim map-ready output.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::StationRecord;
use crate::domain::{ChargerType, StationId, format_load_timestamp};
use crate::status::StatusSummary;

use super::writer::CsvRow;

/// One placeable station with its latest status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    #[serde(rename = "stationName")]
    pub station_name: Option<String>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "State")]
    pub state: Option<String>,
    #[serde(rename = "postalCode")]
    pub postal_code: Option<String>,
    #[serde(rename = "Lat")]
    pub latitude: f64,
    #[serde(rename = "Long")]
    pub longitude: f64,
    #[serde(rename = "Charger type")]
    pub charger_type: ChargerType,
    #[serde(rename = "Charger type (legend)")]
    pub charger_legend: Option<String>,
    #[serde(rename = "StationNetworkStatus")]
    pub network_status: Option<String>,
    #[serde(rename = "LastPortStatus")]
    pub port_status: Option<String>,
    #[serde(rename = "faultReason")]
    pub fault_reason: Option<String>,
    #[serde(rename = "StatusTimestamp")]
    pub status_timestamp: Option<String>,
    #[serde(rename = "_loaded_at_utc")]
    pub loaded_at: String,
}

impl CsvRow for OutputRow {
    const HEADER: &'static [&'static str] = &[
        "stationName",
        "Address",
        "City",
        "State",
        "postalCode",
        "Lat",
        "Long",
        "Charger type",
        "Charger type (legend)",
        "StationNetworkStatus",
        "LastPortStatus",
        "faultReason",
        "StatusTimestamp",
        "_loaded_at_utc",
    ];
}

/// Join the catalog with the status map and keep only placeable stations.
///
/// Every catalog station with both coordinates appears exactly once, in
/// catalog order; stations without a status get empty status fields. All
/// rows carry the same `loaded_at` watermark.
pub fn reconcile(
    catalog: &[StationRecord],
    statuses: &HashMap<StationId, StatusSummary>,
    loaded_at: DateTime<Utc>,
) -> Vec<OutputRow> {
    let loaded_at = format_load_timestamp(loaded_at);

    catalog
        .iter()
        .filter_map(|station| {
            let (Some(latitude), Some(longitude)) = (station.latitude, station.longitude) else {
                return None;
            };
            let status = statuses.get(&station.station_id);

            Some(OutputRow {
                station_name: station.station_name.clone(),
                address: station.address.clone(),
                city: station.city.clone(),
                state: station.state.clone(),
                postal_code: station.postal_code.clone(),
                latitude,
                longitude,
                charger_type: station.charger_type,
                charger_legend: station.charger_legend.clone(),
                network_status: status.map(|s| s.network_status.clone()),
                port_status: status.map(|s| s.port_status.clone()),
                fault_reason: status.map(|s| s.fault_reason.clone()),
                status_timestamp: status.and_then(|s| s.timestamp.clone()),
                loaded_at: loaded_at.clone(),
            })
        })
        .collect()
}
