//! Latest-status reduction.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::chargepoint::StatusRecord;
use crate::domain::{StationId, format_status_timestamp, parse_status_timestamp};

/// Most recent status of a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSummary {
    pub network_status: String,
    pub port_status: String,
    pub fault_reason: String,
    /// `YYYY-MM-DDTHH:MM:SSZ`, or `None` if no port reported a readable time.
    pub timestamp: Option<String>,
}

/// Reduce per-port status records to one summary per station.
///
/// The summary comes from the record with the latest timestamp. Records
/// with unreadable timestamps order before every readable one, and ties
/// go to the record seen last, so the answer does not depend on which
/// status request finished first.
pub fn reduce_statuses(records: Vec<StatusRecord>) -> HashMap<StationId, StatusSummary> {
    let mut latest: HashMap<StationId, (Option<DateTime<Utc>>, StatusRecord)> = HashMap::new();

    for record in records {
        let ts = parse_status_timestamp(&record.timestamp);
        match latest.get(&record.station_id) {
            Some((current, _)) if ts < *current => {}
            _ => {
                latest.insert(record.station_id.clone(), (ts, record));
            }
        }
    }

    latest
        .into_iter()
        .map(|(id, (ts, record))| {
            let summary = StatusSummary {
                network_status: record.network_status,
                port_status: record.port_status,
                fault_reason: record.fault_reason,
                timestamp: ts.map(format_status_timestamp),
            };
            (id, summary)
        })
        .collect()
}
