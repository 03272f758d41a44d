//! Per-port to per-station aggregation.
//!
//! `getStations` returns one row per port. Ports of the same station repeat
//! the station-level fields, but not always completely, so each field of the
//! aggregated record takes the first non-empty value seen for that station,
//! in page order.

use std::collections::BTreeMap;

use tracing::warn;

use crate::chargepoint::PortStationRecord;
use crate::domain::{ChargerType, StationId};

use super::record::StationRecord;

/// Fields being filled in for one station.
#[derive(Debug, Default)]
struct StationFields {
    station_name: Option<String>,
    station_model: Option<String>,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    postal_code: Option<String>,
    group_name: Option<String>,
    group_name_fallback: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl StationFields {
    /// Fill every still-empty field from `row`.
    fn absorb(&mut self, row: PortStationRecord) {
        fill_text(&mut self.station_name, row.station_name);
        fill_text(&mut self.station_model, row.station_model);
        fill_text(&mut self.address, row.address);
        fill_text(&mut self.city, row.city);
        fill_text(&mut self.state, row.state);
        fill_text(&mut self.postal_code, row.postal_code);
        fill_text(&mut self.group_name, row.group_name);
        fill_text(&mut self.group_name_fallback, row.group_name_fallback);
        if self.latitude.is_none() {
            self.latitude = row.latitude;
        }
        if self.longitude.is_none() {
            self.longitude = row.longitude;
        }
    }

    fn into_record(self, station_id: StationId) -> StationRecord {
        let group_name = self.group_name.or(self.group_name_fallback);
        let charger_type = ChargerType::classify(self.station_model.as_deref());
        let charger_legend = charger_type.legend(group_name.as_deref());
        StationRecord {
            station_id,
            station_name: self.station_name,
            station_model: self.station_model,
            address: self.address,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            group_name,
            latitude: self.latitude,
            longitude: self.longitude,
            charger_type,
            charger_legend,
        }
    }
}

fn fill_text(slot: &mut Option<String>, value: Option<String>) {
    if slot.is_none() {
        *slot = value.filter(|v| !v.is_empty());
    }
}

/// Group port rows by station and classify each station.
///
/// The result holds exactly one record per distinct station identifier,
/// ordered by identifier. Rows without an identifier all land in a single
/// group under the empty identifier; that merge is logged because it almost
/// certainly joins unrelated stations.
pub fn aggregate(rows: Vec<PortStationRecord>) -> Vec<StationRecord> {
    let missing_id = rows.iter().filter(|r| r.station_id.is_empty()).count();
    if missing_id > 0 {
        warn!(
            rows = missing_id,
            "station rows without stationID merged into one catch-all group"
        );
    }

    let mut groups: BTreeMap<StationId, StationFields> = BTreeMap::new();
    for row in rows {
        groups
            .entry(row.station_id.clone())
            .or_default()
            .absorb(row);
    }

    groups
        .into_iter()
        .map(|(id, fields)| fields.into_record(id))
        .collect()
}
