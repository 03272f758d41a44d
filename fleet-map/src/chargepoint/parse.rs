//! Parsers for `getStations` and `getStationStatus` responses.

use crate::domain::StationId;

use super::error::ParseError;
use super::types::{PortStationRecord, StatusRecord};
use super::xml::Element;

/// Parse one `getStations` page into per-port records.
///
/// Returns an empty list when the response has no SOAP `Body` or the body
/// contains no `stationData`; the catalog builder treats that as the last
/// page.
pub fn parse_stations(bytes: &[u8]) -> Result<Vec<PortStationRecord>, ParseError> {
    let root = Element::parse(bytes)?;
    let Some(body) = soap_body(&root) else {
        return Ok(Vec::new());
    };

    let mut rows = Vec::new();
    for station in body.descendants("stationData") {
        let base = station_fields(station);
        let mut ports = station.children("Port").peekable();

        if ports.peek().is_none() {
            rows.push(base);
            continue;
        }

        for port in ports {
            rows.push(PortStationRecord {
                port_number: non_blank(port.find_text("portNumber")),
                latitude: coordinate("Lat", port.find_text("Geo/Lat"))?,
                longitude: coordinate("Long", port.find_text("Geo/Long"))?,
                ..base.clone()
            });
        }
    }
    Ok(rows)
}

/// Parse a `getStationStatus` response into per-port status records.
///
/// Stations without any `Port` children contribute nothing.
pub fn parse_status(bytes: &[u8]) -> Result<Vec<StatusRecord>, ParseError> {
    let root = Element::parse(bytes)?;
    let Some(body) = soap_body(&root) else {
        return Ok(Vec::new());
    };

    let mut records = Vec::new();
    for station in body.descendants("stationData") {
        let station_id = StationId::new(station.find_text("stationID").unwrap_or_default());
        let network_status = text(station, "networkStatus");

        for port in station.children("Port") {
            records.push(StatusRecord {
                station_id: station_id.clone(),
                port_number: text(port, "portNumber"),
                port_status: text(port, "Status"),
                fault_reason: text(port, "faultReason"),
                timestamp: text(port, "TimeStamp"),
                network_status: network_status.clone(),
            });
        }
    }
    Ok(records)
}

fn soap_body(root: &Element) -> Option<&Element> {
    root.descendants("Body").into_iter().next()
}

/// Station-level fields: every direct child except `Port`.
fn station_fields(station: &Element) -> PortStationRecord {
    let mut record = PortStationRecord::default();

    for child in station.children.iter().filter(|c| c.name != "Port") {
        let value = non_blank(Some(child.text.as_str()));
        match child.name.as_str() {
            "stationID" => record.station_id = StationId::new(&child.text),
            "stationName" => record.station_name = value,
            "stationModel" => record.station_model = value,
            "Address" => record.address = value,
            "City" => record.city = value,
            "State" => record.state = value,
            "postalCode" => record.postal_code = value,
            "sgName" => record.group_name = value,
            "sgname" => record.group_name_fallback = value,
            _ => {}
        }
    }

    record
}

fn text(element: &Element, path: &str) -> String {
    element.find_text(path).unwrap_or_default().to_string()
}

fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Parse a coordinate. Blank is missing; non-finite values are missing too,
/// since the map cannot place them.
fn coordinate(field: &'static str, text: Option<&str>) -> Result<Option<f64>, ParseError> {
    let Some(raw) = non_blank(text) else {
        return Ok(None);
    };
    let value: f64 = raw
        .parse()
        .map_err(|_| ParseError::InvalidCoordinate { field, value: raw })?;
    Ok(value.is_finite().then_some(value))
}
