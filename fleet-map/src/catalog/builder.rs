//! Paginated station search.

use tracing::{debug, info, warn};

use crate::chargepoint::{
    Operation, PortStationRecord, RequestEncoder, StationQuery, Transport, parse_stations,
};
use crate::config::SearchArea;

use super::aggregate::aggregate;
use super::error::CatalogError;
use super::record::StationRecord;

/// Fetch every `getStations` page, in order, until one comes back empty.
///
/// The total number of stations is not known in advance, so the only stop
/// condition is a page without `stationData`. Returns the raw per-port rows
/// of all pages concatenated.
pub async fn fetch_port_rows<T: Transport>(
    transport: &T,
    encoder: &RequestEncoder,
    area: &SearchArea,
    state: &str,
    page_size: usize,
) -> Result<Vec<PortStationRecord>, CatalogError> {
    let page_size = page_size.max(1);
    let mut rows = Vec::new();
    let mut start_record = 0;

    loop {
        let query = StationQuery {
            area,
            state,
            start_record,
            page_size,
        };
        let operation = Operation::StationSearch(query);
        debug!(operation = operation.name(), start_record, page_size, "Requesting station page");
        let payload = encoder.encode(&operation);

        let body = transport
            .submit(payload)
            .await
            .map_err(|source| CatalogError::Transport {
                start_record,
                source,
            })?;

        let page = parse_stations(&body).map_err(|source| CatalogError::Parse {
            start_record,
            source,
        })?;

        if page.is_empty() {
            break;
        }

        debug!(start_record, rows = page.len(), "Fetched station page");
        rows.extend(page);
        start_record += page_size;
    }

    Ok(rows)
}

/// Build the per-station catalog for a search area.
///
/// Fails with [`CatalogError::Empty`] when the search finds nothing, so the
/// caller never writes an empty snapshot over a good one.
pub async fn build_catalog<T: Transport>(
    transport: &T,
    encoder: &RequestEncoder,
    area: &SearchArea,
    state: &str,
    page_size: usize,
) -> Result<Vec<StationRecord>, CatalogError> {
    info!(state, radius_miles = area.radius_miles, "Fetching stations via getStations");

    let rows = fetch_port_rows(transport, encoder, area, state, page_size).await?;
    if rows.is_empty() {
        warn!("getStations returned no rows");
        return Err(CatalogError::Empty);
    }

    let port_rows = rows.len();
    let catalog = aggregate(rows);
    info!(port_rows, stations = catalog.len(), "Station catalog built");

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::chargepoint::mock::{request_field, soap_response};
    use crate::chargepoint::{MockTransport, TransportError};
    use crate::config::Credentials;
    use crate::domain::ChargerType;

    use super::*;

    fn encoder() -> RequestEncoder {
        RequestEncoder::new(Credentials::new("user", "pass"))
    }

    fn station_xml(id: usize) -> String {
        format!(
            "<stationData><stationID>1:{id}</stationID><stationName>Station {id}</stationName>\
             <stationModel>CT4020</stationModel>\
             <Port><portNumber>1</portNumber><Geo><Lat>40.{id}</Lat><Long>-74.{id}</Long></Geo></Port>\
             </stationData>"
        )
    }

    fn page(start: usize, count: usize) -> Vec<u8> {
        let stations: String = (start..start + count).map(station_xml).collect();
        soap_response(&format!(
            "<ns1:getStationsResponse><responseCode>100</responseCode>{stations}</ns1:getStationsResponse>"
        ))
    }

    /// Mock serving pages of the given sizes, indexed by `startRecord / page_size`.
    fn paged_mock(sizes: &'static [usize], page_size: usize) -> MockTransport {
        MockTransport::new(move |req| {
            let start: usize = request_field(req, "startRecord").unwrap().parse().unwrap();
            let count = sizes.get(start / page_size).copied().unwrap_or(0);
            Ok(page(start, count))
        })
    }

    #[tokio::test]
    async fn pages_until_empty() {
        let mock = paged_mock(&[500, 500, 137, 0], 500);
        let area = SearchArea::default();

        let rows = fetch_port_rows(&mock, &encoder(), &area, "NY", 500)
            .await
            .unwrap();

        assert_eq!(mock.call_count(), 4);
        assert_eq!(rows.len(), 1137);

        let starts: Vec<_> = mock
            .requests()
            .iter()
            .map(|r| request_field(r, "startRecord").unwrap().to_string())
            .collect();
        assert_eq!(starts, vec!["0", "500", "1000", "1500"]);
        assert!(mock.requests().iter().all(|r| r.contains("<maxRecords>500</maxRecords>")));
    }

    #[tokio::test]
    async fn builds_catalog_from_pages() {
        let mock = paged_mock(&[3, 2], 3);
        let area = SearchArea::default();

        let catalog = build_catalog(&mock, &encoder(), &area, "NY", 3).await.unwrap();

        assert_eq!(catalog.len(), 5);
        assert_eq!(mock.call_count(), 3);
        assert!(catalog.iter().all(|s| s.charger_type == ChargerType::Level2));
        assert_eq!(catalog[0].station_id.as_str(), "1:0");
        assert_eq!(catalog[0].station_name.as_deref(), Some("Station 0"));
        assert_eq!(catalog[0].latitude, Some(40.0));
    }

    #[tokio::test]
    async fn multi_port_stations_collapse() {
        let xml = soap_response(
            "<r><stationData><stationID>1:7</stationID><stationModel>CPE250</stationModel>\
             <Port><portNumber>1</portNumber></Port>\
             <Port><portNumber>2</portNumber><Geo><Lat>41.5</Lat><Long>-73.5</Long></Geo></Port>\
             </stationData></r>",
        );
        let calls = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&calls);
        let mock = MockTransport::new(move |_| {
            if c.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(xml.clone())
            } else {
                Ok(soap_response("<r/>"))
            }
        });

        let catalog = build_catalog(&mock, &encoder(), &SearchArea::default(), "NY", 500)
            .await
            .unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].latitude, Some(41.5));
        assert_eq!(catalog[0].longitude, Some(-73.5));
        assert_eq!(catalog[0].charger_type, ChargerType::Level3);
    }

    #[tokio::test]
    async fn empty_first_page_is_error() {
        let mock = paged_mock(&[0], 500);
        let result = build_catalog(&mock, &encoder(), &SearchArea::default(), "NY", 500).await;

        assert!(matches!(result, Err(CatalogError::Empty)));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn transport_failure_aborts() {
        let mock = MockTransport::new(|req| {
            match request_field(req, "startRecord") {
                Some("0") => Ok(page(0, 2)),
                _ => Err(TransportError::Status {
                    status: 503,
                    body: String::new(),
                }),
            }
        });

        let result = build_catalog(&mock, &encoder(), &SearchArea::default(), "NY", 2).await;
        assert!(matches!(
            result,
            Err(CatalogError::Transport { start_record: 2, .. })
        ));
    }

    #[tokio::test]
    async fn parse_failure_aborts() {
        let mock = MockTransport::new(|_| Ok(b"<Envelope><Body><stationData>".to_vec()));
        let result = build_catalog(&mock, &encoder(), &SearchArea::default(), "NY", 500).await;
        assert!(matches!(
            result,
            Err(CatalogError::Parse { start_record: 0, .. })
        ));
    }
}
