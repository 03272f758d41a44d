//! Concurrent `getStationStatus` polling.

use std::collections::HashMap;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::chargepoint::{Operation, RequestEncoder, StatusRecord, Transport, parse_status};
use crate::domain::StationId;

use super::error::StatusFetchError;
use super::summary::{StatusSummary, reduce_statuses};

/// Fetch the status of every station, at most `concurrency` at a time.
///
/// Each station gets exactly one request (plus the transport's own
/// retries). A station whose request or response fails is logged and left
/// out of the result; it never affects the others. `concurrency` of zero
/// is treated as one.
pub async fn poll_statuses<T: Transport>(
    transport: &T,
    encoder: &RequestEncoder,
    station_ids: &[StationId],
    concurrency: usize,
) -> HashMap<StationId, StatusSummary> {
    let concurrency = concurrency.max(1);
    info!(
        stations = station_ids.len(),
        concurrency, "Fetching station status"
    );

    let results: Vec<_> = stream::iter(station_ids)
        .map(|id| async move {
            let result = fetch_status(transport, encoder, id).await;
            (id, result)
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    let mut records = Vec::new();
    let mut failed = 0usize;
    for (id, result) in results {
        match result {
            Ok(ports) => {
                debug!(station_id = %id, ports = ports.len(), "Fetched station status");
                records.extend(ports);
            }
            Err(e) => {
                warn!(station_id = %id, error = %e, "Station status fetch failed");
                failed += 1;
            }
        }
    }

    let summaries = reduce_statuses(records);
    info!(
        with_status = summaries.len(),
        failed, "Station status polling finished"
    );
    summaries
}

async fn fetch_status<T: Transport>(
    transport: &T,
    encoder: &RequestEncoder,
    id: &StationId,
) -> Result<Vec<StatusRecord>, StatusFetchError> {
    let payload = encoder.encode(&Operation::StationStatus(id));
    let body = transport.submit(payload).await?;
    Ok(parse_status(&body)?)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::chargepoint::mock::{request_field, soap_response};
    use crate::chargepoint::{MockTransport, TransportError};
    use crate::config::Credentials;

    use super::*;

    fn encoder() -> RequestEncoder {
        RequestEncoder::new(Credentials::new("user", "pass"))
    }

    fn ids(raw: &[&str]) -> Vec<StationId> {
        raw.iter().map(|s| StationId::from(*s)).collect()
    }

    fn status_body(id: &str, status: &str) -> Vec<u8> {
        soap_response(&format!(
            "<ns1:getStationStatusResponse><responseCode>100</responseCode>\
             <stationData><stationID>{id}</stationID><networkStatus>Reachable</networkStatus>\
             <Port><portNumber>1</portNumber><Status>{status}</Status>\
             <TimeStamp>2024-01-01T00:00:00Z</TimeStamp></Port>\
             </stationData></ns1:getStationStatusResponse>"
        ))
    }

    fn requested_id(req: &str) -> String {
        request_field(req, "stationID").unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn failing_station_is_isolated() {
        let mock = MockTransport::new(|req| {
            let id = requested_id(req);
            if id == "S2" {
                Err(TransportError::Fault {
                    snippet: "<soap:Fault>boom</soap:Fault>".to_string(),
                })
            } else {
                Ok(status_body(&id, "AVAILABLE"))
            }
        });

        let summaries = poll_statuses(&mock, &encoder(), &ids(&["S1", "S2", "S3"]), 4).await;

        assert_eq!(summaries.len(), 2);
        assert!(summaries.contains_key(&StationId::from("S1")));
        assert!(summaries.contains_key(&StationId::from("S3")));
        assert!(!summaries.contains_key(&StationId::from("S2")));
        assert_eq!(summaries[&StationId::from("S1")].port_status, "AVAILABLE");
        assert_eq!(summaries[&StationId::from("S1")].network_status, "Reachable");
    }

    #[tokio::test]
    async fn malformed_response_is_isolated() {
        let mock = MockTransport::new(|req| {
            let id = requested_id(req);
            if id == "S1" {
                Ok(b"<Envelope><Body>".to_vec())
            } else {
                Ok(status_body(&id, "INUSE"))
            }
        });

        let summaries = poll_statuses(&mock, &encoder(), &ids(&["S1", "S2"]), 2).await;

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[&StationId::from("S2")].port_status, "INUSE");
    }

    #[tokio::test]
    async fn every_station_requested_once() {
        let mock = MockTransport::new(|req| Ok(status_body(&requested_id(req), "AVAILABLE")));
        let stations: Vec<StationId> = (0..25).map(|i| StationId::new(format!("1:{i}"))).collect();

        let summaries = poll_statuses(&mock, &encoder(), &stations, 5).await;

        assert_eq!(mock.call_count(), 25);
        let mut requested: Vec<String> = mock.requests().iter().map(|r| requested_id(r)).collect();
        requested.sort();
        requested.dedup();
        assert_eq!(requested.len(), 25);
        assert_eq!(summaries.len(), 25);
    }

    #[tokio::test]
    async fn zero_concurrency_still_polls() {
        let mock = MockTransport::new(|req| Ok(status_body(&requested_id(req), "AVAILABLE")));

        let summaries = poll_statuses(&mock, &encoder(), &ids(&["S1", "S2"]), 0).await;

        assert_eq!(summaries.len(), 2);
    }

    #[tokio::test]
    async fn no_stations_no_requests() {
        let mock = MockTransport::new(|_| panic!("no request expected"));

        let summaries = poll_statuses(&mock, &encoder(), &[], 20).await;

        assert!(summaries.is_empty());
        assert_eq!(mock.call_count(), 0);
    }

    /// Transport that sleeps per request and records peak parallelism.
    #[derive(Default)]
    struct SlowTransport {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl Transport for SlowTransport {
        async fn submit(&self, payload: Vec<u8>) -> Result<Vec<u8>, TransportError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            let request = String::from_utf8_lossy(&payload);
            Ok(status_body(&requested_id(&request), "AVAILABLE"))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn respects_concurrency_bound() {
        let transport = SlowTransport::default();
        let stations: Vec<StationId> = (0..12).map(|i| StationId::new(format!("1:{i}"))).collect();

        let summaries = poll_statuses(&transport, &encoder(), &stations, 3).await;

        assert_eq!(summaries.len(), 12);
        assert_eq!(transport.peak.load(Ordering::SeqCst), 3);
    }
}
