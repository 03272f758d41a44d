//! SOAP request envelopes for the ChargePoint web service.
//!
//! Every request carries a WS-Security `UsernameToken` with the API
//! credentials in plain text. Encoding is pure string construction; the
//! credentials are validated before the pipeline starts (see
//! [`crate::config::Credentials::from_env`]).

use quick_xml::escape::escape;

use crate::config::{Credentials, SearchArea};
use crate::domain::StationId;

const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const CHARGEPOINT_NS: &str = "urn:dictionary:com.chargepoint.webservices";
const WSSE_NS: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd";
const PASSWORD_TEXT: &str = "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-username-token-profile-1.0#PasswordText";

/// One page of a `getStations` search.
#[derive(Debug, Clone, Copy)]
pub struct StationQuery<'a> {
    pub area: &'a SearchArea,
    /// Jurisdiction filter, e.g. `"NY"`.
    pub state: &'a str,
    /// Zero-based offset of the first record on this page.
    pub start_record: usize,
    pub page_size: usize,
}

/// A ChargePoint operation and its parameters.
#[derive(Debug, Clone, Copy)]
pub enum Operation<'a> {
    /// `getStations`: paginated metadata search.
    StationSearch(StationQuery<'a>),
    /// `getStationStatus`: live port status for one station.
    StationStatus(&'a StationId),
}

impl Operation<'_> {
    /// SOAP operation name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::StationSearch(_) => "getStations",
            Operation::StationStatus(_) => "getStationStatus",
        }
    }

    fn body(&self) -> String {
        match self {
            Operation::StationSearch(q) => format!(
                "<urn:getStations>\
                 <searchQuery>\
                 <geo>\
                 <latitude>{lat}</latitude>\
                 <longitude>{lon}</longitude>\
                 <distance>{radius}</distance>\
                 </geo>\
                 <state>{state}</state>\
                 <startRecord>{start}</startRecord>\
                 <maxRecords>{max}</maxRecords>\
                 </searchQuery>\
                 </urn:getStations>",
                lat = q.area.latitude,
                lon = q.area.longitude,
                radius = q.area.radius_miles,
                state = escape(q.state),
                start = q.start_record,
                max = q.page_size,
            ),
            Operation::StationStatus(id) => format!(
                "<urn:getStationStatus>\
                 <searchQuery>\
                 <stationID>{id}</stationID>\
                 </searchQuery>\
                 </urn:getStationStatus>",
                id = escape(id.as_str()),
            ),
        }
    }
}

/// Builds authenticated request payloads.
#[derive(Clone)]
pub struct RequestEncoder {
    credentials: Credentials,
}

impl RequestEncoder {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Wrap an operation in the authenticated SOAP envelope.
    pub fn encode(&self, operation: &Operation<'_>) -> Vec<u8> {
        format!(
            r#"<soapenv:Envelope xmlns:soapenv="{SOAP_ENV_NS}" xmlns:urn="{CHARGEPOINT_NS}">
  <soapenv:Header xmlns:wsse="{WSSE_NS}">
    <wsse:Security soapenv:mustUnderstand="1">
      <wsse:UsernameToken>
        <wsse:Username>{username}</wsse:Username>
        <wsse:Password Type="{PASSWORD_TEXT}">{password}</wsse:Password>
      </wsse:UsernameToken>
    </wsse:Security>
  </soapenv:Header>
  <soapenv:Body>
    {body}
  </soapenv:Body>
</soapenv:Envelope>"#,
            username = escape(self.credentials.username()),
            password = escape(self.credentials.password()),
            body = operation.body(),
        )
        .into_bytes()
    }
}
