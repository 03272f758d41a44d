//! Domain types shared by the catalog, status and output stages.

mod charger;
mod station_id;
mod timestamp;

pub use charger::ChargerType;
pub use station_id::StationId;
pub use timestamp::{format_load_timestamp, format_status_timestamp, parse_status_timestamp};
