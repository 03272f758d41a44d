//! Station catalog: paginated search, per-station aggregation and
//! charger-tier classification.

mod aggregate;
mod builder;
mod error;
mod record;

pub use aggregate::aggregate;
pub use builder::{build_catalog, fetch_port_rows};
pub use error::CatalogError;
pub use record::StationRecord;
