//! One refresh run: catalog, status, reconcile, write.

use chrono::Utc;
use tracing::info;

use crate::catalog::{CatalogError, build_catalog};
use crate::chargepoint::{RequestEncoder, Transport};
use crate::config::RefreshConfig;
use crate::domain::StationId;
use crate::output::{WriteError, reconcile, write_csv};
use crate::status::poll_statuses;

/// A run that produced no slim output.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Counts from a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Stations in the catalog.
    pub stations: usize,
    /// Stations for which a status was retrieved.
    pub statuses: usize,
    /// Rows in the slim output.
    pub rows_written: usize,
}

/// Run the full refresh against `transport`, writing both CSV artifacts
/// into the configured output directory.
///
/// Nothing is written if the catalog cannot be built. Status failures for
/// individual stations only leave those stations without status.
pub async fn run<T: Transport>(
    transport: &T,
    encoder: &RequestEncoder,
    config: &RefreshConfig,
) -> Result<RunSummary, RunError> {
    let catalog = build_catalog(
        transport,
        encoder,
        &config.search_area,
        &config.state_filter,
        config.page_size,
    )
    .await?;

    let stations_path = config.stations_path();
    write_csv(&stations_path, &catalog)?;
    info!(path = %stations_path.display(), rows = catalog.len(), "Wrote station cache");

    let ids: Vec<StationId> = catalog.iter().map(|s| s.station_id.clone()).collect();
    let statuses = poll_statuses(transport, encoder, &ids, config.status_concurrency).await;

    let rows = reconcile(&catalog, &statuses, Utc::now());
    let status_path = config.status_path();
    write_csv(&status_path, &rows)?;

    info!(
        stations = catalog.len(),
        statuses = statuses.len(),
        skipped_no_coordinates = catalog.len() - rows.len(),
        "Wrote {} with {} rows",
        status_path.display(),
        rows.len()
    );

    Ok(RunSummary {
        stations: catalog.len(),
        statuses: statuses.len(),
        rows_written: rows.len(),
    })
}
