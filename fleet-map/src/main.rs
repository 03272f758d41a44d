use std::process::ExitCode;

use fleet_map::chargepoint::{RequestEncoder, SoapClient};
use fleet_map::config::{Credentials, RefreshConfig};
use fleet_map::{logging, pipeline};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let config = RefreshConfig::from_env();
    logging::init(&config.log_path());

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!(error = %e, "Cannot start refresh");
            return ExitCode::FAILURE;
        }
    };

    let client = match SoapClient::new(config.soap_client_config()) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to create ChargePoint client");
            return ExitCode::FAILURE;
        }
    };
    let encoder = RequestEncoder::new(credentials);

    info!(
        endpoint = %config.endpoint,
        output_dir = %config.output_dir().display(),
        "Starting ChargePoint refresh"
    );

    match pipeline::run(&client, &encoder, &config).await {
        Ok(summary) => {
            info!(
                stations = summary.stations,
                statuses = summary.statuses,
                rows = summary.rows_written,
                "Refresh complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Refresh failed");
            ExitCode::FAILURE
        }
    }
}
