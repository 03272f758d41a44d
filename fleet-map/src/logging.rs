//! Process-level diagnostics.
//!
//! Every event goes to stdout and, when it can be opened, to an append-only
//! log file next to the CSV outputs. A log file that cannot be opened or
//! written never fails the run.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber. Level comes from `RUST_LOG` (default `info`).
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(log_path: &Path) {
    let _ = subscriber(log_path).try_init();
}

/// Subscriber writing to stdout and appending to `log_path`.
fn subscriber(log_path: &Path) -> impl Subscriber + Send + Sync + 'static {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        let _ = std::fs::create_dir_all(parent);
    }

    let file_layer = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .ok()
        .map(|file| {
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file))
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stdout))
        .with(file_layer)
}
