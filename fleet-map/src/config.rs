//! Run configuration and credentials.
//!
//! The job is meant to run unattended (e.g. from a scheduled CI workflow),
//! so nothing here is a command-line flag: search parameters are fixed
//! defaults, and only credentials and the output directory come from the
//! environment.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::chargepoint::{DEFAULT_ENDPOINT, SoapClientConfig};

/// Environment variable holding the API username.
pub const USERNAME_VAR: &str = "CP_USERNAME";
/// Environment variable holding the API password.
pub const PASSWORD_VAR: &str = "CP_PASSWORD";
/// Environment variable overriding the output directory.
pub const OUTPUT_DIR_VAR: &str = "FLEETMAP_OUTPUT_DIR";
/// Checkout path set by GitHub Actions; used when no override is given.
const WORKSPACE_VAR: &str = "GITHUB_WORKSPACE";

/// Slim CSV consumed by the map.
pub const STATUS_FILE: &str = "status_latest_slim.csv";
/// Full per-station cache CSV.
pub const STATIONS_FILE: &str = "stations_per_station_slim.csv";
/// Append-only run log.
pub const LOG_FILE: &str = "chargepoint_refresh.log";

/// Configuration errors detected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required credential variable is unset or empty
    #[error("missing {0} environment variable; set CP_USERNAME and CP_PASSWORD")]
    MissingCredential(&'static str),
}

/// ChargePoint API credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read credentials from `CP_USERNAME` / `CP_PASSWORD`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through an arbitrary variable lookup.
    ///
    /// Unset and empty values are both rejected.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let fetch = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingCredential(name))
        };
        Ok(Self::new(fetch(USERNAME_VAR)?, fetch(PASSWORD_VAR)?))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Geographic footprint of the station search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchArea {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_miles: u32,
}

impl Default for SearchArea {
    /// 100 miles around New York City.
    fn default() -> Self {
        Self {
            latitude: 40.7128,
            longitude: -74.0060,
            radius_miles: 100,
        }
    }
}

/// Parameters for one refresh run.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// ChargePoint SOAP endpoint.
    pub endpoint: String,

    /// Search center and radius.
    pub search_area: SearchArea,

    /// Jurisdiction filter sent with the search (e.g. `"NY"`).
    pub state_filter: String,

    /// Records requested per `getStations` page.
    pub page_size: usize,

    /// Maximum status requests in flight at once.
    pub status_concurrency: usize,

    /// Per-request HTTP timeout in seconds.
    pub http_timeout_secs: u64,

    /// Attempts per request before it counts as failed.
    pub http_attempts: u32,

    /// First retry delay; doubles on each further failure.
    pub retry_backoff: Duration,

    /// Directory receiving the CSV artifacts and the log file.
    pub output_dir: PathBuf,
}

impl RefreshConfig {
    /// Create a config writing into `output_dir`, with default search settings.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            search_area: SearchArea::default(),
            state_filter: "NY".to_string(),
            page_size: 500,
            status_concurrency: 20,
            http_timeout_secs: 60,
            http_attempts: 3,
            retry_backoff: Duration::from_secs(1),
            output_dir: output_dir.into(),
        }
    }

    /// Config for a scheduled run: output goes to `FLEETMAP_OUTPUT_DIR`,
    /// else `GITHUB_WORKSPACE`, else the current directory.
    pub fn from_env() -> Self {
        let output_dir = [OUTPUT_DIR_VAR, WORKSPACE_VAR]
            .iter()
            .filter_map(|name| std::env::var_os(name))
            .find(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(output_dir)
    }

    /// Set a custom endpoint (for testing).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the search area.
    pub fn with_search_area(mut self, area: SearchArea) -> Self {
        self.search_area = area;
        self
    }

    /// Set the page size for station search.
    pub fn with_page_size(mut self, n: usize) -> Self {
        self.page_size = n;
        self
    }

    /// Set the status polling concurrency.
    pub fn with_status_concurrency(mut self, n: usize) -> Self {
        self.status_concurrency = n;
        self
    }

    /// Set the retry back-off base.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Path of the slim status CSV.
    pub fn status_path(&self) -> PathBuf {
        self.output_dir.join(STATUS_FILE)
    }

    /// Path of the full station cache CSV.
    pub fn stations_path(&self) -> PathBuf {
        self.output_dir.join(STATIONS_FILE)
    }

    /// Path of the run log.
    pub fn log_path(&self) -> PathBuf {
        self.output_dir.join(LOG_FILE)
    }

    /// Output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Transport settings derived from this config.
    pub fn soap_client_config(&self) -> SoapClientConfig {
        SoapClientConfig::new(&self.endpoint)
            .with_timeout(self.http_timeout_secs)
            .with_max_attempts(self.http_attempts)
            .with_backoff(self.retry_backoff)
    }
}
