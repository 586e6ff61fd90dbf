// Endpoint, scheduling and display constants

/// Path of the metrics endpoint, relative to the configured base URL
pub const METRICS_PATH: &str = "/api/metrics";

/// Base URL used when neither the CLI nor the config file names one
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080";

/// Poll period in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

/// Per-request timeout; a timed out fetch degrades like any network failure
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Marker shown for unknown or unavailable values
pub const UNAVAILABLE: &str = "—";

/// Bar width shown when the endpoint is unavailable
pub const EMPTY_BAR: &str = "0%";

pub const KIB: u64 = 1024;
pub const MIB: u64 = 1024 * 1024;

/// Config directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "heapdash";
pub const CONFIG_FILE_NAME: &str = "config.toml";
