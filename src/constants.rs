//! Fixed upstream URLs and on-disk layout. None of these are runtime input.

pub const MAIN_DOC_URL: &str = "https://docs.python.org/3/";
pub const PEP_LIST_URL: &str = "https://peps.python.org/";

/// Timestamp format used in CSV result file names.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

pub const CACHE_PATH: &str = "data/http_cache.sqlite";
pub const DOWNLOADS_DIR: &str = "downloads";
pub const RESULTS_DIR: &str = "results";

/// Sentinel for PEP status codes missing from the expected-status table.
pub const UNKNOWN_VALUE: &str = "Unknown";
