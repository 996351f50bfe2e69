//! Global constants used throughout the stylescope codebase.
//!
//! Cache sizes, timeouts and fixed names that are shared across modules.
//! Defining them centrally keeps the defaults discoverable and lets the
//! configuration layer refer to a single source for each value.

use std::time::Duration;

/// Default capacity of the per-document region model cache.
///
/// One entry is kept per open markup document; the least recently accessed
/// entry is evicted once the cache grows past this size.
pub const DEFAULT_MODEL_CACHE_ENTRIES: usize = 30;

/// Default idle time after which a cached region model is swept (120 seconds).
pub fn default_model_ttl() -> Duration {
    Duration::from_secs(120)
}

/// Default timeout for reading one stylesheet from disk (5 seconds).
///
/// Import walks read files that are not open in the editor; a stalled network
/// mount must not block unrelated requests indefinitely.
pub fn default_read_timeout() -> Duration {
    Duration::from_secs(5)
}

/// Maximum number of distinct dialects reported for one composite document.
pub const MAX_DIALECTS_PER_DOCUMENT: usize = 3;

/// Directory consulted for package-style imports, relative to the project root.
pub const PACKAGE_DIR: &str = "node_modules";

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "stylescope.toml";

/// File extensions (with dot) collected when a global-style entry is a directory.
pub const STYLE_EXTENSIONS: &[&str] = &[".css", ".pcss", ".postcss", ".less", ".scss", ".sass"];
