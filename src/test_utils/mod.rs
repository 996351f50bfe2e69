//! Test utilities for stylescope
//!
//! Shared helpers for unit tests and the integration suite (enabled for the
//! latter through the `test-utils` feature).
//!
//! - [`init_test_logging`] - install a tracing subscriber once per process
//! - [`StyleFixture`] - a temporary project directory with stylesheet files

pub mod fixtures;

pub use fixtures::StyleFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. With `level` set that level is used;
/// otherwise `RUST_LOG` is honoured, and without either logging stays off.
///
/// # Example
///
/// ```rust,no_run
/// use tracing::Level;
///
/// stylescope::test_utils::init_test_logging(Some(Level::DEBUG));
/// ```
///
/// To enable logging in tests via environment variable:
/// ```bash
/// RUST_LOG=stylescope=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
