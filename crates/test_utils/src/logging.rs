//! Test Logging Setup
//!
//! Installs a tracing subscriber once per test process so domain log output
//! shows up when a test fails. Controlled by `RUST_LOG`, defaulting to `warn`.

use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
});

/// Initializes tracing for tests. Safe to call from every test.
pub fn init_test_tracing() {
    Lazy::force(&TRACING);
}
