//! One-shot tracing setup for test binaries.
//!
//! Level precedence: `TEST_LOG`, then `RUST_LOG`, then `warn`. Output goes
//! through the libtest writer so it is captured per test.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Install the test subscriber. Safe to call from every test and from `ctor` hooks.
pub fn init() {
    INSTALLED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        // Another harness may already own the global subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(true)
            .try_init();
    });
}
