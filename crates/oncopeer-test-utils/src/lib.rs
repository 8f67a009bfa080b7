//! Shared fixtures and assertion helpers for Oncopeer tests.

pub mod fixtures;
pub mod sameness;

pub use sameness::{assert_same_lists, same_key_to_list_maps, same_lists};

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber for test output. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("oncopeer=debug,info")),
        )
        .with_test_writer()
        .try_init();
}
