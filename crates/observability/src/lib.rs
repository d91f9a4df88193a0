//! Process-wide tracing setup shared by the storefront binary and its tests.

/// Initialize logging for the process.
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init() {
    tracing::init(LogFormat::from_env());
}

/// Subscriber configuration.
pub mod tracing;

pub use crate::tracing::LogFormat;
