//! Tracing and logging setup shared by the binaries.

/// Subscriber configuration (filters, output format).
pub mod logging;

pub use logging::{LogFormat, LogFormatError, ENV_LOG_FORMAT};

/// Initialize process-wide logging from the environment.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    logging::init();
}
