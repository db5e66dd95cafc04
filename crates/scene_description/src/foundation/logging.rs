//! Logging utilities

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Reads the filter from `RUST_LOG`. Calling it twice panics inside
/// `env_logger`, use [`try_init`] from code that may run more than once.
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system unless a logger is already installed
///
/// Returns true when this call installed the logger.
#[must_use]
pub fn try_init() -> bool {
    env_logger::try_init().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_try_init_reports_existing_logger() {
        let _first = try_init();
        assert!(!try_init());
    }
}
