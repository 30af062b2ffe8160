//! Logging setup.
//!
//! Events go to stderr so JSON on stdout stays machine-readable. The filter
//! comes from `SMARTSTUDY_LOG` when set, otherwise from the `-v` count.

use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::EnvFilter;

use crate::error::StudyError;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "SMARTSTUDY_LOG";

/// Default filter for a given `-v` count.
#[must_use]
pub const fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if a subscriber is already installed.
pub fn init(verbosity: u8) -> Result<(), StudyError> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| StudyError::Config(format!("failed to init tracing subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(1), "info");
        assert_eq!(default_directive(2), "debug");
        assert_eq!(default_directive(9), "debug");
    }
}
