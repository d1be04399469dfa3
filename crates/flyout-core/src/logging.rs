#![forbid(unsafe_code)]

//! Logging bootstrap and tracing re-exports.
//!
//! Library crates emit `tracing` events; hosts decide where they go. With the
//! `tracing-json` feature, [`init_json`] installs a JSON formatter filtered by
//! the `FLYOUT_LOG` environment variable (default `warn`).

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Environment variable holding the `EnvFilter` directive.
pub const LOG_ENV: &str = "FLYOUT_LOG";

/// Install a global JSON subscriber.
///
/// Returns `false` if a global subscriber was already set.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
