//! Tracing subscriber setup for applications embedding the library.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;
use crate::error::KitError;

/// Filter directives for a verbosity level.
pub fn filter_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,rmkit=info,rmkit_api=info,rmkit_federation=info",
        2 => "info,rmkit=debug,rmkit_api=debug,rmkit_federation=debug,rmkit_hooks=debug",
        _ => "debug,rmkit=trace,rmkit_api=trace,rmkit_federation=trace,rmkit_hooks=trace",
    }
}

/// Installs a global subscriber writing to stderr.
///
/// `RUST_LOG` overrides `verbosity`. Fails if a global subscriber is
/// already installed.
pub fn init_tracing(verbosity: u8, json: bool) -> Result<(), KitError> {
    let base_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| filter_for(verbosity).to_string());
    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    let result = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_file(verbosity >= 3)
                    .with_line_number(verbosity >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    };

    result.map_err(|e| KitError::Telemetry(e.to_string()))
}

/// [`init_tracing`] from a `[logging]` section.
pub fn init_from_config(config: &LoggingConfig) -> Result<(), KitError> {
    init_tracing(config.verbosity, config.json)
}
