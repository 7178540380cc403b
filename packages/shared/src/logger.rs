//! Logging setup utilities for the Genkan binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive used when `RUST_LOG` is not set.
///
/// Every crate in `crate_names` and the binary itself are enabled at
/// `default_log_level`; everything else (axum, hyper, tungstenite, ...) stays at
/// its own default.
pub fn default_directive(binary_name: &str, crate_names: &[&str], default_log_level: &str) -> String {
    crate_names
        .iter()
        .map(|name| name.replace('-', "_"))
        .chain(std::iter::once(binary_name.replace('-', "_")))
        .map(|target| format!("{}={}", target, default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "genkan-server")
/// * `crate_names` - Library crates whose logs should be shown
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use genkan_shared::logger::setup_logger;
///
/// setup_logger("genkan-server", &["genkan-server", "tower-http"], "debug");
/// ```
pub fn setup_logger(binary_name: &str, crate_names: &[&str], default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                default_directive(binary_name, crate_names, default_log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
