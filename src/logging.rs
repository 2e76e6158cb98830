//! Global `tracing` subscriber setup.
//!
//! Logs go to stderr so stdout stays clean for reports. The terminal UI owns
//! the screen, so it runs with console logging off.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::AppError;

pub const DEFAULT_FILTER: &str = "warn";

/// Pick the filter directive: `--log`, then `PE_LOG`, then `RUST_LOG`, then `warn`.
pub fn resolve_filter(flag: Option<&str>, pe_log: Option<&str>, rust_log: Option<&str>) -> String {
    [flag, pe_log, rust_log]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Install the subscriber. With `console == false` nothing is installed and
/// every event is dropped.
///
/// A second call keeps the first subscriber.
pub fn init(filter: &str, console: bool) -> Result<(), AppError> {
    let env_filter =
        EnvFilter::try_new(filter).map_err(|e| AppError::usage(format!("Invalid log filter '{filter}': {e}")))?;
    if !console {
        return Ok(());
    }

    let fmt_layer = layer().compact().with_writer(std::io::stderr).with_target(false);
    let _ = tracing_subscriber::registry().with(env_filter).with(fmt_layer).try_init();
    Ok(())
}
