//! Structured logging configuration.
//!
//! The engine logs through the `log` facade; the subscriber installed here
//! picks those records up alongside the desk's own `tracing` events.

use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// Levels are configurable via the RUST_LOG env var (default: `info`).
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Log how long a desk command took
pub fn log_command(command: &str, elapsed: Duration) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    if duration_ms > 1000 {
        tracing::warn!(command, duration_ms, "Slow command");
    } else {
        tracing::debug!(command, duration_ms, "Command completed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_command() {
        // Just ensure it doesn't panic
        log_command("list", Duration::from_millis(5));
        log_command("import", Duration::from_secs(2));
    }
}
