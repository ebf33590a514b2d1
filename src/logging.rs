//! Logging initialization and configuration.
//!
//! Logs go to stderr so command output on stdout stays clean.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither config nor `RUST_LOG` sets one.
pub const DEFAULT_FILTER: &str = "wallet_shell=warn";

fn filter_for(directive: Option<&str>) -> EnvFilter {
    match directive {
        Some(d) if !d.trim().is_empty() => {
            EnvFilter::try_new(expand(d)).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        }
        _ => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// Scope a bare level such as `debug` to this crate.
fn expand(directive: &str) -> String {
    let d = directive.trim();
    if matches!(
        d.to_ascii_lowercase().as_str(),
        "error" | "warn" | "info" | "debug" | "trace" | "off"
    ) {
        format!("wallet_shell={}", d.to_ascii_lowercase())
    } else {
        d.to_string()
    }
}

/// Initialize the logging system.
///
/// `directive` is a level (`debug`) or a full filter directive
/// (`wallet_shell=debug,tokio=info`). When absent, `RUST_LOG` is used,
/// then [`DEFAULT_FILTER`].
///
/// # Panics
///
/// Panics if called more than once, or if another tracing subscriber
/// has already been set.
pub fn init(directive: Option<&str>) {
    tracing_subscriber::registry()
        .with(filter_for(directive))
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Try to initialize the logging system.
///
/// Returns `Ok(())` if successful, or `Err` if logging has already been
/// initialized.
pub fn try_init(directive: Option<&str>) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(filter_for(directive))
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_bare_level() {
        assert_eq!(expand("debug"), "wallet_shell=debug");
        assert_eq!(expand(" INFO "), "wallet_shell=info");
    }

    #[test]
    fn test_expand_keeps_directives() {
        assert_eq!(expand("wallet_shell=trace,tokio=info"), "wallet_shell=trace,tokio=info");
    }

    #[test]
    fn test_default_matches_config_level() {
        let level = crate::config::Config::default().log_filter().to_string();
        assert_eq!(expand(&level), DEFAULT_FILTER);
    }

    #[test]
    fn test_try_init_idempotent() {
        let _ = try_init(Some("debug"));
        let _ = try_init(None);
    }

    #[test]
    fn test_logging_works() {
        let _ = try_init(None);

        tracing::info!("test info message");
        tracing::debug!("test debug message");
        tracing::warn!("test warn message");
        tracing::error!("test error message");
    }
}
