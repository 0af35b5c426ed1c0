//! Tracing subscriber setup.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Parse a filter directive string such as `"info,constellation_viewer=debug"`.
pub fn parse_filter(directives: &str) -> Result<EnvFilter, LoggingError> {
    Ok(EnvFilter::try_new(directives)?)
}

/// Filter from `env_directives` when they parse, otherwise from `default_filter`.
pub fn select_filter(
    env_directives: Option<&str>,
    default_filter: &str,
) -> Result<EnvFilter, LoggingError> {
    match env_directives
        .filter(|d| !d.trim().is_empty())
        .map(EnvFilter::try_new)
    {
        Some(Ok(filter)) => Ok(filter),
        _ => parse_filter(default_filter),
    }
}

/// Install the global fmt subscriber. `RUST_LOG` takes precedence over `default_filter`.
pub fn init(default_filter: &str) -> Result<(), LoggingError> {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = select_filter(env_directives.as_deref(), default_filter)?;

    let active = filter.to_string();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;

    tracing::debug!(filter = %active, "Tracing initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_level_and_target_directives() {
        assert!(parse_filter("info").is_ok());
        assert!(parse_filter("warn,constellation_viewer=debug").is_ok());
    }

    #[test]
    fn environment_directives_win_over_default() {
        let filter = select_filter(Some("constellation_viewer=trace"), "info").unwrap();
        assert_eq!(filter.to_string(), "constellation_viewer=trace");
    }

    #[test]
    fn default_used_without_environment() {
        let filter = select_filter(None, "warn").unwrap();
        assert_eq!(filter.to_string(), "warn");

        let blank = select_filter(Some("  "), "warn").unwrap();
        assert_eq!(blank.to_string(), "warn");
    }
}
