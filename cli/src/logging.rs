//! # Structured Logging
//!
//! Installs the global `tracing` subscriber for the `didseed` binary. The
//! format is chosen with `--log-format` and the filter comes from `RUST_LOG`,
//! falling back to `--log-level`.
//!
//! All log output is written to stderr so that stdout carries nothing but the
//! JSON result and can be piped straight into `jq`.

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, colored output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Pick the filter directives: `RUST_LOG` when set and non-empty, the
/// `--log-level` value otherwise. Malformed directives are an error rather
/// than silently dropped.
pub fn build_filter(from_env: Option<&str>, default_directives: &str) -> Result<EnvFilter> {
    match from_env.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid {} filter '{directives}'", EnvFilter::DEFAULT_ENV)),
        None => EnvFilter::try_new(default_directives)
            .with_context(|| format!("invalid --log-level filter '{default_directives}'")),
    }
}

/// Install the global tracing subscriber.
///
/// ```text
/// RUST_LOG=didseed=debug,didseed_cli=info didseed create --log-format json
/// ```
pub fn init_logging(default_directives: &str, format: LogFormat) -> Result<()> {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(from_env.as_deref(), default_directives)?;
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(false),
            )
            .try_init(),
    }
    .context("tracing subscriber already installed")?;

    tracing::debug!(?format, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names() {
        assert_eq!(LogFormat::from_str("json", true).unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("PRETTY", true).unwrap(), LogFormat::Pretty);
        assert!(LogFormat::from_str("yaml", true).is_err());
        assert_eq!(LogFormat::default(), LogFormat::Pretty);
    }

    #[test]
    fn env_directives_win() {
        let filter = build_filter(Some("didseed=debug"), "warn").unwrap();
        assert_eq!(filter.to_string(), "didseed=debug");

        let filter = build_filter(Some("  "), "warn").unwrap();
        assert_eq!(filter.to_string(), "warn");

        let filter = build_filter(None, "info").unwrap();
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn malformed_directives_are_rejected() {
        assert!(build_filter(None, "didseed=loud").is_err());
        assert!(build_filter(Some("didseed=loud"), "warn").is_err());
    }
}
