//! Log subscriber setup for hosts embedding the runtime.
//!
//! Set `RUST_LOG` to control log levels (default: info) and
//! `CG_LOG_FORMAT=json` for JSON output.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log format mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable logs (default).
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Detect log format from environment.
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("CG_LOG_FORMAT").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Install the global subscriber using the environment's format.
///
/// Returns `false` if a subscriber was already installed.
pub fn init() -> bool {
    init_with_format(LogFormat::from_env())
}

/// Install the global subscriber with an explicit format.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_with_format(format: LogFormat) -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_target(true))
            .try_init(),
    };
    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(LogFormat::parse(""), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("text"), LogFormat::Pretty);
    }

    #[test]
    fn test_second_init_is_rejected() {
        init_with_format(LogFormat::Pretty);
        assert!(!init_with_format(LogFormat::Json));
    }
}
