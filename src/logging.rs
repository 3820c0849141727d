//! Logging initialization.

use std::{env, str::FromStr};

use crate::config::Environment;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        })
    }
}

impl LogFormat {
    /// `LOG_FORMAT` wins when set; production defaults to JSON.
    fn for_environment(environment: Environment) -> Self {
        match env::var("LOG_FORMAT").ok().and_then(|s| s.parse().ok()) {
            Some(format) => format,
            None if environment.is_production() => Self::Json,
            None => Self::Text,
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init_logging(environment: Environment) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = match LogFormat::for_environment(environment) {
        LogFormat::Text => fmt().with_env_filter(env_filter).try_init(),
        LogFormat::Json => fmt()
            .json()
            .with_current_span(false)
            .with_env_filter(env_filter)
            .try_init(),
    };
}
