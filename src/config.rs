//! Runtime configuration, sourced from the process environment.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// Environment values could not be deserialized into the typed config.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "Failed to parse config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Application environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        })
    }
}

impl<'de> Deserialize<'de> for Environment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap())
    }
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Application configuration.
///
/// Absent variables fall back to the defaults below; absence of
/// configuration is never a failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub mongo_uri: String,
    pub request_timeout_secs: u64,
    /// CORS allowed origins. Empty means every origin is allowed.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            host: "0.0.0.0".to_string(),
            port: 5000,
            mongo_uri: "mongodb://mongo:27017/mern".to_string(),
            request_timeout_secs: 30,
            cors_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// A `.env` file in the working directory is applied first when present.
    /// Variable names map to fields by lowercasing (`MONGO_URI`, `PORT`,
    /// `HOST`, ...); `APP_ENV` is an alias for `ENVIRONMENT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        config::Config::builder()
            .add_source(EnvSource)
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Environment source that also maps APP_ENV to the environment field.
#[derive(Debug, Clone)]
struct EnvSource;

impl config::Source for EnvSource {
    fn clone_into_box(&self) -> Box<dyn config::Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<config::Map<String, config::Value>, config::ConfigError> {
        use config::{Value, ValueKind};

        let mut map = config::Environment::default()
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("cors_origins")
            .collect()?;

        if !map.contains_key("environment") {
            if let Ok(val) = env::var("APP_ENV") {
                map.insert(
                    "environment".to_string(),
                    Value::new(None, ValueKind::String(val)),
                );
            }
        }

        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_from_str() {
        assert_eq!(
            "production".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!(
            "PROD".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!(
            "development".parse::<Environment>().unwrap(),
            Environment::Development
        );
        assert_eq!(
            "anything".parse::<Environment>().unwrap(),
            Environment::Development
        );
    }

    #[test]
    fn environment_is_methods() {
        assert!(Environment::Production.is_production());
        assert!(!Environment::Production.is_development());
        assert!(Environment::Development.is_development());
        assert!(!Environment::Development.is_production());
    }

    #[test]
    fn app_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.mongo_uri, "mongodb://mongo:27017/mern");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.cors_origins.is_empty());
        assert!(config.environment.is_development());
    }

    #[test]
    fn app_config_addr() {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Default::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn app_config_request_timeout() {
        let config = AppConfig {
            request_timeout_secs: 60,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn from_env_prefers_environment_values() {
        env::set_var("PORT", "8123");
        env::set_var("MONGO_URI", "mongodb://localhost:27017/other");
        env::set_var("APP_ENV", "production");

        let config = AppConfig::from_env().unwrap();

        env::remove_var("PORT");
        env::remove_var("MONGO_URI");
        env::remove_var("APP_ENV");

        assert_eq!(config.port, 8123);
        assert_eq!(config.mongo_uri, "mongodb://localhost:27017/other");
        assert!(config.environment.is_production());
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::Parse("invalid syntax".to_string());
        assert!(err.to_string().contains("invalid syntax"));
    }
}
