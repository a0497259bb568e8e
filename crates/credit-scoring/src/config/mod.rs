use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::assessment::ScoringConfig;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub assessment: AssessmentConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            assessment: AssessmentConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Artifact locations and scoring overrides.
#[derive(Debug, Clone)]
pub struct AssessmentConfig {
    pub journal_path: PathBuf,
    pub classifier: Option<ClassifierPaths>,
    pub categories_path: Option<PathBuf>,
    pub approval_threshold: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierPaths {
    pub model: PathBuf,
    pub features: PathBuf,
}

impl AssessmentConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let journal_path = env::var("CREDIT_JOURNAL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("credit_requests.json"));

        let classifier = match (
            non_empty_var("CREDIT_MODEL_PATH"),
            non_empty_var("CREDIT_FEATURES_PATH"),
        ) {
            (Some(model), Some(features)) => Some(ClassifierPaths {
                model: PathBuf::from(model),
                features: PathBuf::from(features),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteClassifier),
        };

        let approval_threshold = non_empty_var("CREDIT_APPROVAL_THRESHOLD")
            .map(|raw| {
                raw.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or(ConfigError::InvalidThreshold)
            })
            .transpose()?;

        Ok(Self {
            journal_path,
            classifier,
            categories_path: non_empty_var("CREDIT_CATEGORIES_PATH").map(PathBuf::from),
            approval_threshold,
        })
    }

    pub fn scoring_config(&self) -> ScoringConfig {
        let mut config = ScoringConfig::default();
        if let Some(threshold) = self.approval_threshold {
            config.approval_threshold = threshold;
        }
        config
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThreshold,
    IncompleteClassifier,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold => {
                write!(f, "CREDIT_APPROVAL_THRESHOLD must be a finite number")
            }
            ConfigError::IncompleteClassifier => write!(
                f,
                "CREDIT_MODEL_PATH and CREDIT_FEATURES_PATH must be set together"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidThreshold
            | ConfigError::IncompleteClassifier => None,
        }
    }
}
