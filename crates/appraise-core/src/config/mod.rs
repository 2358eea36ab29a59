use std::env;
use std::fmt;

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
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let cap_overachievement = match env::var("APP_CAP_OVERACHIEVEMENT") {
            Ok(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidCapFlag { value: raw })?,
            Err(_) => true,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringConfig {
                cap_overachievement,
            },
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Knobs for the scoring engine. `cap_overachievement` clamps
/// achievement ratios to [0, 1] so no item outearns its weight share.
#[derive(Debug, Clone, Copy)]
pub struct ScoringConfig {
    pub cap_overachievement: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidCapFlag { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCapFlag { value } => {
                write!(f, "APP_CAP_OVERACHIEVEMENT must be a boolean, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
