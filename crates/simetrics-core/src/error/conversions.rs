//! Conversions from third-party errors into `MetricsError`

use super::types::MetricsError;

impl From<std::io::Error> for MetricsError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for MetricsError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}

impl From<reqwest::Error> for MetricsError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http {
            message: error.to_string(),
            status_code: error.status().map(|s| s.as_u16()),
        }
    }
}

impl From<toml::de::Error> for MetricsError {
    fn from(error: toml::de::Error) -> Self {
        Self::Config(format!("Failed to parse TOML config: {}", error))
    }
}

impl From<serde_yaml::Error> for MetricsError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::Config(format!("Failed to parse YAML config: {}", error))
    }
}

impl From<humantime::DurationError> for MetricsError {
    fn from(error: humantime::DurationError) -> Self {
        Self::Config(format!("Invalid duration: {}", error))
    }
}
