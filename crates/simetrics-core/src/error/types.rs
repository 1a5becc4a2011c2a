//! Core error type for SiMetrics

use thiserror::Error;

/// Result type alias for SiMetrics operations
pub type MetricsResult<T> = Result<T, MetricsError>;

/// Main error type for SiMetrics
#[derive(Error, Debug, Clone)]
pub enum MetricsError {
    /// Configuration could not be read, parsed or applied
    #[error("Configuration error: {0}")]
    Config(String),

    /// A sink or backend failed to initialize
    #[error("Failed to initialize '{sink}' sink: {message}")]
    Init { sink: String, message: String },

    /// A backend could not deliver a batch
    #[error("Transmit error: {0}")]
    Transmit(String),

    /// HTTP request errors
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        status_code: Option<u16>,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(String),

    /// A JSON configuration file could not be parsed
    #[error("JSON error: {0}")]
    Json(String),

    /// A background task was requested outside of a Tokio runtime
    #[error("No Tokio runtime available to spawn '{0}'")]
    NoRuntime(String),

    /// The sink was already initialized once
    #[error("Sink '{0}' was already initialized")]
    AlreadyInitialized(String),
}

impl MetricsError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new sink initialization error
    pub fn init(sink: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Init {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a new transmit error
    pub fn transmit(message: impl Into<String>) -> Self {
        Self::Transmit(message.into())
    }

    /// Create a new HTTP error
    pub fn http(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self::Http {
            message: message.into(),
            status_code,
        }
    }

    /// Whether the error happened while constructing a sink or facade
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::Json(_)
                | Self::Init { .. }
                | Self::NoRuntime(_)
                | Self::AlreadyInitialized(_)
        )
    }
}
