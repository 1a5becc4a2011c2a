//! Default values used when configuration leaves a field unset

use std::time::Duration;

/// Backend selected when none is configured
pub const DEFAULT_BACKEND: &str = "none";

/// Default period for flushing sinks and sampling tracked variables
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(5);

/// Default address of a local DogStatsD agent
pub const DEFAULT_DOGSTATSD_ADDRESS: &str = "127.0.0.1:8125";

/// Source format that expands to the host name
pub const DEFAULT_SOURCE_FORMAT: &str = "%s";

/// Base URL of the Librato metrics API
pub const LIBRATO_API_URL: &str = "https://metrics-api.librato.com";

/// Timeout applied to each HTTP delivery request (30 seconds)
pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "SIMETRICS_";
