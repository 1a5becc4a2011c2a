//! Layered configuration loading

use super::env_loader::apply_env_overrides;
use super::file_loader::load_from_file;
use super::model::MetricsConfig;
use crate::error::MetricsResult;
use std::path::Path;
use tracing::debug;

/// Load defaults, then the file at `path` (if any), then environment overrides
pub fn load_config(path: Option<&Path>) -> MetricsResult<MetricsConfig> {
    let mut config = match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading metrics configuration");
            load_from_file(path)?
        }
        None => MetricsConfig::default(),
    };
    apply_env_overrides(&mut config)?;
    Ok(config)
}
