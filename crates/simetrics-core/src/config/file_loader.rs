//! File-based configuration loading

use super::model::MetricsConfig;
use crate::error::{MetricsError, MetricsResult};
use std::fs;
use std::path::Path;

/// Load configuration from a file
///
/// Supports JSON, TOML, and YAML formats based on file extension.
/// Returns default config if file doesn't exist.
pub fn load_from_file(path: &Path) -> MetricsResult<MetricsConfig> {
    if !path.exists() {
        return Ok(MetricsConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        MetricsError::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let config: MetricsConfig = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(&content)?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        _ => serde_json::from_str(&content)?,
    };

    Ok(config)
}
