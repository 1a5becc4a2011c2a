//! Configuration management commands

use anyhow::{Context, bail};
use simetrics_core::config::load_from_file;
use simetrics_core::{
    DogStatsdConfig, LibratoConfig, Metrics, MetricsConfig, SinkKind, load_config,
};
use std::path::Path;

/// Show the resolved configuration with secrets masked
pub async fn show(config_file: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = config_file {
        if !path.exists() {
            eprintln!(
                "Configuration file not found: {} (using defaults)",
                path.display()
            );
        }
    }

    let config = load_config(config_file)?;
    println!("{}", serde_json::to_string_pretty(&config.redacted())?);
    Ok(())
}

/// Check that the configured backend is known and starts
pub async fn validate(config_file: &Path) -> anyhow::Result<()> {
    if !config_file.exists() {
        bail!("Configuration file not found: {}", config_file.display());
    }

    let config = load_from_file(config_file)
        .with_context(|| format!("Failed to load {}", config_file.display()))?;
    let Some(kind) = SinkKind::from_selector(&config.backend) else {
        bail!("Unknown backend '{}'", config.backend);
    };

    let metrics = Metrics::try_from_config(&config)
        .with_context(|| format!("Backend '{}' failed to start", kind.as_str()))?;
    metrics.shutdown();

    println!("Configuration is valid");
    println!("Backend: {}", kind.as_str());
    println!(
        "Flush period: {}",
        humantime::format_duration(config.effective_flush_period())
    );
    Ok(())
}

/// Write a default configuration file
pub async fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    let content = toml::to_string_pretty(&sample_config())
        .context("Failed to serialize configuration")?;
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Created configuration file: {}", path.display());
    Ok(())
}

fn sample_config() -> MetricsConfig {
    MetricsConfig {
        namespace_format: "%s.".to_string(),
        librato: Some(LibratoConfig::default()),
        dogstatsd: Some(DogStatsdConfig::default()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_writes_loadable_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("simetrics.toml");

        init(&path, false).await.unwrap();
        let loaded = load_from_file(&path).unwrap();
        assert_eq!(loaded, sample_config());
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("simetrics.toml");
        std::fs::write(&path, "backend = \"stdout\"\n").unwrap();

        assert!(init(&path, false).await.is_err());
        init(&path, true).await.unwrap();
        assert_eq!(load_from_file(&path).unwrap().backend, "none");
    }

    #[tokio::test]
    async fn test_validate() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("simetrics.toml");

        std::fs::write(&path, "backend = \"stdout\"\n").unwrap();
        assert!(validate(&path).await.is_ok());

        std::fs::write(&path, "backend = \"graphite\"\n").unwrap();
        assert!(validate(&path).await.is_err());

        std::fs::write(&path, "backend = \"librato\"\n").unwrap();
        assert!(validate(&path).await.is_err());

        assert!(validate(&temp_dir.path().join("missing.toml")).await.is_err());
    }
}
