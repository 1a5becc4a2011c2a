//! Configuration for SiMetrics
//!
//! Configuration is resolved in layers:
//! 1. Built-in defaults
//! 2. A JSON, TOML or YAML file (optional)
//! 3. `SIMETRICS_*` environment variables

pub mod defaults;
mod env_loader;
mod file_loader;
mod loader;
mod model;

pub use env_loader::{apply_env_overrides, apply_env_overrides_from};
pub use file_loader::load_from_file;
pub use loader::load_config;
pub use model::{DogStatsdConfig, LibratoConfig, MetricsConfig};
