//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Default configuration file name used across all CLI commands.
pub const DEFAULT_CONFIG_FILE: &str = "simetrics.toml";

/// Upper bound for `run --rate`, keeping the tick period above zero
pub const MAX_RATE: i64 = 1_000_000;

#[derive(Parser, Debug)]
#[command(name = "simetrics")]
#[command(about = "SiMetrics - application-side metrics with pluggable backends")]
#[command(version)]
pub struct Cli {
    /// Log filter directive, e.g. `info` or `simetrics_core=debug` (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Emit a synthetic workload through the configured backend
    Run(RunArgs),

    /// Manage configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (JSON, TOML or YAML)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Backend selector, overriding the configuration
    #[arg(long, short)]
    pub backend: Option<String>,

    /// How long to run, e.g. `30s` or `2m`
    #[arg(long, default_value = "30s", value_parser = humantime::parse_duration)]
    pub duration: Duration,

    /// Simulated requests per second (1 to 1000000)
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..=MAX_RATE))]
    pub rate: u32,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Display the resolved configuration (file plus environment)
    Show {
        /// Path to configuration file
        #[arg(long, short)]
        config: Option<PathBuf>,
    },

    /// Check that a configuration selects a backend that can start
    Validate {
        /// Path to configuration file
        #[arg(long, short, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },

    /// Create a new configuration file with defaults
    Init {
        /// Path for the new configuration file
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::run::tick_period;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "simetrics",
            "run",
            "--backend",
            "stdout",
            "--duration",
            "1m 30s",
            "--rate",
            "5",
        ])
        .unwrap();

        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.backend.as_deref(), Some("stdout"));
                assert_eq!(args.duration, Duration::from_secs(90));
                assert_eq!(args.rate, 5);
                assert!(args.config.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_run_defaults() {
        let cli = Cli::try_parse_from(["simetrics", "run"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.duration, Duration::from_secs(30));
        assert_eq!(args.rate, 20);
    }

    #[test]
    fn test_parse_config_init() {
        let cli =
            Cli::try_parse_from(["simetrics", "--log-level", "debug", "config", "init", "--force"])
                .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Commands::Config {
                action: ConfigAction::Init { path, force },
            } => {
                assert_eq!(path, PathBuf::from(DEFAULT_CONFIG_FILE));
                assert!(force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rate_bounds() {
        assert!(Cli::try_parse_from(["simetrics", "run", "--rate", "0"]).is_err());
        assert!(Cli::try_parse_from(["simetrics", "run", "--rate", "4000000000"]).is_err());
        assert!(Cli::try_parse_from(["simetrics", "run", "--rate", "1000001"]).is_err());

        let cli = Cli::try_parse_from(["simetrics", "run", "--rate", "1000000"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert!(!tick_period(args.rate).is_zero());
    }

    #[test]
    fn test_invalid_duration_rejected() {
        assert!(Cli::try_parse_from(["simetrics", "run", "--duration", "soon"]).is_err());
    }
}
