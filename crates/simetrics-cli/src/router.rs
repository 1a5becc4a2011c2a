//! Command routing

use crate::args::{Cli, Commands, ConfigAction};
use crate::commands;

pub async fn route(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Run(args) => commands::run::execute(args).await,
        Commands::Config { action } => match action {
            ConfigAction::Show { config } => commands::config::show(config.as_deref()).await,
            ConfigAction::Validate { config } => commands::config::validate(&config).await,
            ConfigAction::Init { path, force } => commands::config::init(&path, force).await,
        },
    }
}
