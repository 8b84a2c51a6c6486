pub mod cache;
pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod retry;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Commands, cmd_list_saved, cmd_remove_trip, cmd_save_trip, cmd_search_trips,
    cmd_show_trip,
};
pub use config::Config;
use config::LogFormat;
use state::SharedState;

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    // Logs go to stderr so command output stays pipeable.
    match config.general.log_format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&config);

    if matches!(cli.command, Commands::Init) {
        if Config::create_default_if_missing()? {
            println!("✓ Config file created. Edit config.toml and run again.");
        } else {
            println!("config.toml already exists.");
        }
        return Ok(());
    }

    config.validate()?;

    let state = SharedState::new(config).await?;
    info!("tripfinder v{} ready", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Search {
            origin,
            destination,
            sort,
        } => cmd_search_trips(&state, &origin, &destination, sort).await,

        Commands::Save {
            id,
            origin,
            destination,
        } => cmd_save_trip(&state, &id, &origin, &destination).await,

        Commands::Saved { limit, offset } => cmd_list_saved(&state, limit, offset).await,

        Commands::Show { id } => cmd_show_trip(&state, &id).await,

        Commands::Remove { id } => cmd_remove_trip(&state, &id).await,

        Commands::Init => Ok(()),
    }
}
