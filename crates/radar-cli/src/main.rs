mod fetch;
mod report;

use clap::{CommandFactory, Parser, Subcommand};
use radar_core::DataSource;
use tracing_subscriber::EnvFilter;

use crate::fetch::FetchArgs;

#[derive(Debug, Parser)]
#[command(name = "radar-cli")]
#[command(about = "LLM Radar brand visibility command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch mentions, share of voice, history, and SEO metrics for the configured brands
    Fetch(FetchArgs),
    /// List the supported data sources
    Sources,
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run(Cli::parse()).await
}

/// Dispatches a parsed command. Configuration is loaded only by commands
/// that talk to the API.
async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Fetch(args)) => {
            let config = radar_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            fetch::run_fetch(&config, args).await?;
        }
        Some(Commands::Sources) => {
            for source in DataSource::ALL {
                println!("{:<22}{}", source.as_str(), source.label());
            }
        }
        None => Cli::command().print_help()?,
    }

    Ok(())
}
