//! Framecast CLI binary.
//!
//! This binary provides command-line access to Framecast:
//! - Generate an illustrated storyboard from an idea
//! - Parse an existing storyboard script into scenes
//! - Show the resolved configuration

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, generate_storyboard, parse_script, show_config};

    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let settings = cli::settings_source(cli.config.as_deref());

    match cli.command {
        Commands::Generate(args) => generate_storyboard(args, settings).await?,
        Commands::Parse { file, pretty } => parse_script(&file, pretty)?,
        Commands::Config => show_config(settings.as_ref())?,
    }

    Ok(())
}
