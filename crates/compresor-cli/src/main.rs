//! Compresor CLI - file-based front end for the compressor engine.

mod commands;
mod preset;
mod wav;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "compresor")]
#[command(author, version, about = "Feed-forward audio compressor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a WAV file
    Process(commands::process::ProcessArgs),

    /// Display WAV file information
    Info(commands::info::InfoArgs),

    /// List the compressor parameters and their ranges
    Params(commands::params::ParamsArgs),
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Params(args) => commands::params::run(args),
    }
}
