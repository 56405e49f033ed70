//! Keyroute CLI - drive the keyboard and control routers from the terminal.

mod commands;
mod script;
mod session;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "keyroute")]
#[command(author, version, about = "Keyroute keyboard and control router CLI", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an event script through the routers
    Replay(commands::replay::ReplayArgs),

    /// Read events from stdin, one per line
    Play(commands::play::PlayArgs),

    /// List controls, switches, and selectors
    Controls(commands::controls::ControlsArgs),

    /// Write a binding table as TOML
    Export(commands::export::ExportArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Replay(args) => commands::replay::run(args),
        Commands::Play(args) => commands::play::run(args),
        Commands::Controls(args) => commands::controls::run(args),
        Commands::Export(args) => commands::export::run(args),
    }
}
