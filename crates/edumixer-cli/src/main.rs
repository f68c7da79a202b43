//! edumixer CLI - drive the teaching console from the terminal.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "edumixer")]
#[command(author, version, about = "Four-channel teaching console", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute one set of meter levels for a scene
    Levels(commands::levels::LevelsArgs),

    /// Show the tone parameters a scene maps to
    Map(commands::map::MapArgs),

    /// Run the console live at the tick rate
    Run(commands::run::RunArgs),

    /// Render a scene through the reference synth to a WAV file
    Render(commands::render::RenderArgs),

    /// List the factory scenes
    Scenes(commands::scenes::ScenesArgs),

    /// Check a scene or session file
    Validate(commands::validate::ValidateArgs),

    /// List audio output devices
    Devices,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Levels(args) => commands::levels::run(args),
        Commands::Map(args) => commands::map::run(args),
        Commands::Run(args) => commands::run::run(args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Scenes(args) => commands::scenes::run(args),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Devices => commands::devices::run(),
    }
}
