//! Strix CLI — the main entry point.
//!
//! Commands:
//! - `init`    — Create config and a starter rule table
//! - `chat`    — Chat through the engine (interactive or one-shot)
//! - `task`    — Run one generative task directly
//! - `rules`   — Inspect a rule table
//! - `serve`   — Connect the Discord channel and serve
//! - `doctor`  — Diagnose configuration and backend health

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "strix",
    about = "Strix — rule-based + generative chat engine",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create configuration and a starter rule table
    Init,

    /// Chat through the engine (rules + generative tasks)
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,

        /// Rule table to load (overrides the configured path)
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },

    /// Run one generative task directly, bypassing trigger detection
    Task {
        /// Task kind: summarization, flashcards, or quiz
        kind: String,

        /// The text or topic to work on
        input: String,
    },

    /// Load a rule table and show what the engine would see
    Rules {
        /// Rule table to inspect (defaults to the configured path)
        file: Option<PathBuf>,
    },

    /// Connect the Discord channel and process messages until stopped
    Serve,

    /// Diagnose configuration, rule table, and backend health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init => commands::init::run().await?,
        Commands::Chat { message, rules } => commands::chat::run(message, rules).await?,
        Commands::Task { kind, input } => commands::task::run(&kind, &input).await?,
        Commands::Rules { file } => commands::rules::run(file).await?,
        Commands::Serve => commands::serve::run().await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
