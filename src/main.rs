mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use eden_core::config::EdenConfig;
use tracing_subscriber::EnvFilter;

use commands::Context;
use commands::add::EventFields;

#[derive(Parser)]
#[command(name = "eden")]
#[command(about = "View and edit the Eden Festival schedule")]
struct Cli {
    /// Directory holding the schedule and shared tags (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the public schedule
    Schedule {
        /// Keep running and re-render when the schedule changes
        #[arg(short, long)]
        watch: bool,
    },
    /// List events with their ids
    List,
    /// Add an event (prompts for anything missing)
    Add {
        #[command(flatten)]
        fields: EventFields,
    },
    /// Edit an event; fields not given keep their value
    Edit {
        id: String,

        #[command(flatten)]
        fields: EventFields,
    },
    /// Delete an event
    Delete {
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Replace the schedule with the built-in sample events
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the schedule as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also copy the JSON to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Replace the schedule with events from a JSON file ("-" for stdin)
    Apply { source: String },
    /// Manage the shared tag list
    Tags {
        #[command(subcommand)]
        command: TagCommands,
    },
    /// List start times, optionally filtered
    Times { query: Option<String> },
    /// Report schedule and tag changes made by other editors
    Watch,
}

#[derive(Subcommand)]
enum TagCommands {
    /// Show shared tags
    List,
    /// Add one or more shared tags
    Add {
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Rename a shared tag everywhere it is used
    Rename { old: String, new: String },
    /// Remove a shared tag from the list and from every event
    Remove {
        tag: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let mut config = EdenConfig::load()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let ctx = Context::new(config);

    match cli.command {
        Commands::Schedule { watch } => commands::schedule::run(&ctx, watch).await,
        Commands::List => commands::list::run(&ctx),
        Commands::Add { fields } => commands::add::run(&ctx, fields),
        Commands::Edit { id, fields } => commands::add::run_edit(&ctx, &id, fields),
        Commands::Delete { id, yes } => commands::delete::run(&ctx, &id, yes),
        Commands::Reset { yes } => commands::delete::run_reset(&ctx, yes),
        Commands::Export { output, copy } => {
            commands::transfer::export(&ctx, output.as_deref(), copy).await
        }
        Commands::Apply { source } => commands::transfer::apply(&ctx, &source),
        Commands::Tags { command } => match command {
            TagCommands::List => commands::tags::list(&ctx),
            TagCommands::Add { tags } => commands::tags::add(&ctx, &tags),
            TagCommands::Rename { old, new } => commands::tags::rename(&ctx, &old, &new),
            TagCommands::Remove { tag, yes } => commands::tags::remove(&ctx, &tag, yes),
        },
        Commands::Times { query } => commands::times::run(&ctx, query.as_deref()),
        Commands::Watch => commands::watch::run(&ctx).await,
    }
}

/// Log to stderr, filtered by `EDEN_LOG` (default: warnings and errors).
fn init_logging() {
    let filter = EnvFilter::try_from_env("EDEN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
