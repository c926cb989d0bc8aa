//! Trellis CLI - Command line interface for the trellis graph

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod output;
mod store;

use commands::{completions, graph, item, link, traverse};

#[derive(Parser)]
#[command(name = "trellis")]
#[command(author, version, about = "Directed typed multigraph with exhaustive path traversal")]
pub struct Cli {
    /// Graph file (JSON)
    #[arg(short = 'f', long, global = true)]
    pub file: Option<PathBuf>,

    /// Output format: text, json
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Path of the graph file to operate on
    pub fn graph_file(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("trellis")
                .join("graph.json")
        })
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage items
    Item(item::ItemArgs),
    /// Manage links
    Link(link::LinkArgs),
    /// Enumerate all paths from an item
    Traverse(traverse::TraverseArgs),
    /// Inspect or reset the whole graph
    Graph(graph::GraphArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting trellis CLI");

    match &cli.command {
        Commands::Item(args) => item::run(args, &cli)?,
        Commands::Link(args) => link::run(args, &cli)?,
        Commands::Traverse(args) => traverse::run(args, &cli)?,
        Commands::Graph(args) => graph::run(args, &cli)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
