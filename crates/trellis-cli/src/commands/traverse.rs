//! Traverse command

use clap::Args;

use crate::output::{self, OutputFormat};
use crate::{store, Cli};
use trellis_core::{limits, TraverseQuery};

#[derive(Args)]
pub struct TraverseArgs {
    /// Starting item
    pub start: String,

    /// Walk incoming links instead of outgoing
    #[arg(long)]
    pub backward: bool,

    /// Follow only these link types (comma-separated)
    #[arg(long)]
    pub only: Option<String>,

    /// Never follow these link types (comma-separated)
    #[arg(long)]
    pub exclude: Option<String>,

    /// Maximum path length in nodes
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Keep walking through repeated items (combine with --max-length)
    #[arg(long)]
    pub follow_loops: bool,
}

fn split_types(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

pub fn run(args: &TraverseArgs, cli: &Cli) -> anyhow::Result<()> {
    let path = cli.graph_file();
    let format = OutputFormat::from(cli.format.as_str());
    let graph = store::load(&path)?;

    let mut query = TraverseQuery::new(args.start.as_str());
    if let Some(only) = &args.only {
        query = query.only_types(split_types(only));
    }
    if let Some(exclude) = &args.exclude {
        query = query.exclude_types(split_types(exclude));
    }
    if let Some(max) = args.max_length {
        limits::validate_path_length(max)?;
        query = query.limit_path_length(max);
    }
    if args.follow_loops {
        query = query.follow_loops();
    }

    let direction = if args.backward { "backward" } else { "forward" };
    tracing::info!("Traversing {} from {}", direction, args.start);

    let paths = if args.backward {
        graph.traverse_backward(&query)?
    } else {
        graph.traverse_forward(&query)?
    };

    if format == OutputFormat::Json {
        println!("{}", output::to_json(&paths));
        return Ok(());
    }

    if paths.is_empty() {
        println!("No paths from '{}' ({})", args.start, direction);
    } else {
        println!("Paths from '{}' ({}, {} found):", args.start, direction, paths.len());
        for (i, path) in paths.iter().enumerate() {
            println!("  Path {}: {}", i + 1, path.node_ids().join(" -> "));
        }
    }

    Ok(())
}
