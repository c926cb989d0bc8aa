//! Graph-wide commands

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use crate::{store, Cli};

#[derive(Args)]
pub struct GraphArgs {
    #[command(subcommand)]
    pub command: GraphCommands,
}

#[derive(Subcommand)]
pub enum GraphCommands {
    /// Dump every item with its adjacency
    Show,
    /// Print the number of items
    Count,
    /// Remove all items and links
    Clear,
}

pub fn run(args: &GraphArgs, cli: &Cli) -> anyhow::Result<()> {
    let path = cli.graph_file();
    let format = OutputFormat::from(cli.format.as_str());

    match &args.command {
        GraphCommands::Show => {
            let graph = store::load(&path)?;
            if format == OutputFormat::Json {
                println!("{}", output::to_json(&graph.to_records()));
            } else if graph.is_empty() {
                println!("Graph is empty");
            } else {
                for record in graph.to_records() {
                    println!("{}:", record.id);
                    for (link_type, ids) in &record.previous {
                        println!("  <-[{}]- {}", link_type, ids.join(", "));
                    }
                    for (link_type, ids) in &record.next {
                        println!("  -[{}]-> {}", link_type, ids.join(", "));
                    }
                }
            }
        }
        GraphCommands::Count => {
            let graph = store::load(&path)?;
            println!("{}", graph.len());
        }
        GraphCommands::Clear => {
            let mut graph = store::load(&path)?;
            let count = graph.len();
            graph.clear();
            store::save(&path, &graph)?;
            println!("Removed {} items", count);
        }
    }

    Ok(())
}
