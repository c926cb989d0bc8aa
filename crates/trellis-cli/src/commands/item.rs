//! Item commands

use clap::{Args, Subcommand};
use serde_json::Value;

use crate::output::{self, OutputFormat};
use crate::{store, Cli};
use trellis_core::limits;

#[derive(Args)]
pub struct ItemArgs {
    #[command(subcommand)]
    pub command: ItemCommands,
}

#[derive(Subcommand)]
pub enum ItemCommands {
    /// Add a new item
    Add {
        /// Item id
        id: String,
        /// JSON payload
        #[arg(short, long)]
        data: Option<String>,
    },
    /// Delete an item and every link touching it
    Delete {
        /// Item id
        id: String,
    },
    /// Show one item with its adjacency
    Show {
        /// Item id
        id: String,
    },
    /// List all items
    List,
}

pub fn run(args: &ItemArgs, cli: &Cli) -> anyhow::Result<()> {
    let path = cli.graph_file();
    let format = OutputFormat::from(cli.format.as_str());
    let mut graph = store::load(&path)?;

    match &args.command {
        ItemCommands::Add { id, data } => {
            limits::validate_item_id(id)?;
            let data: Value = match data {
                Some(raw) => serde_json::from_str(raw)?,
                None => Value::Null,
            };

            graph.insert(id.as_str(), data)?;
            store::save(&path, &graph)?;

            tracing::info!("Created item: {}", id);
            println!("Created item '{}'", id);
        }
        ItemCommands::Delete { id } => {
            let data = graph.delete(id)?;
            store::save(&path, &graph)?;

            tracing::info!("Deleted item: {}", id);
            println!("Deleted item '{}' (data: {})", id, data);
        }
        ItemCommands::Show { id } => {
            let item = graph.get(id)?;

            if format == OutputFormat::Json {
                println!("{}", output::to_json(&item.to_record()));
            } else {
                println!("Item '{}'", item.id());
                println!("  data: {}", item.data());
                for (link_type, ids) in item.prev_map(None, None) {
                    println!("  prev <-[{}]- {}", link_type, ids.join(", "));
                }
                for (link_type, ids) in item.next_map(None, None) {
                    println!("  next -[{}]-> {}", link_type, ids.join(", "));
                }
            }
        }
        ItemCommands::List => {
            if format == OutputFormat::Json {
                println!("{}", output::to_json(&graph.to_records()));
            } else if graph.is_empty() {
                println!("No items in graph");
            } else {
                println!("Items ({} total):", graph.len());
                for item in graph.iter() {
                    println!("  {} (data: {})", item.id(), item.data());
                }
            }
        }
    }

    Ok(())
}
