//! Link commands

use clap::{Args, Subcommand};

use crate::{store, Cli};
use trellis_core::{limits, DEFAULT_LINK_TYPE};

#[derive(Args)]
pub struct LinkArgs {
    #[command(subcommand)]
    pub command: LinkCommands,
}

#[derive(Subcommand)]
pub enum LinkCommands {
    /// Add a typed link between two items
    Add {
        /// Source item
        from: String,
        /// Target item
        to: String,
        /// Link type
        #[arg(short = 't', long, default_value = DEFAULT_LINK_TYPE)]
        r#type: String,
    },
    /// Delete a link (all types when --type is omitted)
    Delete {
        /// Source item
        from: String,
        /// Target item
        to: String,
        /// Link type
        #[arg(short = 't', long)]
        r#type: Option<String>,
    },
    /// List all links
    List {
        /// Filter by source item
        #[arg(long)]
        from: Option<String>,
        /// Filter by type
        #[arg(short = 't', long)]
        r#type: Option<String>,
    },
}

pub fn run(args: &LinkArgs, cli: &Cli) -> anyhow::Result<()> {
    let path = cli.graph_file();
    let mut graph = store::load(&path)?;

    match &args.command {
        LinkCommands::Add { from, to, r#type } => {
            limits::validate_link_type(r#type)?;

            graph.link(from, to, r#type)?;
            store::save(&path, &graph)?;

            tracing::info!("Created link: {} -[{}]-> {}", from, r#type, to);
            println!("Created link: {} -[{}]-> {}", from, r#type, to);
        }
        LinkCommands::Delete { from, to, r#type } => {
            graph.unlink(from, to, r#type.as_deref())?;
            store::save(&path, &graph)?;

            tracing::info!("Deleted link: {} -> {}", from, to);
            match r#type {
                Some(t) => println!("Deleted link: {} -[{}]-> {}", from, t, to),
                None => println!("Deleted link: {} -> {} (all types)", from, to),
            }
        }
        LinkCommands::List { from, r#type } => {
            let mut count = 0;
            for item in graph.iter() {
                if let Some(f) = from {
                    if item.id() != f {
                        continue;
                    }
                }
                for (link_type, ids) in item.next_map(None, None) {
                    if let Some(t) = r#type {
                        if &link_type != t {
                            continue;
                        }
                    }
                    for to in ids {
                        println!("  {} -[{}]-> {}", item.id(), link_type, to);
                        count += 1;
                    }
                }
            }

            if count == 0 {
                println!("No links found");
            }
        }
    }

    Ok(())
}
