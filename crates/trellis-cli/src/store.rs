//! Graph file load/save

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use trellis_core::{limits, Graph, DEFAULT_LINK_TYPE};

pub const FORMAT_VERSION: &str = "1";

/// On-disk graph format: item payloads plus typed links
#[derive(Debug, Serialize, Deserialize)]
pub struct GraphFile {
    pub version: String,
    pub items: Vec<ItemSeed>,
    pub links: Vec<LinkSeed>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItemSeed {
    pub id: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LinkSeed {
    pub from: String,
    pub to: String,
    #[serde(rename = "linkType", default = "default_link_type")]
    pub link_type: String,
}

fn default_link_type() -> String {
    DEFAULT_LINK_TYPE.to_string()
}

/// Load the graph file, or start empty when it does not exist yet.
///
/// Rebuilds the graph through `insert`/`link` so a hand-edited file
/// with duplicate ids or dangling links is rejected.
pub fn load(path: &Path) -> anyhow::Result<Graph<Value>> {
    if !path.exists() {
        tracing::debug!("No graph file at {:?}, starting empty", path);
        return Ok(Graph::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading graph file {}", path.display()))?;
    let file: GraphFile = serde_json::from_str(&content)
        .with_context(|| format!("parsing graph file {}", path.display()))?;

    tracing::debug!(
        "Loaded graph file {} (format version {})",
        path.display(),
        file.version
    );

    let mut graph = Graph::new();
    for item in file.items {
        limits::validate_item_id(&item.id)?;
        graph.insert(item.id, item.data)?;
    }
    for link in file.links {
        limits::validate_link_type(&link.link_type)?;
        graph.link(&link.from, &link.to, &link.link_type)?;
    }

    Ok(graph)
}

/// Save the graph atomically (write a temp file, then rename)
pub fn save(path: &Path, graph: &Graph<Value>) -> anyhow::Result<()> {
    let mut items = Vec::with_capacity(graph.len());
    let mut links = Vec::new();

    for item in graph.iter() {
        items.push(ItemSeed {
            id: item.id().to_string(),
            data: item.data().clone(),
        });
        for (link_type, ids) in item.next_map(None, None) {
            for to in ids {
                links.push(LinkSeed {
                    from: item.id().to_string(),
                    to,
                    link_type: link_type.clone(),
                });
            }
        }
    }

    let file = GraphFile {
        version: FORMAT_VERSION.to_string(),
        items,
        links,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, output_json(&file)?)
        .with_context(|| format!("writing {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("renaming {} to {}", tmp.display(), path.display()))?;

    tracing::debug!("Saved {} items to {}", graph.len(), path.display());
    Ok(())
}

fn output_json(file: &GraphFile) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(file)?)
}
