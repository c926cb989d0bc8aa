//! Link (edge) types

use crate::item::ItemRecord;
use serde::{Deserialize, Serialize};

/// Link type used when the caller does not name one
pub const DEFAULT_LINK_TYPE: &str = "default";

/// Direction for graph traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Outgoing,
    Incoming,
}

/// A directed, typed edge between two items.
///
/// Links hold item ids rather than references; resolve them against the
/// owning [`Graph`](crate::graph::Graph) at read time. A link is an
/// ephemeral view produced by the traversal engine, never stored by the
/// graph itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    /// Id of the left item (the edge source)
    pub left: String,

    /// Id of the right item (the edge target)
    pub right: String,

    /// Type of the link (e.g. "follows", "depends_on")
    pub link_type: String,
}

impl GraphLink {
    /// Create a new link
    pub fn new(
        left: impl Into<String>,
        right: impl Into<String>,
        link_type: impl Into<String>,
    ) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            link_type: link_type.into(),
        }
    }

    /// Swap left and right endpoints in place
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
    }

    /// Return a copy with the endpoints swapped
    pub fn swapped(&self) -> Self {
        let mut link = self.clone();
        link.swap();
        link
    }
}

impl std::fmt::Display for GraphLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -[{}]-> {}", self.left, self.link_type, self.right)
    }
}

/// A link resolved to full item records
#[derive(Debug, Clone, Serialize)]
pub struct LinkRecord<T> {
    pub left: ItemRecord<T>,
    pub right: ItemRecord<T>,
    pub link_type: String,
}
