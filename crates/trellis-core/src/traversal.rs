//! Exhaustive depth-first path enumeration

use crate::error::{Error, Result};
use crate::item::GraphItem;
use crate::link::{Direction, GraphLink};
use crate::path::TraversePath;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Traversal query builder.
///
/// Collects the start item and the knobs shared by forward and backward
/// traversal: link-type filters, the path-length bound and loop
/// handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraverseQuery {
    /// Starting item id
    pub start: String,

    /// Follow only these link types (None = all types)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types_only: Option<Vec<String>>,

    /// Never follow these link types; wins over `types_only`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types_exclude: Option<Vec<String>>,

    /// Maximum path length counted in nodes (None = unbounded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_path_length: Option<usize>,

    /// End a branch as soon as it revisits one of its own items
    #[serde(default = "default_stop_on_loop")]
    pub stop_on_loop: bool,
}

fn default_stop_on_loop() -> bool {
    true
}

impl TraverseQuery {
    /// Create a new query starting from an item
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            types_only: None,
            types_exclude: None,
            max_path_length: None,
            stop_on_loop: default_stop_on_loop(),
        }
    }

    /// Follow only the given link types
    pub fn only_types(mut self, types: Vec<String>) -> Self {
        self.types_only = Some(types);
        self
    }

    /// Never follow the given link types
    pub fn exclude_types(mut self, types: Vec<String>) -> Self {
        self.types_exclude = Some(types);
        self
    }

    /// Bound path length to at most `max` nodes
    pub fn limit_path_length(mut self, max: usize) -> Self {
        self.max_path_length = Some(max);
        self
    }

    /// Keep walking through already-visited items.
    ///
    /// Without a path-length bound this does not terminate on cyclic
    /// graphs; bounding cost is the caller's responsibility.
    pub fn follow_loops(mut self) -> Self {
        self.stop_on_loop = false;
        self
    }
}

/// One pending branch of the depth-first walk
struct Frame {
    item_id: String,
    /// Id of the item this branch arrived from and the link type used,
    /// None for the root frame
    related: Option<(String, String)>,
    /// Links accumulated on this branch so far
    path: Vec<GraphLink>,
}

/// Exhaustive path enumerator.
///
/// Walks one adjacency direction depth-first and collects every path
/// from the start item to a dead end, a loop truncation or the length
/// bound. Runs on an explicit frame stack so deep or densely looped
/// graphs cannot overflow the call stack; emission order is exactly the
/// recursive pre-order, so callers may rely on it.
pub struct TraversalEngine;

impl TraversalEngine {
    /// Execute a traversal query over an item table
    pub fn execute<T>(
        query: &TraverseQuery,
        direction: Direction,
        items: &IndexMap<String, GraphItem<T>>,
    ) -> Result<Vec<TraversePath>> {
        Self::execute_with(query, direction, items, |_, _| {})
    }

    /// Execute a traversal query, observing every edge.
    ///
    /// `on_edge` runs once per traversed link, before the link is added
    /// to the branch path; the second argument is the path accumulated
    /// so far, whose length is the zero-based depth of the edge. The
    /// callback also fires for the link that closes a truncated loop.
    pub fn execute_with<T, F>(
        query: &TraverseQuery,
        direction: Direction,
        items: &IndexMap<String, GraphItem<T>>,
        mut on_edge: F,
    ) -> Result<Vec<TraversePath>>
    where
        F: FnMut(&GraphLink, &[GraphLink]),
    {
        if !items.contains_key(&query.start) {
            return Err(Error::IdNotExist(query.start.clone()));
        }

        tracing::debug!(
            "Traversing from {} ({:?}, only: {:?}, exclude: {:?}, max: {:?}, stop_on_loop: {})",
            query.start,
            direction,
            query.types_only,
            query.types_exclude,
            query.max_path_length,
            query.stop_on_loop
        );

        let types_only = query.types_only.as_deref();
        let types_exclude = query.types_exclude.as_deref();

        let mut paths = Vec::new();
        let mut stack = vec![Frame {
            item_id: query.start.clone(),
            related: None,
            path: Vec::new(),
        }];

        while let Some(frame) = stack.pop() {
            let Frame {
                item_id,
                related,
                mut path,
            } = frame;

            let item = items
                .get(&item_id)
                .ok_or_else(|| Error::IdNotExist(item_id.clone()))?;

            if let Some((related_id, link_type)) = related {
                let link = GraphLink::new(related_id, item_id, link_type);
                on_edge(&link, &path);

                if query.stop_on_loop && path.iter().any(|l| l.left == link.right) {
                    // Branch revisited one of its own items: seal the
                    // path with the closing link and go no further.
                    path.push(link);
                    paths.push(TraversePath::new(path));
                    continue;
                }

                path.push(link);
            }

            let adjacent = item.filtered_adjacency(direction, types_only, types_exclude);
            let descend = !adjacent.is_empty()
                && query.max_path_length.map_or(true, |max| path.len() + 1 < max);

            if descend {
                // Push children in reverse so first-seen type order and
                // per-type insertion order pop first.
                for (link_type, ids) in adjacent.iter().rev() {
                    for id in ids.iter().rev() {
                        stack.push(Frame {
                            item_id: (*id).to_string(),
                            related: Some((item.id().to_string(), (*link_type).to_string())),
                            path: path.clone(),
                        });
                    }
                }
            } else if !path.is_empty() {
                paths.push(TraversePath::new(path));
            }
        }

        tracing::debug!("Traversal from {} found {} paths", query.start, paths.len());

        Ok(paths)
    }
}
