//! Traverse path produced by the traversal engine

use crate::error::Result;
use crate::graph::Graph;
use crate::link::{GraphLink, LinkRecord};
use serde::Serialize;

/// One complete path from a traversal start to a dead end or truncation
/// point.
///
/// A connected walk: `links[i].right == links[i + 1].left` for all `i`.
/// The engine never constructs an empty path; an isolated start node
/// simply yields no paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraversePath {
    links: Vec<GraphLink>,
}

impl TraversePath {
    pub(crate) fn new(links: Vec<GraphLink>) -> Self {
        Self { links }
    }

    /// Id of the path's first item
    pub fn first_id(&self) -> Option<&str> {
        self.links.first().map(|link| link.left.as_str())
    }

    /// Id of the path's last item
    pub fn last_id(&self) -> Option<&str> {
        self.links.last().map(|link| link.right.as_str())
    }

    /// Number of links in the path
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The path's links in walk order
    pub fn links(&self) -> &[GraphLink] {
        &self.links
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GraphLink> {
        self.links.iter()
    }

    /// Reverse the path in place: link order is reversed and every
    /// link's endpoints are swapped.
    pub fn reverse(&mut self) {
        self.links.reverse();
        for link in &mut self.links {
            link.swap();
        }
    }

    /// Return a reversed copy, leaving this path untouched
    pub fn reversed(&self) -> Self {
        let mut path = self.clone();
        path.reverse();
        path
    }

    /// Flattened node-id sequence `n0, n1, ..., nk`
    pub fn node_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.links.iter().map(|link| link.left.as_str()).collect();
        if let Some(link) = self.links.last() {
            ids.push(link.right.as_str());
        }
        ids
    }

    /// Resolve every link to full item records against the owning graph.
    ///
    /// Fails with `IdNotExist` if the graph was mutated since the path
    /// was produced and an endpoint no longer exists.
    pub fn records<T: Clone>(&self, graph: &Graph<T>) -> Result<Vec<LinkRecord<T>>> {
        self.links
            .iter()
            .map(|link| {
                Ok(LinkRecord {
                    left: graph.get(&link.left)?.to_record(),
                    right: graph.get(&link.right)?.to_record(),
                    link_type: link.link_type.clone(),
                })
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a TraversePath {
    type Item = &'a GraphLink;
    type IntoIter = std::slice::Iter<'a, GraphLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}
