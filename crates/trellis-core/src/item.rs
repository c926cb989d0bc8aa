//! Graph item (node) type and adjacency management

use crate::error::{Error, Result};
use crate::link::Direction;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Adjacency index: link type to insertion-ordered neighbor ids.
///
/// A type label appears at most once; first-seen order determines
/// iteration order across types.
pub type AdjacencyMap = IndexMap<String, IndexSet<String>>;

/// An item (node) in the graph.
///
/// Carries a unique id, an opaque payload and two adjacency indexes,
/// one per direction. Adjacency stores neighbor ids, never references;
/// the owning [`Graph`](crate::graph::Graph) keeps both directions
/// reciprocal.
#[derive(Debug, Clone)]
pub struct GraphItem<T> {
    id: String,
    data: T,
    next: AdjacencyMap,
    prev: AdjacencyMap,
}

/// Check a link type against only/exclude filters.
///
/// A type passes iff it is admitted by `only` (unset admits all) and
/// not named by `exclude`; exclusion wins when both name the same type.
fn type_admitted(link_type: &str, only: Option<&[String]>, exclude: Option<&[String]>) -> bool {
    if let Some(only) = only {
        if !only.iter().any(|t| t == link_type) {
            return false;
        }
    }
    if let Some(exclude) = exclude {
        if exclude.iter().any(|t| t == link_type) {
            return false;
        }
    }
    true
}

impl<T> GraphItem<T> {
    /// Create a new item with empty adjacency
    pub fn new(id: impl Into<String>, data: T) -> Self {
        Self {
            id: id.into(),
            data,
            next: AdjacencyMap::new(),
            prev: AdjacencyMap::new(),
        }
    }

    /// Item id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Item payload
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Mutable access to the payload
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Replace the payload, returning the previous one
    pub fn set_data(&mut self, data: T) -> T {
        std::mem::replace(&mut self.data, data)
    }

    /// Consume the item, yielding its payload
    pub(crate) fn into_data(self) -> T {
        self.data
    }

    /// Register an outgoing neighbor under the given link type.
    ///
    /// Idempotent: re-adding an existing `(type, id)` pair is a no-op.
    pub fn add_next(&mut self, id: impl Into<String>, link_type: impl Into<String>) {
        self.next.entry(link_type.into()).or_default().insert(id.into());
    }

    /// Register an incoming neighbor under the given link type
    pub fn add_prev(&mut self, id: impl Into<String>, link_type: impl Into<String>) {
        self.prev.entry(link_type.into()).or_default().insert(id.into());
    }

    /// Remove an outgoing neighbor.
    ///
    /// With `Some(type)` only that bucket is touched; with `None` the id
    /// is swept from every bucket. Removing an absent id is a silent
    /// no-op. Buckets left empty are dropped so type enumeration never
    /// yields an empty list.
    pub fn delete_next(&mut self, id: &str, link_type: Option<&str>) {
        remove_neighbor(&mut self.next, id, link_type);
    }

    /// Remove an incoming neighbor; same semantics as [`delete_next`](Self::delete_next)
    pub fn delete_prev(&mut self, id: &str, link_type: Option<&str>) {
        remove_neighbor(&mut self.prev, id, link_type);
    }

    /// True if `id` is an outgoing neighbor under `link_type`
    pub fn has_next(&self, id: &str, link_type: &str) -> bool {
        self.next.get(link_type).is_some_and(|ids| ids.contains(id))
    }

    /// True if `id` is an incoming neighbor under `link_type`
    pub fn has_prev(&self, id: &str, link_type: &str) -> bool {
        self.prev.get(link_type).is_some_and(|ids| ids.contains(id))
    }

    /// Outgoing neighbor ids.
    ///
    /// `Some(type)` returns that bucket's ids in insertion order, or
    /// `TypeNotExist` when the type has no entries. `None` returns the
    /// union across all buckets, deduplicated, in first-seen order.
    pub fn next_ids(&self, link_type: Option<&str>) -> Result<Vec<&str>> {
        neighbor_ids(&self.next, link_type)
    }

    /// Incoming neighbor ids; same semantics as [`next_ids`](Self::next_ids)
    pub fn prev_ids(&self, link_type: Option<&str>) -> Result<Vec<&str>> {
        neighbor_ids(&self.prev, link_type)
    }

    /// Filtered view of the outgoing adjacency (`[type => [id, ...]]`)
    pub fn next_map(
        &self,
        types_only: Option<&[String]>,
        types_exclude: Option<&[String]>,
    ) -> IndexMap<String, Vec<String>> {
        owned_map(&self.next, types_only, types_exclude)
    }

    /// Filtered view of the incoming adjacency
    pub fn prev_map(
        &self,
        types_only: Option<&[String]>,
        types_exclude: Option<&[String]>,
    ) -> IndexMap<String, Vec<String>> {
        owned_map(&self.prev, types_only, types_exclude)
    }

    /// Borrowed filtered adjacency in the given walk direction.
    ///
    /// Used by the traversal engine; preserves first-seen type order and
    /// per-type insertion order.
    pub(crate) fn filtered_adjacency(
        &self,
        direction: Direction,
        types_only: Option<&[String]>,
        types_exclude: Option<&[String]>,
    ) -> Vec<(&str, Vec<&str>)> {
        let map = match direction {
            Direction::Outgoing => &self.next,
            Direction::Incoming => &self.prev,
        };
        map.iter()
            .filter(|(link_type, _)| type_admitted(link_type, types_only, types_exclude))
            .map(|(link_type, ids)| {
                (link_type.as_str(), ids.iter().map(String::as_str).collect())
            })
            .collect()
    }

    /// Represent the item as a plain record
    pub fn to_record(&self) -> ItemRecord<T>
    where
        T: Clone,
    {
        ItemRecord {
            id: self.id.clone(),
            data: self.data.clone(),
            previous: self.prev_map(None, None),
            next: self.next_map(None, None),
        }
    }
}

fn remove_neighbor(map: &mut AdjacencyMap, id: &str, link_type: Option<&str>) {
    match link_type {
        Some(link_type) => {
            if let Some(ids) = map.get_mut(link_type) {
                ids.shift_remove(id);
                if ids.is_empty() {
                    map.shift_remove(link_type);
                }
            }
        }
        None => {
            map.retain(|_, ids| {
                ids.shift_remove(id);
                !ids.is_empty()
            });
        }
    }
}

fn neighbor_ids<'a>(map: &'a AdjacencyMap, link_type: Option<&str>) -> Result<Vec<&'a str>> {
    match link_type {
        Some(link_type) => {
            let ids = map
                .get(link_type)
                .ok_or_else(|| Error::TypeNotExist(link_type.to_string()))?;
            Ok(ids.iter().map(String::as_str).collect())
        }
        None => {
            let mut seen: IndexSet<&str> = IndexSet::new();
            for ids in map.values() {
                for id in ids {
                    seen.insert(id.as_str());
                }
            }
            Ok(seen.into_iter().collect())
        }
    }
}

fn owned_map(
    map: &AdjacencyMap,
    types_only: Option<&[String]>,
    types_exclude: Option<&[String]>,
) -> IndexMap<String, Vec<String>> {
    map.iter()
        .filter(|(link_type, _)| type_admitted(link_type, types_only, types_exclude))
        .map(|(link_type, ids)| (link_type.clone(), ids.iter().cloned().collect()))
        .collect()
}

/// An item represented as a plain record (`id`, payload and both
/// adjacency maps)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord<T> {
    pub id: String,
    pub data: T,
    pub previous: IndexMap<String, Vec<String>>,
    pub next: IndexMap<String, Vec<String>>,
}
