//! Graph registry: owns the items, keeps adjacency reciprocal

use crate::error::{Error, Result};
use crate::item::{GraphItem, ItemRecord};
use crate::link::{Direction, GraphLink};
use crate::path::TraversePath;
use crate::traversal::{TraversalEngine, TraverseQuery};
use indexmap::IndexMap;

/// A directed, typed multigraph.
///
/// Owns every [`GraphItem`] keyed by id, in insertion order. All
/// adjacency is stored as reciprocal id references: for every edge
/// `(u, v, type)`, `v` sits in `u`'s outgoing index and `u` in `v`'s
/// incoming index. `link`, `unlink` and `delete` check their
/// preconditions before mutating, so the invariant holds whenever a
/// call returns.
#[derive(Debug, Clone, Default)]
pub struct Graph<T> {
    items: IndexMap<String, GraphItem<T>>,
}

impl<T> Graph<T> {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }

    /// Build a graph from item payloads and typed links.
    ///
    /// Funnels through [`insert`](Self::insert) and [`link`](Self::link)
    /// so every duplicate-id and missing-endpoint check applies.
    pub fn build<K: Into<String>>(
        items: impl IntoIterator<Item = (K, T)>,
        links: impl IntoIterator<Item = (K, K, K)>,
    ) -> Result<Self> {
        let mut graph = Self::new();
        for (id, data) in items {
            graph.insert(id, data)?;
        }
        for (lhs, rhs, link_type) in links {
            graph.link(&lhs.into(), &rhs.into(), &link_type.into())?;
        }
        Ok(graph)
    }

    /// Insert a new item, failing with `IdExists` on a duplicate id
    pub fn insert(&mut self, id: impl Into<String>, data: T) -> Result<&mut GraphItem<T>> {
        let id = id.into();
        if self.contains(&id) {
            return Err(Error::IdExists(id));
        }

        tracing::debug!("Inserting item {}", id);
        let item = GraphItem::new(id.clone(), data);
        Ok(self.items.entry(id).or_insert(item))
    }

    /// Delete an item, stripping every adjacency entry that references
    /// it, and return its payload.
    pub fn delete(&mut self, id: &str) -> Result<T> {
        let item = self.get(id)?;
        let prev_ids: Vec<String> = item.prev_ids(None)?.iter().map(|s| s.to_string()).collect();
        let next_ids: Vec<String> = item.next_ids(None)?.iter().map(|s| s.to_string()).collect();

        for prev_id in &prev_ids {
            if let Some(neighbor) = self.items.get_mut(prev_id) {
                neighbor.delete_next(id, None);
            }
        }
        for next_id in &next_ids {
            if let Some(neighbor) = self.items.get_mut(next_id) {
                neighbor.delete_prev(id, None);
            }
        }

        tracing::debug!("Deleting item {}", id);
        let item = self
            .items
            .shift_remove(id)
            .ok_or_else(|| Error::IdNotExist(id.to_string()))?;
        Ok(item.into_data())
    }

    /// Create a typed edge `lhs -> rhs`.
    ///
    /// Both endpoints are checked before any index is touched;
    /// re-linking an existing `(lhs, rhs, type)` triple is idempotent.
    pub fn link(&mut self, lhs: &str, rhs: &str, link_type: &str) -> Result<()> {
        self.check_exist(lhs)?;
        self.check_exist(rhs)?;

        self.item_mut(lhs)?.add_next(rhs, link_type);
        self.item_mut(rhs)?.add_prev(lhs, link_type);

        tracing::debug!("Linked {} -[{}]-> {}", lhs, link_type, rhs);
        Ok(())
    }

    /// Remove the edge `lhs -> rhs` in both indexes.
    ///
    /// With `None` the pair is unlinked under every type. Both endpoints
    /// must exist; unlinking an edge that is not there is a silent
    /// no-op.
    pub fn unlink(&mut self, lhs: &str, rhs: &str, link_type: Option<&str>) -> Result<()> {
        self.check_exist(lhs)?;
        self.check_exist(rhs)?;

        self.item_mut(lhs)?.delete_next(rhs, link_type);
        self.item_mut(rhs)?.delete_prev(lhs, link_type);

        tracing::debug!("Unlinked {} -/-> {} (type: {:?})", lhs, rhs, link_type);
        Ok(())
    }

    /// Get an item, failing with `IdNotExist` when absent
    pub fn get(&self, id: &str) -> Result<&GraphItem<T>> {
        self.items
            .get(id)
            .ok_or_else(|| Error::IdNotExist(id.to_string()))
    }

    /// Mutable access to an item, failing with `IdNotExist` when absent
    pub fn get_mut(&mut self, id: &str) -> Result<&mut GraphItem<T>> {
        self.item_mut(id)
    }

    /// Get an item without raising; `None` when absent.
    ///
    /// The non-throwing counterpart of [`get`](Self::get) — callers
    /// with a fallback use `graph.item(id).unwrap_or(&default)`.
    pub fn item(&self, id: &str) -> Option<&GraphItem<T>> {
        self.items.get(id)
    }

    /// True if an item with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop all items. Links and paths obtained earlier hold only ids
    /// and resolve to nothing afterwards.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate items in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &GraphItem<T>> {
        self.items.values()
    }

    /// Item ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// Represent every item as a plain record, in insertion order
    pub fn to_records(&self) -> Vec<ItemRecord<T>>
    where
        T: Clone,
    {
        self.items.values().map(GraphItem::to_record).collect()
    }

    /// Enumerate all paths along outgoing edges from `start`
    pub fn traverse_forward(&self, query: &TraverseQuery) -> Result<Vec<TraversePath>> {
        TraversalEngine::execute(query, Direction::Outgoing, &self.items)
    }

    /// Enumerate all paths along incoming edges from `start`
    pub fn traverse_backward(&self, query: &TraverseQuery) -> Result<Vec<TraversePath>> {
        TraversalEngine::execute(query, Direction::Incoming, &self.items)
    }

    /// [`traverse_forward`](Self::traverse_forward) with a per-edge observer
    pub fn traverse_forward_with<F>(
        &self,
        query: &TraverseQuery,
        on_edge: F,
    ) -> Result<Vec<TraversePath>>
    where
        F: FnMut(&GraphLink, &[GraphLink]),
    {
        TraversalEngine::execute_with(query, Direction::Outgoing, &self.items, on_edge)
    }

    /// [`traverse_backward`](Self::traverse_backward) with a per-edge observer
    pub fn traverse_backward_with<F>(
        &self,
        query: &TraverseQuery,
        on_edge: F,
    ) -> Result<Vec<TraversePath>>
    where
        F: FnMut(&GraphLink, &[GraphLink]),
    {
        TraversalEngine::execute_with(query, Direction::Incoming, &self.items, on_edge)
    }

    fn check_exist(&self, id: &str) -> Result<()> {
        if !self.contains(id) {
            return Err(Error::IdNotExist(id.to_string()));
        }
        Ok(())
    }

    fn item_mut(&mut self, id: &str) -> Result<&mut GraphItem<T>> {
        self.items
            .get_mut(id)
            .ok_or_else(|| Error::IdNotExist(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &[&str])]) -> IndexMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(ty, ids)| {
                (
                    ty.to_string(),
                    ids.iter().map(|id| id.to_string()).collect(),
                )
            })
            .collect()
    }

    fn sample_graph() -> Graph<i64> {
        Graph::build(
            vec![("1", 11), ("2", 22), ("3", 33), ("4", 44), ("5", 55)],
            vec![
                ("1", "2", "a"),
                ("2", "3", "a"),
                ("3", "4", "a"),
                ("3", "5", "a"),
                ("1", "5", "a"),
            ],
        )
        .unwrap()
    }

    /// Reciprocal-adjacency invariant: every outgoing entry has a
    /// matching incoming entry and vice versa, and all ids resolve.
    fn assert_consistent<T>(graph: &Graph<T>) {
        for item in graph.iter() {
            for (link_type, ids) in item.next_map(None, None) {
                for id in ids {
                    let neighbor = graph.get(&id).expect("dangling outgoing id");
                    assert!(neighbor.has_prev(item.id(), &link_type));
                }
            }
            for (link_type, ids) in item.prev_map(None, None) {
                for id in ids {
                    let neighbor = graph.get(&id).expect("dangling incoming id");
                    assert!(neighbor.has_next(item.id(), &link_type));
                }
            }
        }
    }

    #[test]
    fn test_build_adjacency() {
        let graph = sample_graph();
        assert_eq!(graph.len(), 5);
        assert_consistent(&graph);

        assert_eq!(graph.get("1").unwrap().prev_map(None, None), map(&[]));
        assert_eq!(
            graph.get("1").unwrap().next_map(None, None),
            map(&[("a", &["2", "5"])])
        );
        assert_eq!(
            graph.get("2").unwrap().prev_map(None, None),
            map(&[("a", &["1"])])
        );
        assert_eq!(
            graph.get("3").unwrap().next_map(None, None),
            map(&[("a", &["4", "5"])])
        );
        assert_eq!(graph.get("4").unwrap().next_map(None, None), map(&[]));
        assert_eq!(
            graph.get("5").unwrap().prev_map(None, None),
            map(&[("a", &["3", "1"])])
        );
    }

    #[test]
    fn test_insert_duplicate_fails() {
        let mut graph = sample_graph();
        assert!(matches!(
            graph.insert("1", 99),
            Err(Error::IdExists(id)) if id == "1"
        ));
        assert_eq!(graph.len(), 5);
    }

    #[test]
    fn test_get_missing_fails() {
        let graph = sample_graph();
        assert!(matches!(
            graph.get("6"),
            Err(Error::IdNotExist(id)) if id == "6"
        ));
        assert!(graph.item("6").is_none());
        assert_eq!(*graph.item("1").unwrap().data(), 11);
    }

    #[test]
    fn test_link_new_types_and_relink() {
        let mut graph = sample_graph();
        graph.insert("6", 66).unwrap();
        graph.link("1", "6", "b").unwrap();
        graph.link("6", "5", "b").unwrap();
        assert_consistent(&graph);

        assert_eq!(
            graph.get("1").unwrap().next_map(None, None),
            map(&[("a", &["2", "5"]), ("b", &["6"])])
        );
        assert_eq!(
            graph.get("5").unwrap().prev_map(None, None),
            map(&[("a", &["3", "1"]), ("b", &["6"])])
        );

        // idempotent: relinking changes nothing
        graph.link("1", "6", "b").unwrap();
        assert_eq!(
            graph.get("1").unwrap().next_map(None, None),
            map(&[("a", &["2", "5"]), ("b", &["6"])])
        );
    }

    #[test]
    fn test_link_missing_endpoint_fails_without_mutation() {
        let mut graph = sample_graph();
        assert!(graph.link("1", "9", "a").is_err());
        assert!(graph.link("9", "1", "a").is_err());
        assert_eq!(
            graph.get("1").unwrap().next_map(None, None),
            map(&[("a", &["2", "5"])])
        );
        assert_consistent(&graph);
    }

    #[test]
    fn test_unlink_restores_pre_link_state() {
        let mut graph = sample_graph();
        let before = graph.to_records();

        graph.link("4", "5", "b").unwrap();
        graph.unlink("4", "5", Some("b")).unwrap();

        assert_eq!(graph.to_records(), before);
        assert_consistent(&graph);
    }

    #[test]
    fn test_unlink_all_types() {
        let mut graph = sample_graph();
        graph.link("4", "5", "b").unwrap();
        graph.link("4", "5", "c").unwrap();

        assert_eq!(
            graph.get("4").unwrap().next_map(None, None),
            map(&[("b", &["5"]), ("c", &["5"])])
        );

        graph.unlink("4", "5", None).unwrap();
        assert_eq!(graph.get("4").unwrap().next_map(None, None), map(&[]));
        assert_eq!(
            graph.get("5").unwrap().prev_map(None, None),
            map(&[("a", &["3", "1"])])
        );
        assert_consistent(&graph);
    }

    #[test]
    fn test_unlink_missing_edge_is_noop() {
        let mut graph = sample_graph();
        let before = graph.to_records();

        graph.unlink("4", "1", Some("a")).unwrap();
        graph.unlink("4", "1", None).unwrap();

        assert_eq!(graph.to_records(), before);
    }

    #[test]
    fn test_unlink_missing_endpoint_fails() {
        let mut graph = sample_graph();
        assert!(matches!(
            graph.unlink("1", "9", None),
            Err(Error::IdNotExist(id)) if id == "9"
        ));
    }

    #[test]
    fn test_delete_strips_all_references() {
        let mut graph = sample_graph();
        let data = graph.delete("3").unwrap();

        assert_eq!(data, 33);
        assert_eq!(graph.len(), 4);
        assert!(!graph.contains("3"));
        assert_consistent(&graph);

        assert_eq!(
            graph.get("2").unwrap().next_map(None, None),
            map(&[])
        );
        assert_eq!(graph.get("4").unwrap().prev_map(None, None), map(&[]));
        assert_eq!(
            graph.get("5").unwrap().prev_map(None, None),
            map(&[("a", &["1"])])
        );
    }

    #[test]
    fn test_delete_missing_fails() {
        let mut graph = sample_graph();
        assert!(matches!(
            graph.delete("9"),
            Err(Error::IdNotExist(id)) if id == "9"
        ));
        assert_eq!(graph.len(), 5);
    }

    #[test]
    fn test_delete_item_with_self_loop() {
        let mut graph = sample_graph();
        graph.link("2", "2", "self").unwrap();
        assert_consistent(&graph);

        assert_eq!(graph.delete("2").unwrap(), 22);
        assert_consistent(&graph);
        assert_eq!(graph.get("1").unwrap().next_map(None, None), map(&[("a", &["5"])]));
    }

    #[test]
    fn test_multi_type_edges_between_same_pair() {
        let mut graph = sample_graph();
        graph.link("4", "5", "b").unwrap();
        graph.link("4", "5", "c").unwrap();

        let item = graph.get("4").unwrap();
        assert!(item.has_next("5", "b"));
        assert!(item.has_next("5", "c"));
        assert!(!item.has_next("5", "a"));

        // removing one type leaves the other
        graph.unlink("4", "5", Some("b")).unwrap();
        let item = graph.get("4").unwrap();
        assert!(!item.has_next("5", "b"));
        assert!(item.has_next("5", "c"));
        assert_consistent(&graph);
    }

    #[test]
    fn test_adjacency_after_reshuffle() {
        // insert/link/unlink/delete interleaving with exact snapshots
        let mut graph = sample_graph();
        graph.insert("6", 66).unwrap();
        graph.link("1", "6", "b").unwrap();
        graph.link("6", "5", "b").unwrap();
        graph.unlink("1", "5", None).unwrap();
        graph.unlink("3", "5", None).unwrap();
        graph.link("6", "3", "b").unwrap();
        graph.link("4", "5", "b").unwrap();
        assert_consistent(&graph);

        assert_eq!(
            graph.get("1").unwrap().next_map(None, None),
            map(&[("a", &["2"]), ("b", &["6"])])
        );
        assert_eq!(
            graph.get("3").unwrap().prev_map(None, None),
            map(&[("a", &["2"]), ("b", &["6"])])
        );
        assert_eq!(
            graph.get("5").unwrap().prev_map(None, None),
            map(&[("b", &["6", "4"])])
        );
        assert_eq!(
            graph.get("6").unwrap().next_map(None, None),
            map(&[("b", &["5", "3"])])
        );

        graph.delete("2").unwrap();
        assert_consistent(&graph);
        assert_eq!(graph.len(), 5);
        assert_eq!(graph.get("1").unwrap().next_map(None, None), map(&[("b", &["6"])]));
        assert_eq!(
            graph.get("3").unwrap().prev_map(None, None),
            map(&[("b", &["6"])])
        );
    }

    #[test]
    fn test_to_records_order_and_shape() {
        let graph = Graph::build(vec![("b", 2), ("a", 1)], vec![("b", "a", "x")]).unwrap();
        let records = graph.to_records();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "b");
        assert_eq!(records[0].next, map(&[("x", &["a"])]));
        assert_eq!(records[1].id, "a");
        assert_eq!(records[1].previous, map(&[("x", &["b"])]));

        let json = serde_json::to_value(&records).unwrap();
        assert_eq!(json[0]["id"], "b");
        assert_eq!(json[0]["data"], 2);
        assert_eq!(json[0]["next"]["x"][0], "a");
    }

    #[test]
    fn test_clear() {
        let mut graph = sample_graph();
        graph.clear();
        assert_eq!(graph.len(), 0);
        assert!(graph.is_empty());
        assert!(!graph.contains("1"));
    }

    #[test]
    fn test_ids_insertion_order() {
        let graph = sample_graph();
        assert_eq!(graph.ids().collect::<Vec<_>>(), vec!["1", "2", "3", "4", "5"]);
    }
}
