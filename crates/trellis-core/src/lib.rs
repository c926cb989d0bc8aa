//! Trellis Core - directed typed multigraph with exhaustive path
//! traversal
//!
//! This crate provides an embeddable in-memory graph: items keyed by
//! opaque string ids, typed multi-edges kept reciprocal in both
//! directions, and a deterministic depth-first engine that enumerates
//! every path from a start item to a dead end.

pub mod error;
pub mod graph;
pub mod item;
pub mod limits;
pub mod link;
pub mod path;
pub mod traversal;

pub use error::{Error, Result};
pub use graph::Graph;
pub use item::{AdjacencyMap, GraphItem, ItemRecord};
pub use link::{Direction, GraphLink, LinkRecord, DEFAULT_LINK_TYPE};
pub use path::TraversePath;
pub use traversal::{TraversalEngine, TraverseQuery};
