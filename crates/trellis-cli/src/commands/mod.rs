//! CLI command implementations

pub mod completions;
pub mod graph;
pub mod item;
pub mod link;
pub mod traverse;
