//! Shared types used across distrib crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label written in place of a node id for items no node could hold.
pub const DEFAULT_SENTINEL: &str = "NULL";

/// A file to be placed: an id and a size in arbitrary units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub size: u64,
}

impl Item {
    pub fn new(id: impl Into<String>, size: u64) -> Self {
        Self { id: id.into(), size }
    }
}

/// A storage node with a fixed capacity in the same units as [`Item::size`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub capacity: u64,
}

impl Node {
    pub fn new(id: impl Into<String>, capacity: u64) -> Self {
        Self {
            id: id.into(),
            capacity,
        }
    }
}

/// Terminal state of an item after allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "node", rename_all = "snake_case")]
pub enum Placement {
    /// Bound to the node with this id.
    Node(String),
    /// No node could ever hold the item.
    Unassignable,
}

impl Placement {
    pub fn node_id(&self) -> Option<&str> {
        match self {
            Placement::Node(id) => Some(id),
            Placement::Unassignable => None,
        }
    }

    pub fn is_unassignable(&self) -> bool {
        matches!(self, Placement::Unassignable)
    }

    /// Render the placement, substituting `sentinel` for unassignable items.
    pub fn label<'a>(&'a self, sentinel: &'a str) -> &'a str {
        self.node_id().unwrap_or(sentinel)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(DEFAULT_SENTINEL))
    }
}

/// Which input table a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Files,
    Nodes,
}

impl Table {
    pub fn label(&self) -> &'static str {
        match self {
            Table::Files => "files",
            Table::Nodes => "nodes",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_label_uses_sentinel() {
        assert_eq!(Placement::Node("n1".to_string()).label("NONE"), "n1");
        assert_eq!(Placement::Unassignable.label("NONE"), "NONE");
        assert_eq!(Placement::Unassignable.to_string(), "NULL");
    }
}
