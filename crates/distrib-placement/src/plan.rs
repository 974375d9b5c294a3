//! Allocation result types.

use serde::{Deserialize, Serialize};

use distrib_core::Placement;

/// Final state of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub item_id: String,
    pub size: u64,
    pub placement: Placement,
}

/// Final state of one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeUsage {
    pub node_id: String,
    pub capacity: u64,
    pub remaining: u64,
    /// Ids of the files bound to this node, in binding order.
    pub items: Vec<String>,
}

impl NodeUsage {
    pub fn used(&self) -> u64 {
        self.capacity - self.remaining
    }

    /// Fraction of capacity in use, 0.0 for zero-capacity nodes.
    pub fn utilization(&self) -> f64 {
        if self.capacity > 0 {
            self.used() as f64 / self.capacity as f64
        } else {
            0.0
        }
    }
}

/// Outcome of one [`allocate`](crate::allocate) call.
///
/// `assignments` follows the input order of the files and `nodes` the
/// input order of the nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub assignments: Vec<Assignment>,
    pub nodes: Vec<NodeUsage>,
    /// Number of sort-and-match rounds the allocation took.
    pub rounds: usize,
}

impl Allocation {
    pub fn placed_count(&self) -> usize {
        self.assignments
            .iter()
            .filter(|a| !a.placement.is_unassignable())
            .count()
    }

    pub fn unassignable(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.placement.is_unassignable())
    }

    pub fn assignment(&self, item_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.item_id == item_id)
    }

    pub fn node(&self, node_id: &str) -> Option<&NodeUsage> {
        self.nodes.iter().find(|n| n.node_id == node_id)
    }

    /// Sizes of the files bound to `node`, in binding order.
    pub fn item_sizes<'a>(&'a self, node: &'a NodeUsage) -> impl Iterator<Item = (&'a str, u64)> + 'a {
        node.items.iter().filter_map(move |id| {
            self.assignment(id).map(|a| (a.item_id.as_str(), a.size))
        })
    }
}
