//! Placement engine — greedy largest-first distribution.
//!
//! Each round sorts the still-unbound files by size and the nodes by
//! remaining space, both descending, then walks the two views in lock-step:
//! the i-th largest file goes to the i-th roomiest node if it fits. When the
//! largest file does not fit the roomiest node it can never fit anywhere
//! (space only shrinks), so it is marked unassignable and the round ends
//! early. Rounds repeat until every file is resolved.
//!
//! Ties in size or remaining space keep input order.

use std::cmp::Reverse;

use tracing::{debug, info, warn};

use distrib_core::{Item, Node, Placement};

use crate::plan::{Allocation, Assignment, NodeUsage};

/// Distribute `items` over `nodes`.
///
/// Total over its input: every item comes back exactly once, either bound
/// to a node or [`Placement::Unassignable`].
pub fn allocate(items: &[Item], nodes: &[Node]) -> Allocation {
    let mut remaining: Vec<u64> = nodes.iter().map(|n| n.capacity).collect();
    let mut bound: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut placements: Vec<Option<Placement>> = vec![None; items.len()];
    let mut unbound: Vec<usize> = (0..items.len()).collect();
    let mut rounds = 0;

    while !unbound.is_empty() {
        rounds += 1;

        if nodes.is_empty() {
            for &i in &unbound {
                warn!(file = %items[i].id, size = items[i].size, "no nodes to place file on");
                placements[i] = Some(Placement::Unassignable);
            }
            unbound.clear();
            break;
        }

        unbound.sort_by_key(|&i| (Reverse(items[i].size), i));
        let mut node_order: Vec<usize> = (0..nodes.len()).collect();
        node_order.sort_by_key(|&n| (Reverse(remaining[n]), n));

        let mut bound_this_round = 0;
        for (pos, (&i, &n)) in unbound.iter().zip(&node_order).enumerate() {
            let item = &items[i];
            if remaining[n] >= item.size {
                remaining[n] -= item.size;
                bound[n].push(i);
                placements[i] = Some(Placement::Node(nodes[n].id.clone()));
                bound_this_round += 1;
            } else if pos == 0 {
                warn!(
                    file = %item.id,
                    size = item.size,
                    largest_space = remaining[n],
                    "file does not fit on any node"
                );
                placements[i] = Some(Placement::Unassignable);
                break;
            }
        }

        unbound.retain(|&i| placements[i].is_none());
        debug!(
            round = rounds,
            bound = bound_this_round,
            unbound = unbound.len(),
            "allocation round finished"
        );
    }

    let assignments: Vec<Assignment> = items
        .iter()
        .zip(placements)
        .map(|(item, placement)| Assignment {
            item_id: item.id.clone(),
            size: item.size,
            placement: placement.unwrap_or(Placement::Unassignable),
        })
        .collect();

    let usage: Vec<NodeUsage> = nodes
        .iter()
        .zip(remaining)
        .zip(bound)
        .map(|((node, remaining), bound)| NodeUsage {
            node_id: node.id.clone(),
            capacity: node.capacity,
            remaining,
            items: bound.into_iter().map(|i| items[i].id.clone()).collect(),
        })
        .collect();

    let allocation = Allocation {
        assignments,
        nodes: usage,
        rounds,
    };

    info!(
        files = items.len(),
        nodes = nodes.len(),
        placed = allocation.placed_count(),
        unassignable = items.len() - allocation.placed_count(),
        rounds,
        "allocation complete"
    );

    allocation
}
