//! Downstream reachability — BFS along pipe flow direction.

use std::collections::VecDeque;

use hashbrown::HashSet;

use crate::model::{Connection, NodeId};

use super::AdjacencyIndex;

/// All nodes reachable from `start` by following connections in their flow
/// direction. The start node itself is never included.
///
/// Cycle-safe: the visited set is seeded with the start id, so cycles and
/// self-loops terminate without special-casing. Unknown or unreachable
/// start ids yield the empty set — absence of impact is a valid result,
/// not an error.
pub fn downstream(start: &NodeId, connections: &[Connection]) -> HashSet<NodeId> {
    downstream_in(&AdjacencyIndex::build(connections), start)
}

/// Index-reusing form of [`downstream`], for callers that run several
/// traversals over one snapshot.
pub fn downstream_in(index: &AdjacencyIndex, start: &NodeId) -> HashSet<NodeId> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    visited.insert(start.clone());

    let mut queue: VecDeque<NodeId> = VecDeque::new();
    queue.push_back(start.clone());

    let mut reached: HashSet<NodeId> = HashSet::new();

    while let Some(current) = queue.pop_front() {
        for next in index.neighbors(&current) {
            if visited.insert(next.clone()) {
                reached.insert(next.clone());
                queue.push_back(next.clone());
            }
        }
    }

    reached
}
