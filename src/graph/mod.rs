//! # Graph Model
//!
//! Directed adjacency over the connection list. Built in one O(E) pass,
//! used per call, never cached across snapshots.
//!
//! No dangling-reference validation happens here: a connection pointing at
//! a node absent from the snapshot simply contributes a neighbor that has
//! no further neighbors of its own.

pub mod downstream;
pub mod impact;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::model::{Connection, NodeId};

pub use downstream::{downstream, downstream_in};
pub use impact::{valve_impact, ImpactReport};

/// Directed adjacency map `node id → downstream neighbor ids`.
///
/// Most equipment has a handful of outgoing pipes, so neighbor lists are
/// inline up to four entries.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    out: HashMap<NodeId, SmallVec<[NodeId; 4]>>,
}

impl AdjacencyIndex {
    /// Build the index from a connection list. O(E).
    pub fn build(connections: &[Connection]) -> Self {
        let mut out: HashMap<NodeId, SmallVec<[NodeId; 4]>> = HashMap::new();
        for conn in connections {
            out.entry(conn.from_node_id.clone())
                .or_default()
                .push(conn.to_node_id.clone());
        }
        Self { out }
    }

    /// Downstream neighbors of the given node. Unknown ids have none.
    pub fn neighbors(&self, node: &NodeId) -> &[NodeId] {
        self.out.get(node).map_or(&[], |v| v.as_slice())
    }

    /// Number of nodes with at least one outgoing connection.
    pub fn source_count(&self) -> usize {
        self.out.len()
    }
}
