//! Caller-owned view state.
//!
//! Selection, edit-lock, and the active filter are UI concerns whose
//! source of truth must live with the caller — passed here by reference,
//! never held in a module-level singleton. Everything computed from it
//! is pure.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::filter::FilterSpec;
use crate::graph::{downstream_in, AdjacencyIndex};
use crate::model::{Connection, ConnectionId, Node, NodeId};

/// Ambient diagram state owned by the caller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewState {
    pub selected_node: Option<NodeId>,
    /// True when the diagram is read-only (viewer mode).
    pub locked: bool,
    pub filter: FilterSpec,
}

impl ViewState {
    pub fn select(&mut self, id: impl Into<NodeId>) {
        self.selected_node = Some(id.into());
    }

    pub fn clear_selection(&mut self) {
        self.selected_node = None;
    }

    /// Downstream highlight for the current selection: the reachable nodes
    /// that exist in the snapshot, plus every connection lying entirely
    /// within the highlighted region (selection included). Empty when
    /// nothing is selected.
    pub fn highlight(&self, nodes: &[Node], connections: &[Connection]) -> HighlightSet {
        let Some(selected) = &self.selected_node else {
            return HighlightSet::default();
        };

        let index = AdjacencyIndex::build(connections);
        let mut downstream_nodes = downstream_in(&index, selected);

        // Dangling connection targets are reachable but not renderable.
        let known: HashSet<&NodeId> = nodes.iter().map(Node::id).collect();
        downstream_nodes.retain(|id| known.contains(id));

        let downstream_connections: HashSet<ConnectionId> = connections
            .iter()
            .filter(|c| {
                let from_in =
                    c.from_node_id == *selected || downstream_nodes.contains(&c.from_node_id);
                let to_in = c.to_node_id == *selected || downstream_nodes.contains(&c.to_node_id);
                from_in && to_in
            })
            .map(|c| c.id.clone())
            .collect();

        HighlightSet {
            selected: Some(selected.clone()),
            downstream_nodes,
            downstream_connections,
        }
    }
}

/// Elements to render with the downstream visual treatment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HighlightSet {
    pub selected: Option<NodeId>,
    pub downstream_nodes: HashSet<NodeId>,
    pub downstream_connections: HashSet<ConnectionId>,
}
