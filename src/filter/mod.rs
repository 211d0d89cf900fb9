//! # Filter Engine
//!
//! Composable visibility filtering. Every criterion narrows the visible
//! node set (logical AND); the edge set is then closed over it: a
//! connection is visible iff both endpoints are.
//!
//! The all-default spec is the identity filter — it returns the complete
//! node and connection id sets unchanged.

use std::collections::BTreeSet;

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::model::{BuildingId, Connection, ConnectionId, GasType, Node, NodeId, NodeKind};

// ============================================================================
// Spec
// ============================================================================

/// Caller-supplied filter criteria. `Default` is the identity filter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Case-insensitive substring over name, gas-type string, and
    /// node-kind string.
    pub search_query: String,
    pub selected_gas_types: BTreeSet<GasType>,
    pub selected_node_kinds: BTreeSet<NodeKind>,
    pub selected_building_ids: BTreeSet<BuildingId>,
    /// Restrict to nodes touching zero connections.
    pub show_isolated_only: bool,
}

impl FilterSpec {
    pub fn is_identity(&self) -> bool {
        self.search_query.is_empty()
            && self.selected_gas_types.is_empty()
            && self.selected_node_kinds.is_empty()
            && self.selected_building_ids.is_empty()
            && !self.show_isolated_only
    }
}

/// Visible element ids after filtering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterResult {
    pub visible_node_ids: HashSet<NodeId>,
    pub visible_connection_ids: HashSet<ConnectionId>,
}

// ============================================================================
// apply_filters
// ============================================================================

/// Apply the spec over one snapshot.
pub fn apply_filters(nodes: &[Node], connections: &[Connection], spec: &FilterSpec) -> FilterResult {
    let mut visible: HashSet<NodeId> = nodes.iter().map(|n| n.id().clone()).collect();
    let by_id: HashMap<&NodeId, &Node> = nodes.iter().map(|n| (n.id(), n)).collect();

    if !spec.search_query.is_empty() {
        let query = spec.search_query.to_lowercase();
        visible.retain(|id| by_id.get(id).is_some_and(|n| matches_query(n, &query)));
    }

    if !spec.selected_gas_types.is_empty() {
        // A node passes on its own gas attribute, or because a pipe of a
        // selected gas ends at it — fittings inherit gas identity from
        // their pipes even when their own attribute is absent or differs.
        let mut gas_endpoints: HashSet<&NodeId> = HashSet::new();
        for conn in connections {
            if spec.selected_gas_types.contains(&conn.gas_type) {
                gas_endpoints.insert(&conn.from_node_id);
                gas_endpoints.insert(&conn.to_node_id);
            }
        }
        visible.retain(|id| {
            let own_gas = by_id
                .get(id)
                .and_then(|n| n.gas_type())
                .is_some_and(|g| spec.selected_gas_types.contains(&g));
            own_gas || gas_endpoints.contains(id)
        });
    }

    if !spec.selected_node_kinds.is_empty() {
        visible.retain(|id| {
            by_id
                .get(id)
                .is_some_and(|n| spec.selected_node_kinds.contains(&n.kind()))
        });
    }

    if !spec.selected_building_ids.is_empty() {
        visible.retain(|id| {
            by_id
                .get(id)
                .and_then(|n| n.base().building_id.as_ref())
                .is_some_and(|b| spec.selected_building_ids.contains(b))
        });
    }

    if spec.show_isolated_only {
        visible.retain(|id| !connections.iter().any(|c| c.touches(id)));
    }

    // Closure invariant: an edge is visible iff both endpoints survived.
    let visible_connection_ids: HashSet<ConnectionId> = connections
        .iter()
        .filter(|c| visible.contains(&c.from_node_id) && visible.contains(&c.to_node_id))
        .map(|c| c.id.clone())
        .collect();

    trace!(
        nodes = visible.len(),
        connections = visible_connection_ids.len(),
        "filter applied"
    );

    FilterResult {
        visible_node_ids: visible,
        visible_connection_ids,
    }
}

fn matches_query(node: &Node, query_lowercase: &str) -> bool {
    if node.name().to_lowercase().contains(query_lowercase) {
        return true;
    }
    if node.kind().as_str().contains(query_lowercase) {
        return true;
    }
    node.gas_type()
        .is_some_and(|g| g.as_str().contains(query_lowercase))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeBase, ValveState};

    fn mixed_network() -> (Vec<Node>, Vec<Connection>) {
        let nodes = vec![
            Node::source(NodeBase::new("s-o2", "O2 manifold").with_gas(GasType::Oxygen)),
            Node::valve(
                NodeBase::new("v-o2", "O2 riser valve")
                    .with_gas(GasType::Oxygen)
                    .with_building("b-east"),
                ValveState::Open,
            ),
            // Untyped fitting on the oxygen run: gas identity comes from the pipe.
            Node::fitting(NodeBase::new("f-tee", "Dist tee")),
            Node::source(NodeBase::new("s-vac", "Vacuum plant").with_gas(GasType::Vacuum)),
            Node::fitting(NodeBase::new("f-spare", "Spare elbow")),
        ];
        let conns = vec![
            Connection::new("c1", "s-o2", "v-o2", GasType::Oxygen),
            Connection::new("c2", "v-o2", "f-tee", GasType::Oxygen),
            Connection::new("c3", "s-vac", "f-tee", GasType::Vacuum),
        ];
        (nodes, conns)
    }

    #[test]
    fn test_identity_filter_returns_everything() {
        let (nodes, conns) = mixed_network();
        let spec = FilterSpec::default();
        assert!(spec.is_identity());

        let result = apply_filters(&nodes, &conns, &spec);
        assert_eq!(result.visible_node_ids.len(), nodes.len());
        assert_eq!(result.visible_connection_ids.len(), conns.len());
    }

    #[test]
    fn test_gas_filter_admits_untyped_pipe_endpoints() {
        let (nodes, conns) = mixed_network();
        let spec = FilterSpec {
            selected_gas_types: [GasType::Oxygen].into(),
            ..Default::default()
        };
        let result = apply_filters(&nodes, &conns, &spec);

        assert!(result.visible_node_ids.contains(&NodeId::from("s-o2")));
        assert!(result.visible_node_ids.contains(&NodeId::from("v-o2")));
        // f-tee has no gas attribute but terminates an oxygen pipe.
        assert!(result.visible_node_ids.contains(&NodeId::from("f-tee")));
        assert!(!result.visible_node_ids.contains(&NodeId::from("s-vac")));
        assert!(!result.visible_node_ids.contains(&NodeId::from("f-spare")));

        // The vacuum pipe into f-tee loses its other endpoint.
        assert!(!result.visible_connection_ids.contains(&ConnectionId::from("c3")));
        assert_eq!(result.visible_connection_ids.len(), 2);
    }

    #[test]
    fn test_search_query_is_case_insensitive() {
        let (nodes, conns) = mixed_network();
        let spec = FilterSpec {
            search_query: "RISER".into(),
            ..Default::default()
        };
        let result = apply_filters(&nodes, &conns, &spec);
        assert_eq!(result.visible_node_ids.len(), 1);
        assert!(result.visible_node_ids.contains(&NodeId::from("v-o2")));
    }

    #[test]
    fn test_search_matches_gas_and_kind_strings() {
        let (nodes, conns) = mixed_network();

        let by_gas = apply_filters(
            &nodes,
            &conns,
            &FilterSpec { search_query: "vacuum".into(), ..Default::default() },
        );
        assert!(by_gas.visible_node_ids.contains(&NodeId::from("s-vac")));

        let by_kind = apply_filters(
            &nodes,
            &conns,
            &FilterSpec { search_query: "valve".into(), ..Default::default() },
        );
        assert!(by_kind.visible_node_ids.contains(&NodeId::from("v-o2")));
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let (nodes, conns) = mixed_network();
        let spec = FilterSpec {
            selected_gas_types: [GasType::Oxygen].into(),
            selected_building_ids: ["b-east".into()].into(),
            ..Default::default()
        };
        let result = apply_filters(&nodes, &conns, &spec);
        // Only v-o2 is both on the oxygen run and in the east building.
        assert_eq!(result.visible_node_ids.len(), 1);
        assert!(result.visible_node_ids.contains(&NodeId::from("v-o2")));
        assert!(result.visible_connection_ids.is_empty());
    }

    #[test]
    fn test_isolated_only() {
        let (nodes, conns) = mixed_network();
        let spec = FilterSpec { show_isolated_only: true, ..Default::default() };
        let result = apply_filters(&nodes, &conns, &spec);
        assert_eq!(result.visible_node_ids.len(), 1);
        assert!(result.visible_node_ids.contains(&NodeId::from("f-spare")));
        assert!(result.visible_connection_ids.is_empty());
    }

    #[test]
    fn test_closure_invariant() {
        let (nodes, conns) = mixed_network();
        let spec = FilterSpec {
            selected_node_kinds: [NodeKind::Source, NodeKind::Valve].into(),
            ..Default::default()
        };
        let result = apply_filters(&nodes, &conns, &spec);
        for conn in &conns {
            if result.visible_connection_ids.contains(&conn.id) {
                assert!(result.visible_node_ids.contains(&conn.from_node_id));
                assert!(result.visible_node_ids.contains(&conn.to_node_id));
            }
        }
        // c2 and c3 end at f-tee (a fitting), so only c1 survives.
        assert_eq!(result.visible_connection_ids.len(), 1);
    }
}
