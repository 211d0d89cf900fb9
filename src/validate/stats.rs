//! Aggregate metrics over one snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Connection, GasType, Node, NodeId, NodeKind};

/// Network-wide aggregate metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    pub node_count: usize,
    pub connection_count: usize,
    pub nodes_by_kind: BTreeMap<NodeKind, usize>,
    /// Histogram over nodes that carry a gas attribute; untyped fittings
    /// are not counted here.
    pub nodes_by_gas: BTreeMap<GasType, usize>,
    pub isolated_node_ids: Vec<NodeId>,
    /// `2·E / V`, 0 for an empty snapshot.
    pub average_degree: f64,
    /// `E / (V·(V−1)/2)`, 0 when fewer than two nodes.
    ///
    /// E is the raw directed edge count: duplicates are not deduped and
    /// direction is not halved, so parallel pipes can push this past 1.0.
    /// Treat it as a load indicator, not a probability.
    pub network_density: f64,
}

/// Compute aggregate metrics. Pure, linear in `|nodes| + |connections|`
/// apart from the isolated-node scan.
pub fn statistics(nodes: &[Node], connections: &[Connection]) -> NetworkStats {
    let node_count = nodes.len();
    let connection_count = connections.len();

    let mut nodes_by_kind: BTreeMap<NodeKind, usize> = BTreeMap::new();
    let mut nodes_by_gas: BTreeMap<GasType, usize> = BTreeMap::new();
    for node in nodes {
        *nodes_by_kind.entry(node.kind()).or_default() += 1;
        if let Some(gas) = node.gas_type() {
            *nodes_by_gas.entry(gas).or_default() += 1;
        }
    }

    let mut isolated_node_ids: Vec<NodeId> = nodes
        .iter()
        .filter(|n| !connections.iter().any(|c| c.touches(n.id())))
        .map(|n| n.id().clone())
        .collect();
    isolated_node_ids.sort();

    let average_degree = if node_count == 0 {
        0.0
    } else {
        2.0 * connection_count as f64 / node_count as f64
    };

    let network_density = if node_count < 2 {
        0.0
    } else {
        let possible_pairs = node_count as f64 * (node_count as f64 - 1.0) / 2.0;
        connection_count as f64 / possible_pairs
    };

    NetworkStats {
        node_count,
        connection_count,
        nodes_by_kind,
        nodes_by_gas,
        isolated_node_ids,
        average_degree,
        network_density,
    }
}
