//! Valve-shutoff impact analysis.
//!
//! Partitions the downstream set of a selected valve by hierarchy so the
//! caller can answer "which wards lose supply if this closes", and counts
//! downstream valves as the critical-chain indicator (closing this valve
//! cascades into other shutoff points).

use std::collections::BTreeMap;

use tracing::debug;

use crate::model::{BuildingId, Connection, FloorId, Node, NodeId, ZoneId};

use super::{downstream_in, AdjacencyIndex};

/// Downstream impact of closing one valve (or any node).
///
/// Partition maps key on the hierarchy reference; the `None` key collects
/// downstream equipment with that reference unassigned. Member lists are
/// sorted by id, so the report is deterministic for a given snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactReport {
    pub node_id: NodeId,
    pub downstream_count: usize,
    /// Downstream nodes that are themselves valves.
    pub critical_chain: usize,
    pub by_building: BTreeMap<Option<BuildingId>, Vec<NodeId>>,
    pub by_floor: BTreeMap<Option<FloorId>, Vec<NodeId>>,
    pub by_zone: BTreeMap<Option<ZoneId>, Vec<NodeId>>,
}

impl ImpactReport {
    /// Zero downstream equipment — closing here affects nothing.
    pub fn is_safe_to_close(&self) -> bool {
        self.downstream_count == 0
    }
}

/// Compute the impact report for the given node over one snapshot.
///
/// Downstream ids that reference nodes absent from the snapshot (dangling
/// connection targets) are counted but land in the unassigned partitions.
pub fn valve_impact(node_id: &NodeId, nodes: &[Node], connections: &[Connection]) -> ImpactReport {
    let index = AdjacencyIndex::build(connections);
    let reached = downstream_in(&index, node_id);

    let by_id: hashbrown::HashMap<&NodeId, &Node> =
        nodes.iter().map(|n| (n.id(), n)).collect();

    let mut by_building: BTreeMap<Option<BuildingId>, Vec<NodeId>> = BTreeMap::new();
    let mut by_floor: BTreeMap<Option<FloorId>, Vec<NodeId>> = BTreeMap::new();
    let mut by_zone: BTreeMap<Option<ZoneId>, Vec<NodeId>> = BTreeMap::new();
    let mut critical_chain = 0usize;

    for id in &reached {
        let node = by_id.get(id).copied();
        if node.is_some_and(Node::is_valve) {
            critical_chain += 1;
        }
        let base = node.map(Node::base);
        by_building
            .entry(base.and_then(|b| b.building_id.clone()))
            .or_default()
            .push(id.clone());
        by_floor
            .entry(base.and_then(|b| b.floor_id.clone()))
            .or_default()
            .push(id.clone());
        by_zone
            .entry(base.and_then(|b| b.zone_id.clone()))
            .or_default()
            .push(id.clone());
    }

    for members in by_building
        .values_mut()
        .chain(by_floor.values_mut())
        .chain(by_zone.values_mut())
    {
        members.sort();
    }

    debug!(
        node = %node_id,
        downstream = reached.len(),
        critical_chain,
        "valve impact computed"
    );

    ImpactReport {
        node_id: node_id.clone(),
        downstream_count: reached.len(),
        critical_chain,
        by_building,
        by_floor,
        by_zone,
    }
}
