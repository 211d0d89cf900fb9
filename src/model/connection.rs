//! Connection — a directed pipe segment between two nodes.

use serde::{Deserialize, Serialize};

use super::{ConnectionId, GasType, NodeId};

/// A directed pipe segment. Flow runs `from_node_id` → `to_node_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: ConnectionId,
    pub from_node_id: NodeId,
    pub to_node_id: NodeId,
    pub gas_type: GasType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter_mm: Option<f64>,
}

impl Connection {
    pub fn new(
        id: impl Into<ConnectionId>,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        gas_type: GasType,
    ) -> Self {
        Self {
            id: id.into(),
            from_node_id: from.into(),
            to_node_id: to.into(),
            gas_type,
            diameter_mm: None,
        }
    }

    pub fn with_diameter(mut self, mm: f64) -> Self {
        self.diameter_mm = Some(mm);
        self
    }

    pub fn touches(&self, node: &NodeId) -> bool {
        self.from_node_id == *node || self.to_node_id == *node
    }

    pub fn is_self_loop(&self) -> bool {
        self.from_node_id == self.to_node_id
    }

    /// Endpoint pair with the direction normalized away, for duplicate detection.
    pub fn unordered_key(&self) -> (NodeId, NodeId) {
        if self.from_node_id <= self.to_node_id {
            (self.from_node_id.clone(), self.to_node_id.clone())
        } else {
            (self.to_node_id.clone(), self.from_node_id.clone())
        }
    }
}
