//! Snapshot — the read-only `{nodes, connections}` view supplied per call.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::{Connection, Node, NodeId};
use crate::Result;

/// A flat snapshot of the network, owned and mutated by the external
/// persistence collaborator. This core only reads it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}

impl Snapshot {
    pub fn new(nodes: Vec<Node>, connections: Vec<Connection>) -> Self {
        Self { nodes, connections }
    }

    /// Parse the collaborator's JSON payload. Malformed input is a caller
    /// contract violation and fails fast.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Per-call id → node index. Built fresh each time; nothing is cached
    /// across invocations.
    pub fn node_by_id(&self) -> HashMap<&NodeId, &Node> {
        self.nodes.iter().map(|n| (n.id(), n)).collect()
    }
}
