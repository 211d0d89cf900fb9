//! # Network Validator
//!
//! Structural and semantic checks over one snapshot. Pure and stateless:
//! re-run on every edit for live feedback.
//!
//! Data-quality defects are never errors in the Rust sense — every finding
//! comes back as a typed, non-fatal [`Issue`]. All five checks run
//! unconditionally and independently of each other.

pub mod stats;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Connection, ConnectionId, Node, NodeId};

pub use stats::{statistics, NetworkStats};

// ============================================================================
// Issue
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// One validation finding, tagged with the graph elements it concerns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_node_ids: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_connection_ids: Vec<ConnectionId>,
}

impl Issue {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            affected_node_ids: Vec::new(),
            affected_connection_ids: Vec::new(),
        }
    }

    fn with_nodes(mut self, ids: Vec<NodeId>) -> Self {
        self.affected_node_ids = ids;
        self
    }

    fn with_connections(mut self, ids: Vec<ConnectionId>) -> Self {
        self.affected_connection_ids = ids;
        self
    }
}

// ============================================================================
// validate
// ============================================================================

/// Run every check over the snapshot. Issue order is deterministic:
/// checks in declaration order, aggregates in first-seen input order.
pub fn validate(nodes: &[Node], connections: &[Connection]) -> Vec<Issue> {
    let mut issues = Vec::new();

    check_isolated_nodes(nodes, connections, &mut issues);
    check_gas_mismatch(nodes, connections, &mut issues);
    check_unnamed_nodes(nodes, &mut issues);
    check_duplicate_connections(connections, &mut issues);
    check_missing_diameter(connections, &mut issues);

    debug!(issues = issues.len(), "validation pass complete");
    issues
}

/// Check 1: nodes touching zero connections, aggregated into one warning.
fn check_isolated_nodes(nodes: &[Node], connections: &[Connection], issues: &mut Vec<Issue>) {
    let isolated: Vec<NodeId> = nodes
        .iter()
        .filter(|n| !connections.iter().any(|c| c.touches(n.id())))
        .map(|n| n.id().clone())
        .collect();

    if !isolated.is_empty() {
        issues.push(
            Issue::new(
                Severity::Warning,
                format!("{} node(s) have no pipe connections", isolated.len()),
            )
            .with_nodes(isolated),
        );
    }
}

/// Check 2: connection gas differs from an endpoint's gas. Each endpoint is
/// checked independently, so one connection can yield up to two errors.
/// Endpoints with no gas attribute of their own are not mismatches.
fn check_gas_mismatch(nodes: &[Node], connections: &[Connection], issues: &mut Vec<Issue>) {
    let by_id: HashMap<&NodeId, &Node> = nodes.iter().map(|n| (n.id(), n)).collect();

    for conn in connections {
        for endpoint in [&conn.from_node_id, &conn.to_node_id] {
            let Some(node) = by_id.get(endpoint) else { continue };
            let Some(node_gas) = node.gas_type() else { continue };
            if node_gas != conn.gas_type {
                issues.push(
                    Issue::new(
                        Severity::Error,
                        format!(
                            "pipe {} carries {} but node {} is rated for {}",
                            conn.id, conn.gas_type, endpoint, node_gas
                        ),
                    )
                    .with_nodes(vec![(*endpoint).clone()])
                    .with_connections(vec![conn.id.clone()]),
                );
            }
        }
    }
}

/// Check 3: empty or whitespace-only names, aggregated.
fn check_unnamed_nodes(nodes: &[Node], issues: &mut Vec<Issue>) {
    let unnamed: Vec<NodeId> = nodes
        .iter()
        .filter(|n| n.name().trim().is_empty())
        .map(|n| n.id().clone())
        .collect();

    if !unnamed.is_empty() {
        issues.push(
            Issue::new(
                Severity::Info,
                format!("{} node(s) are unnamed", unnamed.len()),
            )
            .with_nodes(unnamed),
        );
    }
}

/// Check 4: two or more edges over the same unordered endpoint pair.
/// One warning per pair, listing every duplicate connection id.
fn check_duplicate_connections(connections: &[Connection], issues: &mut Vec<Issue>) {
    let mut by_pair: HashMap<(NodeId, NodeId), Vec<ConnectionId>> = HashMap::new();
    let mut pair_order: Vec<(NodeId, NodeId)> = Vec::new();

    for conn in connections {
        let key = conn.unordered_key();
        let entry = by_pair.entry(key.clone()).or_default();
        if entry.is_empty() {
            pair_order.push(key);
        }
        entry.push(conn.id.clone());
    }

    for pair in pair_order {
        let ids = &by_pair[&pair];
        if ids.len() >= 2 {
            issues.push(
                Issue::new(
                    Severity::Warning,
                    format!(
                        "{} parallel pipes between {} and {}",
                        ids.len(),
                        pair.0,
                        pair.1
                    ),
                )
                .with_nodes(vec![pair.0.clone(), pair.1.clone()])
                .with_connections(ids.clone()),
            );
        }
    }
}

/// Check 5: connections without a diameter, aggregated.
fn check_missing_diameter(connections: &[Connection], issues: &mut Vec<Issue>) {
    let missing: Vec<ConnectionId> = connections
        .iter()
        .filter(|c| c.diameter_mm.is_none())
        .map(|c| c.id.clone())
        .collect();

    if !missing.is_empty() {
        issues.push(
            Issue::new(
                Severity::Info,
                format!("{} pipe(s) have no diameter recorded", missing.len()),
            )
            .with_connections(missing),
        );
    }
}

// ============================================================================
// Tests
// ============================================================================
