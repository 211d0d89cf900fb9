//! # gasnet-core — Medical-Gas Network Computation Core
//!
//! Pure graph computations over a snapshot of a medical-gas piping
//! network: downstream impact analysis, structural validation with
//! aggregate statistics, composable visibility filtering, and
//! hierarchy-aware auto-layout.
//!
//! ## Design Principles
//!
//! 1. **Pure transforms**: every entry point is a stateless function over
//!    a read-only snapshot — no I/O, no caching, no internal state
//! 2. **Clean DTOs**: `Node`, `Connection`, `Annotation` cross all
//!    boundaries; rendering and persistence live with the caller
//! 3. **Data problems are findings, not failures**: dangling references,
//!    gas mismatches, and missing hierarchy degrade or report as typed
//!    [`Issue`]s — only caller contract violations return `Err`
//! 4. **Deterministic output**: identical snapshot in, identical
//!    positions, partitions, and annotation ids out
//!
//! ## Quick Start
//!
//! ```rust
//! use gasnet_core::{downstream, Connection, GasType, Node, NodeBase, NodeId, ValveState};
//!
//! let nodes = vec![
//!     Node::source(NodeBase::new("s1", "O2 manifold").with_gas(GasType::Oxygen)),
//!     Node::valve(NodeBase::new("v1", "Riser valve"), ValveState::Open),
//! ];
//! let pipes = vec![Connection::new("c1", "s1", "v1", GasType::Oxygen)];
//!
//! let affected = downstream(nodes[0].id(), &pipes);
//! assert!(affected.contains(&NodeId::from("v1")));
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod graph;
pub mod validate;
pub mod filter;
pub mod layout;
pub mod view;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Node, NodeBase, NodeKind, GasType, ValveState,
    SourceNode, ValveNode, FittingNode,
    Connection, Building, Floor, Zone,
    Annotation, AnnotationKind, AnnotationScope, AnnotationMetadata, CellKey,
    Position, Size, Rect, Snapshot,
    NodeId, ConnectionId, BuildingId, FloorId, ZoneId, AnnotationId,
};

// ============================================================================
// Re-exports: Computations
// ============================================================================

pub use graph::{downstream, downstream_in, valve_impact, AdjacencyIndex, ImpactReport};
pub use validate::{validate, statistics, Issue, NetworkStats, Severity};
pub use filter::{apply_filters, FilterResult, FilterSpec};
pub use layout::{apply_auto_layout, reconcile_annotations, LayoutConfig, LayoutResult};
pub use view::{HighlightSet, ViewState};

// ============================================================================
// Error Types
// ============================================================================

/// Caller contract violations. Data-quality problems never land here —
/// they come back as [`Issue`]s or degrade to unassigned buckets.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown gas type: {0:?}")]
    UnknownGasType(String),

    #[error("unknown node kind: {0:?}")]
    UnknownNodeKind(String),

    #[error("invalid layout config: {0}")]
    InvalidLayoutConfig(String),

    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
