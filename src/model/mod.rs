//! # Network Model
//!
//! Clean DTOs that define the medical-gas piping network.
//! These types cross every boundary: snapshot ↔ graph ↔ validation ↔ layout ↔ caller.
//!
//! Design rule: NO rendering types, NO persistence types here.
//! This module is pure data — no I/O, no state, no caching across calls.

pub mod ids;
pub mod geometry;
pub mod node;
pub mod connection;
pub mod hierarchy;
pub mod annotation;
pub mod snapshot;

pub use ids::{NodeId, ConnectionId, BuildingId, FloorId, ZoneId, AnnotationId};
pub use geometry::{Position, Size, Rect};
pub use node::{
    Node, NodeBase, NodeKind, GasType, ValveState,
    SourceNode, ValveNode, FittingNode,
};
pub use connection::Connection;
pub use hierarchy::{Building, Floor, Zone};
pub use annotation::{
    Annotation, AnnotationKind, AnnotationScope, AnnotationMetadata, CellKey,
};
pub use snapshot::Snapshot;
