//! Shared types for the cluster health-check report pipeline.
//!
//! This crate provides the foundational types used across the workspace:
//! - Resource records as decoded from the dashboard read API
//! - Node condition state with a first-match-wins scan
//! - Output format specifications for the CLI

pub mod output;
pub mod resources;

pub use output::OutputFormat;
pub use resources::{
    ClaimList, Condition, ConditionKind, ConditionScan, ConditionState, Event, EventList,
    LogDetails, LogLine, Namespace, NamespaceList, NodeAddress, NodeDetail, NodeInfo, NodeList,
    NodeSummary, ObjectMeta, PersistentVolumeClaim, Pod, PodList, Taint,
};

/// Sub-object kind carried by events that refer to a persistent volume claim.
pub const CLAIM_OBJECT_KIND: &str = "PersistentVolumeClaim";

/// Address type selected when rendering node IPs.
pub const INTERNAL_IP: &str = "InternalIP";
