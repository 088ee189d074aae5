//! Resource records decoded from the dashboard read API.
//!
//! Every record is a read-only snapshot. Fields default when absent so a
//! sparse response still decodes; the report layer decides which empty values
//! deserve a sentinel. Collections reported as `null` decode as empty.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Decode an explicit `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Identity shared by every resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectMeta {
    /// Resource name.
    pub name: String,
    /// Owning namespace (empty for cluster-scoped resources).
    pub namespace: String,
    /// Label map. Iteration order carries no meaning.
    #[serde(deserialize_with = "null_as_default")]
    pub labels: HashMap<String, String>,
    /// Creation timestamp as reported by the API.
    pub creation_timestamp: Option<String>,
}

// ============================================================================
// Namespaces
// ============================================================================

/// A namespace entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Namespace {
    #[serde(deserialize_with = "null_as_default")]
    pub object_meta: ObjectMeta,
    /// Namespace phase (`Active`, `Terminating`).
    pub phase: String,
}

/// Response of the namespace collection endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamespaceList {
    #[serde(deserialize_with = "null_as_default")]
    pub namespaces: Vec<Namespace>,
}

impl NamespaceList {
    /// Whether a namespace with exactly this name is listed.
    pub fn contains(&self, name: &str) -> bool {
        self.namespaces.iter().any(|ns| ns.object_meta.name == name)
    }
}

// ============================================================================
// Pods
// ============================================================================

/// A pod as listed within a namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pod {
    #[serde(deserialize_with = "null_as_default")]
    pub object_meta: ObjectMeta,
    /// Pod status (`Running`, `Pending`, ...).
    pub status: String,
    /// Images of the pod's containers, in spec order.
    #[serde(deserialize_with = "null_as_default")]
    pub container_images: Vec<String>,
    /// Node the pod is scheduled on; empty when unscheduled.
    pub node_name: String,
    /// Total container restarts.
    pub restart_count: i64,
}

/// Response of the pod collection endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PodList {
    #[serde(deserialize_with = "null_as_default")]
    pub pods: Vec<Pod>,
}

/// One line of container output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogLine {
    pub timestamp: String,
    pub content: String,
}

/// Response of the log endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogDetails {
    #[serde(deserialize_with = "null_as_default")]
    pub logs: Vec<LogLine>,
}

// ============================================================================
// Events
// ============================================================================

/// A cluster event.
///
/// `object_kind`/`object_name` reference the sub-object the event is about;
/// claim pages filter on them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    #[serde(deserialize_with = "null_as_default")]
    pub object_meta: ObjectMeta,
    pub message: String,
    pub reason: String,
    /// `Normal` or `Warning`.
    #[serde(rename = "type")]
    pub event_type: String,
    pub count: i64,
    pub source_component: String,
    pub object_kind: String,
    pub object_name: String,
    pub object_namespace: String,
    pub first_seen: Option<String>,
    pub last_seen: Option<String>,
}

/// Response of the event endpoints. Order is the feed order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventList {
    #[serde(deserialize_with = "null_as_default")]
    pub events: Vec<Event>,
}

// ============================================================================
// Nodes
// ============================================================================

/// A node as listed cluster-wide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeSummary {
    #[serde(deserialize_with = "null_as_default")]
    pub object_meta: ObjectMeta,
    /// Readiness as reported in the listing (`True`, `False`, `Unknown`).
    pub ready: String,
}

/// Response of the node collection endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeList {
    #[serde(deserialize_with = "null_as_default")]
    pub nodes: Vec<NodeSummary>,
}

/// A node condition entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Condition {
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub reason: String,
    pub message: String,
}

/// A node network address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeAddress {
    #[serde(rename = "type")]
    pub kind: String,
    pub address: String,
}

/// A node taint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Taint {
    pub key: String,
    pub value: String,
    pub effect: String,
}

/// System information reported by the kubelet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeInfo {
    pub os_image: String,
    pub kernel_version: String,
    pub kubelet_version: String,
    pub architecture: String,
}

/// Response of the node detail endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeDetail {
    #[serde(deserialize_with = "null_as_default")]
    pub object_meta: ObjectMeta,
    pub ready: String,
    pub unschedulable: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub conditions: Vec<Condition>,
    #[serde(deserialize_with = "null_as_default")]
    pub addresses: Vec<NodeAddress>,
    #[serde(deserialize_with = "null_as_default")]
    pub taints: Vec<Taint>,
    #[serde(deserialize_with = "null_as_default")]
    pub node_info: NodeInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub event_list: EventList,
}

// ============================================================================
// Persistent volume claims
// ============================================================================

/// A persistent volume claim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistentVolumeClaim {
    #[serde(deserialize_with = "null_as_default")]
    pub object_meta: ObjectMeta,
    /// Claim phase (`Bound`, `Pending`, `Lost`).
    pub status: String,
    /// Bound volume name; empty while pending.
    pub volume: String,
    pub storage_class: Option<String>,
    /// Requested resources, e.g. `storage -> 10Gi`.
    #[serde(deserialize_with = "null_as_default")]
    pub capacity: BTreeMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    pub access_modes: Vec<String>,
}

/// Response of the claim collection endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimList {
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<PersistentVolumeClaim>,
}

// ============================================================================
// Conditions
// ============================================================================

/// Well-known condition kinds rendered on node pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionKind {
    MemoryPressure,
    DiskPressure,
    #[serde(rename = "PIDPressure")]
    PidPressure,
    Ready,
    NetworkUnavailable,
}

impl ConditionKind {
    /// All kinds, in the order they are scanned for.
    pub const ALL: [ConditionKind; 5] = [
        ConditionKind::MemoryPressure,
        ConditionKind::DiskPressure,
        ConditionKind::PidPressure,
        ConditionKind::Ready,
        ConditionKind::NetworkUnavailable,
    ];

    /// Condition type string used by the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionKind::MemoryPressure => "MemoryPressure",
            ConditionKind::DiskPressure => "DiskPressure",
            ConditionKind::PidPressure => "PIDPressure",
            ConditionKind::Ready => "Ready",
            ConditionKind::NetworkUnavailable => "NetworkUnavailable",
        }
    }

    fn index(&self) -> usize {
        match self {
            ConditionKind::MemoryPressure => 0,
            ConditionKind::DiskPressure => 1,
            ConditionKind::PidPressure => 2,
            ConditionKind::Ready => 3,
            ConditionKind::NetworkUnavailable => 4,
        }
    }
}

impl std::fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tri-state condition status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConditionState {
    True,
    False,
    /// Reported as unknown, unrecognized, or not reported at all.
    #[default]
    Unknown,
}

impl ConditionState {
    /// Parse an API status string. Anything other than `True`/`False` is unknown.
    pub fn from_status(status: &str) -> Self {
        match status {
            "True" => ConditionState::True,
            "False" => ConditionState::False,
            _ => ConditionState::Unknown,
        }
    }
}

impl std::fmt::Display for ConditionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionState::True => write!(f, "True"),
            ConditionState::False => write!(f, "False"),
            ConditionState::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Result of scanning a condition set.
///
/// The first condition of each well-known kind wins. Later entries of the same
/// kind are recorded in `duplicates` and otherwise ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionScan {
    states: [Option<ConditionState>; 5],
    duplicates: Vec<ConditionKind>,
}

impl ConditionScan {
    /// Scan conditions in order.
    pub fn scan(conditions: &[Condition]) -> Self {
        let mut result = ConditionScan::default();
        for condition in conditions {
            let Some(kind) = ConditionKind::ALL
                .into_iter()
                .find(|kind| kind.as_str() == condition.kind)
            else {
                continue;
            };
            let slot = &mut result.states[kind.index()];
            if slot.is_some() {
                if !result.duplicates.contains(&kind) {
                    result.duplicates.push(kind);
                }
                continue;
            }
            *slot = Some(ConditionState::from_status(&condition.status));
        }
        result
    }

    /// State of `kind`; `Unknown` when the node did not report it.
    pub fn state(&self, kind: ConditionKind) -> ConditionState {
        self.states[kind.index()].unwrap_or_default()
    }

    /// Kinds that appeared more than once, in first-duplicate order.
    pub fn duplicates(&self) -> &[ConditionKind] {
        &self.duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn condition(kind: &str, status: &str) -> Condition {
        Condition {
            kind: kind.to_string(),
            status: status.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_pod_list_decodes_dashboard_shape() {
        let body = json!({
            "listMeta": {"totalItems": 1},
            "pods": [{
                "objectMeta": {"name": "web-1", "namespace": "default", "labels": {"app": "web"}},
                "typeMeta": {"kind": "pod"},
                "status": "Running",
                "containerImages": ["nginx:1.25"],
                "nodeName": "node-a"
            }]
        });
        let list: PodList = serde_json::from_value(body).unwrap();
        assert_eq!(list.pods.len(), 1);
        let pod = &list.pods[0];
        assert_eq!(pod.object_meta.name, "web-1");
        assert_eq!(pod.object_meta.labels.get("app").map(String::as_str), Some("web"));
        assert_eq!(pod.container_images, vec!["nginx:1.25"]);
        assert_eq!(pod.node_name, "node-a");
    }

    #[test]
    fn test_sparse_records_decode_to_defaults() {
        let detail: NodeDetail = serde_json::from_value(json!({})).unwrap();
        assert!(detail.conditions.is_empty());
        assert!(!detail.unschedulable);

        let claim: PersistentVolumeClaim =
            serde_json::from_value(json!({"objectMeta": {"name": "data"}})).unwrap();
        assert_eq!(claim.object_meta.name, "data");
        assert!(claim.storage_class.is_none());
    }

    #[test]
    fn test_null_collections_decode_as_empty() {
        let list: PodList = serde_json::from_value(json!({
            "pods": [{
                "objectMeta": {"name": "init-only", "labels": null},
                "status": "Pending",
                "containerImages": null
            }]
        }))
        .unwrap();
        assert_eq!(list.pods.len(), 1);
        assert!(list.pods[0].container_images.is_empty());
        assert!(list.pods[0].object_meta.labels.is_empty());

        let claim: PersistentVolumeClaim = serde_json::from_value(json!({
            "objectMeta": {"name": "pending"},
            "status": "Pending",
            "capacity": null,
            "accessModes": null
        }))
        .unwrap();
        assert_eq!(claim.status, "Pending");
        assert!(claim.capacity.is_empty());
        assert!(claim.access_modes.is_empty());

        let detail: NodeDetail = serde_json::from_value(json!({
            "objectMeta": null,
            "conditions": null,
            "addresses": null,
            "taints": null,
            "nodeInfo": null,
            "eventList": {"events": null}
        }))
        .unwrap();
        assert!(detail.conditions.is_empty());
        assert!(detail.addresses.is_empty());
        assert!(detail.taints.is_empty());
        assert_eq!(detail.node_info, NodeInfo::default());
        assert!(detail.event_list.events.is_empty());
    }

    #[test]
    fn test_null_list_envelopes_decode_as_empty() {
        let namespaces: NamespaceList =
            serde_json::from_value(json!({"namespaces": null})).unwrap();
        assert!(namespaces.namespaces.is_empty());
        let pods: PodList = serde_json::from_value(json!({"pods": null})).unwrap();
        assert!(pods.pods.is_empty());
        let logs: LogDetails = serde_json::from_value(json!({"logs": null})).unwrap();
        assert!(logs.logs.is_empty());
        let nodes: NodeList = serde_json::from_value(json!({"nodes": null})).unwrap();
        assert!(nodes.nodes.is_empty());
        let claims: ClaimList = serde_json::from_value(json!({"items": null})).unwrap();
        assert!(claims.items.is_empty());
    }

    #[test]
    fn test_event_sub_object_fields() {
        let event: Event = serde_json::from_value(json!({
            "message": "bound",
            "reason": "ProvisioningSucceeded",
            "type": "Normal",
            "objectKind": "PersistentVolumeClaim",
            "objectName": "data"
        }))
        .unwrap();
        assert_eq!(event.object_kind, "PersistentVolumeClaim");
        assert_eq!(event.object_name, "data");
        assert_eq!(event.event_type, "Normal");
    }

    #[test]
    fn test_namespace_list_contains() {
        let list: NamespaceList = serde_json::from_value(json!({
            "namespaces": [{"objectMeta": {"name": "default"}}, {"objectMeta": {"name": "kube-system"}}]
        }))
        .unwrap();
        assert!(list.contains("default"));
        assert!(!list.contains("defaul"));
    }

    #[test]
    fn test_condition_scan_first_match_wins() {
        let scan = ConditionScan::scan(&[
            condition("Ready", "True"),
            condition("MemoryPressure", "False"),
            condition("Ready", "False"),
        ]);
        assert_eq!(scan.state(ConditionKind::Ready), ConditionState::True);
        assert_eq!(scan.state(ConditionKind::MemoryPressure), ConditionState::False);
        assert_eq!(scan.duplicates(), &[ConditionKind::Ready]);
    }

    #[test]
    fn test_condition_scan_missing_is_unknown() {
        let scan = ConditionScan::scan(&[condition("DiskPressure", "True")]);
        assert_eq!(scan.state(ConditionKind::DiskPressure), ConditionState::True);
        assert_eq!(scan.state(ConditionKind::PidPressure), ConditionState::Unknown);
        assert!(scan.duplicates().is_empty());
    }

    #[test]
    fn test_condition_state_from_status() {
        assert_eq!(ConditionState::from_status("True"), ConditionState::True);
        assert_eq!(ConditionState::from_status("False"), ConditionState::False);
        assert_eq!(ConditionState::from_status("true"), ConditionState::Unknown);
        assert_eq!(ConditionState::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_pid_pressure_type_string() {
        let scan = ConditionScan::scan(&[condition("PIDPressure", "False")]);
        assert_eq!(scan.state(ConditionKind::PidPressure), ConditionState::False);
    }
}
