//! Field formatting: resource records to display strings.
//!
//! All functions here are pure. Empty inputs map to fixed sentinel strings so
//! that a rendered field is never blank.

use hc_common::{Event, LogLine, NodeAddress, PersistentVolumeClaim, Taint, INTERNAL_IP};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub const NO_LABELS: &str = "No labels";
pub const NO_TAINTS: &str = "No taints";
pub const NO_ADDRESSES: &str = "No addresses";
pub const NO_INTERNAL_ADDRESSES: &str = "No internal addresses";
pub const NO_EVENTS: &str = "No events";
pub const NO_CLAIMS: &str = "No PVCs associated with this pod";
pub const NO_LOGS: &str = "No logs";
pub const NO_CONTAINERS: &str = "No containers";
pub const NOT_SCHEDULED: &str = "Not scheduled";
pub const NO_STORAGE_CLASS: &str = "No storage class";
pub const NO_VOLUME: &str = "No volume bound";
pub const UNKNOWN: &str = "Unknown";

// Sentinels for sections whose fetch failed. They differ from the "no data"
// sentinels so a reader can tell an outage from an empty collection.
pub const EVENTS_UNAVAILABLE: &str = "Could not retrieve events";
pub const LOGS_UNAVAILABLE: &str = "Could not retrieve logs";
pub const CLAIMS_UNAVAILABLE: &str = "Could not retrieve PVCs";
pub const NODE_DETAIL_UNAVAILABLE: &str = "Could not retrieve node detail";

const SEPARATOR: &str = ", ";

/// The unit the page composer stamps: one string or an ordered sequence.
///
/// Constructors substitute a sentinel for empty input, so a `DisplayField` is
/// never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayField {
    Text(String),
    Lines(Vec<String>),
}

impl DisplayField {
    /// Single string; `sentinel` when `value` is blank.
    pub fn text(value: impl Into<String>, sentinel: &str) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            DisplayField::Text(sentinel.to_string())
        } else {
            DisplayField::Text(value)
        }
    }

    /// Ordered lines; `[sentinel]` when there are none.
    pub fn lines(values: Vec<String>, sentinel: &str) -> Self {
        if values.is_empty() {
            DisplayField::Lines(vec![sentinel.to_string()])
        } else {
            DisplayField::Lines(values)
        }
    }

    /// First line of the field.
    pub fn first_line(&self) -> &str {
        match self {
            DisplayField::Text(text) => text,
            DisplayField::Lines(lines) => lines.first().map(String::as_str).unwrap_or(UNKNOWN),
        }
    }

    /// View as lines; a text field is one line.
    pub fn as_lines(&self) -> Vec<&str> {
        match self {
            DisplayField::Text(text) => vec![text.as_str()],
            DisplayField::Lines(lines) => lines.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for DisplayField {
    fn from(value: &str) -> Self {
        DisplayField::text(value, UNKNOWN)
    }
}

/// `key:value` pairs joined with `, `; keys sorted for byte-stable output.
pub fn format_labels(labels: &HashMap<String, String>) -> String {
    if labels.is_empty() {
        return NO_LABELS.to_string();
    }
    let sorted: BTreeMap<&String, &String> = labels.iter().collect();
    sorted
        .into_iter()
        .map(|(key, value)| format!("{}:{}", key, value))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// `key:value` per taint, in list order.
pub fn format_taints(taints: &[Taint]) -> String {
    if taints.is_empty() {
        return NO_TAINTS.to_string();
    }
    taints
        .iter()
        .map(|taint| format!("{}:{}", taint.key, taint.value))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Internal IPs joined with `, `.
pub fn format_internal_addresses(addresses: &[NodeAddress]) -> String {
    if addresses.is_empty() {
        return NO_ADDRESSES.to_string();
    }
    let internal: Vec<&str> = addresses
        .iter()
        .filter(|address| address.kind == INTERNAL_IP)
        .map(|address| address.address.as_str())
        .collect();
    if internal.is_empty() {
        return NO_INTERNAL_ADDRESSES.to_string();
    }
    internal.join(SEPARATOR)
}

/// `<message>, Reason: <reason>` per event; `["No events"]` when empty.
pub fn format_events(events: &[Event]) -> Vec<String> {
    if events.is_empty() {
        return vec![NO_EVENTS.to_string()];
    }
    events
        .iter()
        .map(|event| format!("{}, Reason: {}", event.message, event.reason))
        .collect()
}

/// Claim names joined with `, `.
pub fn format_simple_pvc_names(claims: &[PersistentVolumeClaim]) -> String {
    if claims.is_empty() {
        return NO_CLAIMS.to_string();
    }
    claims
        .iter()
        .map(|claim| claim.object_meta.name.as_str())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Events whose sub-object matches `kind` and `name` exactly, in feed order.
///
/// An empty result stays empty; the `No events` sentinel is the caller's call.
pub fn filter_events_by_sub_object(events: &[Event], kind: &str, name: &str) -> Vec<Event> {
    events
        .iter()
        .filter(|event| event.object_kind == kind && event.object_name == name)
        .cloned()
        .collect()
}

/// `<timestamp> <content>` per log line; `["No logs"]` when empty.
pub fn format_log_lines(lines: &[LogLine]) -> Vec<String> {
    if lines.is_empty() {
        return vec![NO_LOGS.to_string()];
    }
    lines
        .iter()
        .map(|line| {
            if line.timestamp.is_empty() {
                line.content.clone()
            } else {
                format!("{} {}", line.timestamp, line.content)
            }
        })
        .collect()
}

/// Container images, one per line.
pub fn format_containers(images: &[String]) -> Vec<String> {
    if images.is_empty() {
        return vec![NO_CONTAINERS.to_string()];
    }
    images.to_vec()
}

/// Requested storage of a claim.
pub fn format_capacity(capacity: &BTreeMap<String, String>) -> String {
    capacity
        .get("storage")
        .filter(|value| !value.is_empty())
        .cloned()
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// `value` or `sentinel` when absent or blank.
pub fn format_optional(value: Option<&str>, sentinel: &str) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => sentinel.to_string(),
    }
}
