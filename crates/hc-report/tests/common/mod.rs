//! Shared fixtures for orchestrator tests.

#![allow(dead_code)]

use hc_client::{FetchError, ResourceRequest, ResourceSource};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// Canned resource source keyed by request path.
///
/// Unknown paths answer 404; paths marked broken fail at the transport.
#[derive(Default)]
pub struct FakeSource {
    routes: HashMap<String, Value>,
    broken: HashSet<String>,
    requests: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, path: &str, body: Value) -> Self {
        self.routes.insert(path.to_string(), body);
        self
    }

    pub fn broken(mut self, path: &str) -> Self {
        self.broken.insert(path.to_string());
        self
    }

    /// Namespace listing containing `names`.
    pub fn with_namespaces(self, names: &[&str]) -> Self {
        let namespaces: Vec<Value> = names
            .iter()
            .map(|name| json!({"objectMeta": {"name": name}}))
            .collect();
        self.route("namespace/", json!({ "namespaces": namespaces }))
    }

    /// Every path requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests.borrow().iter().filter(|p| *p == path).count()
    }
}

impl ResourceSource for FakeSource {
    fn fetch<T: DeserializeOwned>(&self, request: &ResourceRequest) -> hc_client::Result<T> {
        let path = request.path();
        self.requests.borrow_mut().push(path.clone());
        let url = format!("fake://{}", path);
        if self.broken.contains(&path) {
            return Err(FetchError::Transport {
                url,
                message: "connection refused".to_string(),
            });
        }
        match self.routes.get(&path) {
            Some(body) => {
                serde_json::from_value(body.clone()).map_err(|source| FetchError::Decode { url, source })
            }
            None => Err(FetchError::Status { url, status: 404 }),
        }
    }
}

pub fn pod(name: &str, node: &str, labels: Value, images: &[&str]) -> Value {
    json!({
        "objectMeta": {"name": name, "namespace": "default", "labels": labels},
        "status": "Running",
        "containerImages": images,
        "nodeName": node,
    })
}

pub fn event(message: &str, reason: &str, kind: &str, name: &str) -> Value {
    json!({
        "message": message,
        "reason": reason,
        "type": "Normal",
        "objectKind": kind,
        "objectName": name,
    })
}

pub fn condition(kind: &str, status: &str) -> Value {
    json!({"type": kind, "status": status})
}

/// A namespace `default` with one pod on `node-a`, one node, one claim.
pub fn small_cluster() -> FakeSource {
    FakeSource::new()
        .with_namespaces(&["default", "kube-system"])
        .route(
            "pod/default",
            json!({"pods": [pod("web-1", "node-a", json!({"app": "x", "tier": "y"}), &["nginx:1.27"])]}),
        )
        .route(
            "log/default/web-1",
            json!({"logs": [{"timestamp": "2026-10-19T08:00:00Z", "content": "ready"}]}),
        )
        .route(
            "pod/default/web-1/event",
            json!({"events": [event("Pulled image", "Pulled", "Pod", "web-1")]}),
        )
        .route("pod/default/web-1/persistentvolumeclaim", json!({"items": []}))
        .route("node", json!({"nodes": [{"objectMeta": {"name": "node-a", "labels": {"zone": "a"}}}]}))
        .route(
            "node/node-a",
            json!({
                "objectMeta": {"name": "node-a"},
                "unschedulable": false,
                "conditions": [condition("Ready", "True"), condition("MemoryPressure", "False")],
                "addresses": [{"type": "InternalIP", "address": "10.0.0.4"}],
                "taints": [],
                "nodeInfo": {"osImage": "Ubuntu 24.04"},
                "eventList": {"events": []},
            }),
        )
        .route(
            "persistentvolumeclaim/default",
            json!({"items": [{
                "objectMeta": {"name": "data"},
                "status": "Bound",
                "volume": "pv-1",
                "storageClass": "standard",
                "capacity": {"storage": "10Gi"},
            }]}),
        )
        .route(
            "event/default",
            json!({"events": [
                event("Provisioned", "ProvisioningSucceeded", "PersistentVolumeClaim", "data"),
                event("Scheduled", "Scheduled", "Pod", "web-1"),
                event("Other claim", "Resized", "PersistentVolumeClaim", "data-2"),
            ]}),
        )
}
