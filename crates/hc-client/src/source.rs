//! The resource source seam.
//!
//! The report orchestrator only talks to a [`ResourceSource`]. The HTTP client
//! implements it for production; tests supply canned responses.

use crate::error::Result;
use crate::request::{CollectionKind, ResourceRequest};
use hc_common::{ClaimList, EventList, LogDetails, NamespaceList, NodeDetail, NodeList, PodList};
use serde::de::DeserializeOwned;

/// Something that can answer resource requests.
///
/// Implementors provide [`fetch`](ResourceSource::fetch); the typed helpers
/// map each report section onto a request.
pub trait ResourceSource {
    /// Fetch and decode one collection.
    fn fetch<T: DeserializeOwned>(&self, request: &ResourceRequest) -> Result<T>;

    /// All namespaces.
    fn namespaces(&self) -> Result<NamespaceList> {
        self.fetch(&ResourceRequest::new(CollectionKind::Namespace))
    }

    /// Whether `namespace` is listed by the API.
    fn namespace_exists(&self, namespace: &str) -> Result<bool> {
        Ok(self.namespaces()?.contains(namespace))
    }

    /// Pods in a namespace.
    fn pods(&self, namespace: &str) -> Result<PodList> {
        self.fetch(&ResourceRequest::new(CollectionKind::Pod).in_namespace(namespace))
    }

    /// Log lines of one pod.
    fn pod_logs(&self, namespace: &str, pod: &str) -> Result<LogDetails> {
        self.fetch(
            &ResourceRequest::new(CollectionKind::Log)
                .in_namespace(namespace)
                .named(pod),
        )
    }

    /// Events about one pod.
    fn pod_events(&self, namespace: &str, pod: &str) -> Result<EventList> {
        self.fetch(
            &ResourceRequest::new(CollectionKind::Pod)
                .in_namespace(namespace)
                .named(pod)
                .sub_collection(CollectionKind::Event),
        )
    }

    /// Claims mounted by one pod.
    fn pod_claims(&self, namespace: &str, pod: &str) -> Result<ClaimList> {
        self.fetch(
            &ResourceRequest::new(CollectionKind::Pod)
                .in_namespace(namespace)
                .named(pod)
                .sub_collection(CollectionKind::PersistentVolumeClaim),
        )
    }

    /// All nodes in the cluster.
    fn nodes(&self) -> Result<NodeList> {
        self.fetch(&ResourceRequest::new(CollectionKind::Node))
    }

    /// Detail record of one node.
    fn node_detail(&self, node: &str) -> Result<NodeDetail> {
        self.fetch(&ResourceRequest::new(CollectionKind::Node).named(node))
    }

    /// Claims in a namespace.
    fn claims(&self, namespace: &str) -> Result<ClaimList> {
        self.fetch(&ResourceRequest::new(CollectionKind::PersistentVolumeClaim).in_namespace(namespace))
    }

    /// Event feed of a namespace.
    fn events(&self, namespace: &str) -> Result<EventList> {
        self.fetch(&ResourceRequest::new(CollectionKind::Event).in_namespace(namespace))
    }
}

impl<S: ResourceSource + ?Sized> ResourceSource for &S {
    fn fetch<T: DeserializeOwned>(&self, request: &ResourceRequest) -> Result<T> {
        (**self).fetch(request)
    }
}
