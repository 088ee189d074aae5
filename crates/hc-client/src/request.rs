//! Collection kinds and their request paths.

use serde::{Deserialize, Serialize};

/// Category of resource being fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Pod,
    Node,
    PersistentVolumeClaim,
    Event,
    Log,
    Namespace,
}

impl CollectionKind {
    /// Path segment used by the API.
    pub fn segment(&self) -> &'static str {
        match self {
            CollectionKind::Pod => "pod",
            CollectionKind::Node => "node",
            CollectionKind::PersistentVolumeClaim => "persistentvolumeclaim",
            CollectionKind::Event => "event",
            CollectionKind::Log => "log",
            CollectionKind::Namespace => "namespace",
        }
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.segment())
    }
}

/// One fetch: a collection kind plus its scope.
///
/// `namespace` and `name` narrow the collection; `sub` selects a collection
/// owned by the named entity (for example the events of one pod).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    pub kind: CollectionKind,
    pub namespace: Option<String>,
    pub name: Option<String>,
    pub sub: Option<CollectionKind>,
}

impl ResourceRequest {
    /// Unscoped request for a whole collection.
    pub fn new(kind: CollectionKind) -> Self {
        Self {
            kind,
            namespace: None,
            name: None,
            sub: None,
        }
    }

    /// Narrow to a namespace.
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Narrow to a single entity.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Select a collection owned by the named entity.
    pub fn sub_collection(mut self, sub: CollectionKind) -> Self {
        self.sub = Some(sub);
        self
    }

    /// Path relative to the API prefix.
    ///
    /// The namespace collection is addressed with a trailing slash; every
    /// other path is `kind[/namespace][/name][/sub]`.
    pub fn path(&self) -> String {
        if self.kind == CollectionKind::Namespace && self.namespace.is_none() && self.name.is_none()
        {
            return "namespace/".to_string();
        }
        let mut path = self.kind.segment().to_string();
        for part in [self.namespace.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
        {
            path.push('/');
            path.push_str(part);
        }
        if let Some(sub) = self.sub {
            path.push('/');
            path.push_str(sub.segment());
        }
        path
    }
}

impl std::fmt::Display for ResourceRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let cases = [
            (ResourceRequest::new(CollectionKind::Namespace), "namespace/"),
            (
                ResourceRequest::new(CollectionKind::Pod).in_namespace("default"),
                "pod/default",
            ),
            (
                ResourceRequest::new(CollectionKind::Log)
                    .in_namespace("default")
                    .named("web-1"),
                "log/default/web-1",
            ),
            (
                ResourceRequest::new(CollectionKind::Pod)
                    .in_namespace("default")
                    .named("web-1")
                    .sub_collection(CollectionKind::Event),
                "pod/default/web-1/event",
            ),
            (
                ResourceRequest::new(CollectionKind::Pod)
                    .in_namespace("default")
                    .named("web-1")
                    .sub_collection(CollectionKind::PersistentVolumeClaim),
                "pod/default/web-1/persistentvolumeclaim",
            ),
            (ResourceRequest::new(CollectionKind::Node), "node"),
            (
                ResourceRequest::new(CollectionKind::Node).named("node-a"),
                "node/node-a",
            ),
            (
                ResourceRequest::new(CollectionKind::PersistentVolumeClaim).in_namespace("db"),
                "persistentvolumeclaim/db",
            ),
            (
                ResourceRequest::new(CollectionKind::Event).in_namespace("db"),
                "event/db",
            ),
        ];
        for (request, expected) in cases {
            assert_eq!(request.path(), expected, "request {:?}", request);
        }
    }
}
