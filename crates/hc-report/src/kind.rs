//! Report kinds.

use serde::{Deserialize, Serialize};

/// Kinds of report the pipeline can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Live health check of one namespace.
    #[serde(rename = "healthcheck")]
    HealthCheck,
    /// Fixed sample data; needs no cluster.
    Test,
}

/// Catalog entry describing one report kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportKindInfo {
    /// Identifier used on the command line.
    pub id: &'static str,
    /// Human-readable name.
    pub display_name: &'static str,
    /// Whether the report requires a namespace scope.
    pub scoped: bool,
}

impl ReportKind {
    pub const ALL: [ReportKind; 2] = [ReportKind::HealthCheck, ReportKind::Test];

    /// Identifier used on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            ReportKind::HealthCheck => "healthcheck",
            ReportKind::Test => "test",
        }
    }

    /// Prefix of stored file names.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            ReportKind::HealthCheck => "HealthCheck",
            ReportKind::Test => "Test",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReportKind::HealthCheck => "Health Check Report",
            ReportKind::Test => "Test Report",
        }
    }

    /// All kinds with their display names.
    pub fn catalog() -> Vec<ReportKindInfo> {
        ReportKind::ALL
            .into_iter()
            .map(|kind| ReportKindInfo {
                id: kind.id(),
                display_name: kind.display_name(),
                scoped: kind == ReportKind::HealthCheck,
            })
            .collect()
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog() {
        let catalog = ReportKind::catalog();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].id, "healthcheck");
        assert_eq!(catalog[0].display_name, "Health Check Report");
        assert!(catalog[0].scoped);
        assert_eq!(catalog[1].display_name, "Test Report");
        assert!(!catalog[1].scoped);
    }

    #[test]
    fn test_serialization() {
        assert_eq!(
            serde_json::to_string(&ReportKind::HealthCheck).unwrap(),
            "\"healthcheck\""
        );
        assert_eq!(serde_json::to_string(&ReportKind::Test).unwrap(), "\"test\"");
    }
}
