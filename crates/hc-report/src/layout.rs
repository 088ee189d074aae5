//! Anchor registry for the page templates.
//!
//! Every field the composer stamps is a [`Field`] variant. Anchors come from an
//! exhaustive `match`, so a field without a position does not compile, and
//! string lookups of unknown names fail instead of landing at `(0, 0)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A4 portrait width in millimeters.
pub const PAGE_WIDTH_MM: f64 = 210.0;
/// A4 portrait height in millimeters.
pub const PAGE_HEIGHT_MM: f64 = 297.0;

/// Errors raised by registry lookups and validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// No field is registered under this name.
    #[error("unknown layout field '{0}'")]
    UnknownField(String),

    /// An anchor lies outside the printable area.
    #[error("anchor for '{field}' at ({x}, {y}) lies outside the page margins")]
    OutOfBounds { field: String, x: f64, y: f64 },

    /// Two fields share a name.
    #[error("duplicate layout field name '{0}'")]
    DuplicateName(String),
}

/// Page background kinds. Each is imported once per report run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Title,
    PodDetail,
    PodLogs,
    NodeDetail,
    PvcDetail,
}

impl TemplateKind {
    /// All template kinds, in import order.
    pub const ALL: [TemplateKind; 5] = [
        TemplateKind::Title,
        TemplateKind::PodDetail,
        TemplateKind::PodLogs,
        TemplateKind::NodeDetail,
        TemplateKind::PvcDetail,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Title => "title",
            TemplateKind::PodDetail => "pod_detail",
            TemplateKind::PodLogs => "pod_logs",
            TemplateKind::NodeDetail => "node_detail",
            TemplateKind::PvcDetail => "pvc_detail",
        }
    }

    /// Heading printed on generated placeholder templates.
    pub fn heading(&self) -> &'static str {
        match self {
            TemplateKind::Title => "Cluster Health Check",
            TemplateKind::PodDetail => "Pod Detail",
            TemplateKind::PodLogs => "Pod Logs",
            TemplateKind::NodeDetail => "Node Detail",
            TemplateKind::PvcDetail => "Persistent Volume Claim",
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position on an A4 page in millimeters, measured from the top-left corner.
///
/// `y` is the text baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}

impl Anchor {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Region a field's text may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Every stampable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    TitleGenerated,
    TitleNamespace,
    PodDetailName,
    PodDetailLabels,
    PodDetailTaints,
    PodDetailContainers,
    PodDetailPvc,
    PodDetailNode,
    PodDetailEvents,
    PodLogsName,
    PodLogsLogs,
    PvcName,
    PvcState,
    PvcStorageClass,
    PvcVolume,
    PvcLabels,
    PvcCapacity,
    PvcEvents,
    NodeName,
    NodeLabels,
    NodeTaints,
    NodeOsImage,
    NodeIp,
    NodeSchedulable,
    NodeNetworkUnavailable,
    NodeMemoryPressure,
    NodeDiskPressure,
    NodePidPressure,
    NodeReady,
    NodeEvents,
}

impl Field {
    /// All fields in registry order.
    pub const ALL: [Field; 30] = [
        Field::TitleGenerated,
        Field::TitleNamespace,
        Field::PodDetailName,
        Field::PodDetailLabels,
        Field::PodDetailTaints,
        Field::PodDetailContainers,
        Field::PodDetailPvc,
        Field::PodDetailNode,
        Field::PodDetailEvents,
        Field::PodLogsName,
        Field::PodLogsLogs,
        Field::PvcName,
        Field::PvcState,
        Field::PvcStorageClass,
        Field::PvcVolume,
        Field::PvcLabels,
        Field::PvcCapacity,
        Field::PvcEvents,
        Field::NodeName,
        Field::NodeLabels,
        Field::NodeTaints,
        Field::NodeOsImage,
        Field::NodeIp,
        Field::NodeSchedulable,
        Field::NodeNetworkUnavailable,
        Field::NodeMemoryPressure,
        Field::NodeDiskPressure,
        Field::NodePidPressure,
        Field::NodeReady,
        Field::NodeEvents,
    ];

    /// Stable semantic name, e.g. `poddetail.labels`.
    pub fn name(&self) -> &'static str {
        match self {
            Field::TitleGenerated => "title.generated",
            Field::TitleNamespace => "title.namespace",
            Field::PodDetailName => "poddetail.name",
            Field::PodDetailLabels => "poddetail.labels",
            Field::PodDetailTaints => "poddetail.taints",
            Field::PodDetailContainers => "poddetail.containers",
            Field::PodDetailPvc => "poddetail.pvc",
            Field::PodDetailNode => "poddetail.nodes",
            Field::PodDetailEvents => "poddetail.events",
            Field::PodLogsName => "podlogs.name",
            Field::PodLogsLogs => "podlogs.logs",
            Field::PvcName => "pvc.name",
            Field::PvcState => "pvc.state",
            Field::PvcStorageClass => "pvc.storageclass",
            Field::PvcVolume => "pvc.volume",
            Field::PvcLabels => "pvc.labels",
            Field::PvcCapacity => "pvc.capacity",
            Field::PvcEvents => "pvc.events",
            Field::NodeName => "node.name",
            Field::NodeLabels => "node.labels",
            Field::NodeTaints => "node.taints",
            Field::NodeOsImage => "node.osimage",
            Field::NodeIp => "node.ip",
            Field::NodeSchedulable => "node.schedulable",
            Field::NodeNetworkUnavailable => "node.state.networkunavailable",
            Field::NodeMemoryPressure => "node.state.memorypressure",
            Field::NodeDiskPressure => "node.state.diskpressure",
            Field::NodePidPressure => "node.state.pidpressure",
            Field::NodeReady => "node.state.ready",
            Field::NodeEvents => "node.events",
        }
    }

    /// Anchor of this field on its template.
    pub fn anchor(&self) -> Anchor {
        match self {
            Field::TitleGenerated => Anchor::new(30.0, 60.0),
            Field::TitleNamespace => Anchor::new(30.0, 80.0),
            Field::PodDetailName => Anchor::new(60.0, 33.0),
            Field::PodDetailLabels => Anchor::new(30.0, 50.0),
            Field::PodDetailTaints => Anchor::new(30.0, 70.0),
            Field::PodDetailContainers => Anchor::new(30.0, 90.0),
            Field::PodDetailPvc => Anchor::new(30.0, 130.0),
            Field::PodDetailNode => Anchor::new(30.0, 150.0),
            Field::PodDetailEvents => Anchor::new(30.0, 170.0),
            Field::PodLogsName => Anchor::new(60.0, 33.0),
            Field::PodLogsLogs => Anchor::new(30.0, 50.0),
            Field::PvcName => Anchor::new(60.0, 33.0),
            Field::PvcState => Anchor::new(30.0, 50.0),
            Field::PvcStorageClass => Anchor::new(30.0, 70.0),
            Field::PvcVolume => Anchor::new(30.0, 90.0),
            Field::PvcLabels => Anchor::new(30.0, 110.0),
            Field::PvcCapacity => Anchor::new(30.0, 130.0),
            Field::PvcEvents => Anchor::new(30.0, 150.0),
            Field::NodeName => Anchor::new(65.0, 33.0),
            Field::NodeLabels => Anchor::new(30.0, 50.0),
            Field::NodeTaints => Anchor::new(30.0, 70.0),
            Field::NodeOsImage => Anchor::new(30.0, 90.0),
            Field::NodeIp => Anchor::new(30.0, 110.0),
            Field::NodeSchedulable => Anchor::new(70.0, 120.0),
            Field::NodeNetworkUnavailable => Anchor::new(90.0, 137.0),
            Field::NodeMemoryPressure => Anchor::new(90.0, 147.0),
            Field::NodeDiskPressure => Anchor::new(90.0, 157.0),
            Field::NodePidPressure => Anchor::new(90.0, 167.0),
            Field::NodeReady => Anchor::new(90.0, 177.0),
            Field::NodeEvents => Anchor::new(30.0, 195.0),
        }
    }

    /// Template the field is printed on.
    pub fn template(&self) -> TemplateKind {
        match self {
            Field::TitleGenerated | Field::TitleNamespace => TemplateKind::Title,
            Field::PodDetailName
            | Field::PodDetailLabels
            | Field::PodDetailTaints
            | Field::PodDetailContainers
            | Field::PodDetailPvc
            | Field::PodDetailNode
            | Field::PodDetailEvents => TemplateKind::PodDetail,
            Field::PodLogsName | Field::PodLogsLogs => TemplateKind::PodLogs,
            Field::PvcName
            | Field::PvcState
            | Field::PvcStorageClass
            | Field::PvcVolume
            | Field::PvcLabels
            | Field::PvcCapacity
            | Field::PvcEvents => TemplateKind::PvcDetail,
            Field::NodeName
            | Field::NodeLabels
            | Field::NodeTaints
            | Field::NodeOsImage
            | Field::NodeIp
            | Field::NodeSchedulable
            | Field::NodeNetworkUnavailable
            | Field::NodeMemoryPressure
            | Field::NodeDiskPressure
            | Field::NodePidPressure
            | Field::NodeReady
            | Field::NodeEvents => TemplateKind::NodeDetail,
        }
    }

    /// Caption printed next to the field on placeholder templates.
    pub fn caption(&self) -> &'static str {
        match self {
            Field::TitleGenerated => "Generated",
            Field::TitleNamespace => "Namespace",
            Field::PodDetailName | Field::PodLogsName => "Pod:",
            Field::PvcName => "Claim:",
            Field::NodeName => "Node:",
            Field::PodDetailLabels | Field::PvcLabels | Field::NodeLabels => "Labels",
            Field::PodDetailTaints | Field::NodeTaints => "Taints",
            Field::PodDetailContainers => "Containers",
            Field::PodDetailPvc => "Persistent volume claims",
            Field::PodDetailNode => "Node",
            Field::PodDetailEvents | Field::PvcEvents | Field::NodeEvents => "Events",
            Field::PodLogsLogs => "Logs",
            Field::PvcState => "State",
            Field::PvcStorageClass => "Storage class",
            Field::PvcVolume => "Volume",
            Field::PvcCapacity => "Capacity",
            Field::NodeOsImage => "OS image",
            Field::NodeIp => "Internal IP",
            Field::NodeSchedulable => "Schedulable:",
            Field::NodeNetworkUnavailable => "Network unavailable:",
            Field::NodeMemoryPressure => "Memory pressure:",
            Field::NodeDiskPressure => "Disk pressure:",
            Field::NodePidPressure => "PID pressure:",
            Field::NodeReady => "Ready:",
        }
    }

    /// Look a field up by its semantic name.
    pub fn from_name(name: &str) -> Result<Field, LayoutError> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| LayoutError::UnknownField(name.to_string()))
    }

    /// Bounded box for this field.
    ///
    /// The box starts at the anchor, extends to the right margin, and ends at
    /// the next anchor below it on the same template (or the bottom margin).
    pub fn text_box(&self, margin_mm: f64) -> TextBox {
        let anchor = self.anchor();
        let template = self.template();
        let bottom = Field::ALL
            .into_iter()
            .filter(|other| other.template() == template)
            .map(|other| other.anchor().y)
            .filter(|y| *y > anchor.y)
            .fold(PAGE_HEIGHT_MM - margin_mm, f64::min);
        TextBox {
            x: anchor.x,
            y: anchor.y,
            width: (PAGE_WIDTH_MM - margin_mm - anchor.x).max(0.0),
            height: (bottom - anchor.y).max(0.0),
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Field {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::from_name(s)
    }
}

/// Resolve a semantic field name to its anchor.
pub fn resolve(name: &str) -> Result<Anchor, LayoutError> {
    Field::from_name(name).map(|field| field.anchor())
}

/// Check the whole registry: unique names and every anchor inside the margins.
pub fn validate_registry(margin_mm: f64) -> Result<(), LayoutError> {
    let mut seen = std::collections::HashSet::new();
    for field in Field::ALL {
        if !seen.insert(field.name()) {
            return Err(LayoutError::DuplicateName(field.name().to_string()));
        }
        let Anchor { x, y } = field.anchor();
        let inside_x = x >= margin_mm && x < PAGE_WIDTH_MM - margin_mm;
        let inside_y = y >= margin_mm && y < PAGE_HEIGHT_MM - margin_mm;
        if !inside_x || !inside_y {
            return Err(LayoutError::OutOfBounds {
                field: field.name().to_string(),
                x,
                y,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_valid() {
        validate_registry(10.0).unwrap();
    }

    #[test]
    fn test_every_field_round_trips_by_name() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()).unwrap(), field);
            assert_eq!(field.name().parse::<Field>().unwrap(), field);
        }
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        assert_eq!(resolve("poddetail.labels").unwrap(), Anchor::new(30.0, 50.0));
        assert_eq!(resolve("node.state.ready").unwrap(), Anchor::new(90.0, 177.0));
        assert_eq!(
            resolve("poddetail.bogus"),
            Err(LayoutError::UnknownField("poddetail.bogus".to_string()))
        );
    }

    #[test]
    fn test_field_name_prefix_matches_template() {
        for field in Field::ALL {
            let prefix = field.name().split('.').next().unwrap();
            let expected = match prefix {
                "title" => TemplateKind::Title,
                "poddetail" => TemplateKind::PodDetail,
                "podlogs" => TemplateKind::PodLogs,
                "pvc" => TemplateKind::PvcDetail,
                "node" => TemplateKind::NodeDetail,
                other => panic!("unexpected prefix {other}"),
            };
            assert_eq!(field.template(), expected, "{}", field);
        }
    }

    #[test]
    fn test_every_template_has_fields() {
        for kind in TemplateKind::ALL {
            assert!(Field::ALL.iter().any(|f| f.template() == kind), "{kind}");
        }
    }

    #[test]
    fn test_text_box_stops_at_next_anchor() {
        let containers = Field::PodDetailContainers.text_box(10.0);
        assert_eq!(containers.y, 90.0);
        assert_eq!(containers.height, 40.0);
        assert_eq!(containers.width, 170.0);

        let logs = Field::PodLogsLogs.text_box(10.0);
        assert_eq!(logs.height, 297.0 - 10.0 - 50.0);
    }

    #[test]
    fn test_text_box_ignores_other_templates() {
        // node.events is the lowest node anchor; other templates don't shorten it.
        let events = Field::NodeEvents.text_box(10.0);
        assert_eq!(events.height, 287.0 - 195.0);
    }

    #[test]
    fn test_out_of_bounds_margin_detected() {
        let err = validate_registry(40.0).unwrap_err();
        assert!(matches!(err, LayoutError::OutOfBounds { .. }));
    }
}
