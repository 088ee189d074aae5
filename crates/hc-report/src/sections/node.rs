//! Node detail page.

use super::Section;
use crate::format::{
    format_events, format_internal_addresses, format_labels, format_taints, DisplayField,
    NODE_DETAIL_UNAVAILABLE, NO_LABELS, UNKNOWN,
};
use crate::layout::{Field, TemplateKind};
use hc_common::{ConditionKind, ConditionScan, ConditionState, NodeDetail, NodeSummary};
use serde::Serialize;

/// Node page content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodePage {
    pub name: DisplayField,
    pub labels: DisplayField,
    pub taints: DisplayField,
    pub os_image: DisplayField,
    /// Internal IPs.
    pub ip: DisplayField,
    /// `true` unless the node is cordoned.
    pub schedulable: DisplayField,
    pub network_unavailable: DisplayField,
    pub memory_pressure: DisplayField,
    pub disk_pressure: DisplayField,
    pub pid_pressure: DisplayField,
    pub ready: DisplayField,
    pub events: DisplayField,
}

fn state(scan: &ConditionScan, kind: ConditionKind) -> DisplayField {
    DisplayField::Text(scan.state(kind).to_string())
}

impl NodePage {
    /// Page from the listing entry and its detail record.
    ///
    /// `scan` must come from `detail.conditions`.
    pub fn new(summary: &NodeSummary, detail: &NodeDetail, scan: &ConditionScan) -> Self {
        Self {
            name: DisplayField::text(summary.object_meta.name.as_str(), UNKNOWN),
            labels: DisplayField::text(format_labels(&summary.object_meta.labels), NO_LABELS),
            taints: DisplayField::Text(format_taints(&detail.taints)),
            os_image: DisplayField::text(detail.node_info.os_image.as_str(), UNKNOWN),
            ip: DisplayField::Text(format_internal_addresses(&detail.addresses)),
            schedulable: DisplayField::Text((!detail.unschedulable).to_string()),
            network_unavailable: state(scan, ConditionKind::NetworkUnavailable),
            memory_pressure: state(scan, ConditionKind::MemoryPressure),
            disk_pressure: state(scan, ConditionKind::DiskPressure),
            pid_pressure: state(scan, ConditionKind::PidPressure),
            ready: state(scan, ConditionKind::Ready),
            events: DisplayField::Lines(format_events(&detail.event_list.events)),
        }
    }

    /// Page for a node whose detail could not be fetched.
    pub fn unavailable(summary: &NodeSummary) -> Self {
        let unavailable = || DisplayField::Text(NODE_DETAIL_UNAVAILABLE.to_string());
        let unknown = || DisplayField::Text(ConditionState::Unknown.to_string());
        Self {
            name: DisplayField::text(summary.object_meta.name.as_str(), UNKNOWN),
            labels: DisplayField::text(format_labels(&summary.object_meta.labels), NO_LABELS),
            taints: unavailable(),
            os_image: unavailable(),
            ip: unavailable(),
            schedulable: DisplayField::Text(UNKNOWN.to_string()),
            network_unavailable: unknown(),
            memory_pressure: unknown(),
            disk_pressure: unknown(),
            pid_pressure: unknown(),
            ready: unknown(),
            events: DisplayField::Lines(vec![NODE_DETAIL_UNAVAILABLE.to_string()]),
        }
    }

    /// Fixed content for the test report.
    pub fn sample() -> Self {
        let no = || DisplayField::from("False");
        Self {
            name: "NODE1".into(),
            labels: "LABEL1, LABEL2, LABEL3".into(),
            taints: "SAMPLE.SAMPLE/SAMPLE:SAMPLE op=Exists for 300s".into(),
            os_image: "Linux Shminux 22.04 LTS".into(),
            ip: "123.123.123.123".into(),
            schedulable: "false".into(),
            network_unavailable: no(),
            memory_pressure: no(),
            disk_pressure: no(),
            pid_pressure: no(),
            ready: "True".into(),
            events: DisplayField::Lines(vec![
                "EVENT1".to_string(),
                "EVENT2".to_string(),
                "EVENT3".to_string(),
            ]),
        }
    }
}

impl Section for NodePage {
    fn template(&self) -> TemplateKind {
        TemplateKind::NodeDetail
    }

    fn subject(&self) -> &str {
        self.name.first_line()
    }

    fn fields(&self) -> Vec<(Field, &DisplayField)> {
        vec![
            (Field::NodeName, &self.name),
            (Field::NodeLabels, &self.labels),
            (Field::NodeTaints, &self.taints),
            (Field::NodeOsImage, &self.os_image),
            (Field::NodeIp, &self.ip),
            (Field::NodeSchedulable, &self.schedulable),
            (Field::NodeNetworkUnavailable, &self.network_unavailable),
            (Field::NodeMemoryPressure, &self.memory_pressure),
            (Field::NodeDiskPressure, &self.disk_pressure),
            (Field::NodePidPressure, &self.pid_pressure),
            (Field::NodeReady, &self.ready),
            (Field::NodeEvents, &self.events),
        ]
    }
}
