//! Pod detail and pod log pages.

use super::Section;
use crate::format::{
    format_containers, format_labels, format_optional, DisplayField, NOT_SCHEDULED, NO_LABELS,
    UNKNOWN,
};
use crate::layout::{Field, TemplateKind};
use hc_common::Pod;
use serde::Serialize;

/// Pod detail page content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PodDetailPage {
    pub name: DisplayField,
    pub labels: DisplayField,
    /// Taints of the node the pod is scheduled on.
    pub taints: DisplayField,
    pub containers: DisplayField,
    /// Names of claims the pod mounts.
    pub claims: DisplayField,
    pub node: DisplayField,
    pub events: DisplayField,
}

impl PodDetailPage {
    /// Page for `pod` with its separately fetched sub-resources.
    pub fn new(pod: &Pod, taints: DisplayField, claims: DisplayField, events: DisplayField) -> Self {
        Self {
            name: DisplayField::text(pod.object_meta.name.as_str(), UNKNOWN),
            labels: DisplayField::text(format_labels(&pod.object_meta.labels), NO_LABELS),
            taints,
            containers: DisplayField::Lines(format_containers(&pod.container_images)),
            claims,
            node: DisplayField::text(
                format_optional(Some(pod.node_name.as_str()), NOT_SCHEDULED),
                NOT_SCHEDULED,
            ),
            events,
        }
    }

    /// Fixed content for the test report.
    pub fn sample() -> Self {
        Self {
            name: "SAMPLE-POD-ABCDEF1234567890".into(),
            labels: "LABEL1, LABEL2, LABEL3, LABEL4, LABEL5".into(),
            taints: "SAMPLE.SAMPLE/SAMPLE:SAMPLE op=Exists for 300s".into(),
            containers: DisplayField::Lines(vec![
                "CONTAINER1".to_string(),
                "CONTAINER2".to_string(),
                "CONTAINER3".to_string(),
            ]),
            claims: "SAMPLE-PVC-1".into(),
            node: "NODE1".into(),
            events: DisplayField::Lines(vec![
                "EVENT1".to_string(),
                "EVENT2".to_string(),
                "EVENT3".to_string(),
            ]),
        }
    }
}

impl Section for PodDetailPage {
    fn template(&self) -> TemplateKind {
        TemplateKind::PodDetail
    }

    fn subject(&self) -> &str {
        self.name.first_line()
    }

    fn fields(&self) -> Vec<(Field, &DisplayField)> {
        vec![
            (Field::PodDetailName, &self.name),
            (Field::PodDetailLabels, &self.labels),
            (Field::PodDetailTaints, &self.taints),
            (Field::PodDetailContainers, &self.containers),
            (Field::PodDetailPvc, &self.claims),
            (Field::PodDetailNode, &self.node),
            (Field::PodDetailEvents, &self.events),
        ]
    }
}

/// Pod log page content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PodLogsPage {
    pub name: DisplayField,
    pub logs: DisplayField,
}

impl PodLogsPage {
    pub fn new(pod: &Pod, logs: DisplayField) -> Self {
        Self {
            name: DisplayField::text(pod.object_meta.name.as_str(), UNKNOWN),
            logs,
        }
    }

    /// Fixed content for the test report.
    pub fn sample() -> Self {
        Self {
            name: "SAMPLE-POD-ABCDEF1234567890".into(),
            logs: DisplayField::Lines((1..=5).map(|i| format!("LOG{}", i)).collect()),
        }
    }
}

impl Section for PodLogsPage {
    fn template(&self) -> TemplateKind {
        TemplateKind::PodLogs
    }

    fn subject(&self) -> &str {
        self.name.first_line()
    }

    fn fields(&self) -> Vec<(Field, &DisplayField)> {
        vec![(Field::PodLogsName, &self.name), (Field::PodLogsLogs, &self.logs)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{NO_CONTAINERS, NO_EVENTS};

    #[test]
    fn test_unscheduled_pod_without_containers() {
        let mut pod = Pod::default();
        pod.object_meta.name = "pending-1".to_string();
        let page = PodDetailPage::new(
            &pod,
            DisplayField::from(NOT_SCHEDULED),
            DisplayField::from("none"),
            DisplayField::lines(Vec::new(), NO_EVENTS),
        );
        assert_eq!(page.subject(), "pending-1");
        assert_eq!(page.node, DisplayField::Text(NOT_SCHEDULED.to_string()));
        assert_eq!(page.labels, DisplayField::Text(NO_LABELS.to_string()));
        assert_eq!(page.containers.as_lines(), vec![NO_CONTAINERS]);
    }

    #[test]
    fn test_fields_belong_to_template() {
        let detail = PodDetailPage::sample();
        assert!(detail.fields().iter().all(|(f, _)| f.template() == detail.template()));
        let logs = PodLogsPage::sample();
        assert!(logs.fields().iter().all(|(f, _)| f.template() == logs.template()));
        assert_eq!(logs.logs.as_lines().len(), 5);
    }
}
