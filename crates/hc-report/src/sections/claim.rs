//! Persistent volume claim page.

use super::Section;
use crate::format::{
    format_capacity, format_labels, format_optional, DisplayField, NO_LABELS, NO_STORAGE_CLASS,
    NO_VOLUME, UNKNOWN,
};
use crate::layout::{Field, TemplateKind};
use hc_common::PersistentVolumeClaim;
use serde::Serialize;

/// Claim page content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PvcPage {
    pub name: DisplayField,
    pub state: DisplayField,
    pub storage_class: DisplayField,
    pub volume: DisplayField,
    pub labels: DisplayField,
    pub capacity: DisplayField,
    pub events: DisplayField,
}

impl PvcPage {
    /// Page for `claim`; `events` are already filtered to this claim.
    pub fn new(claim: &PersistentVolumeClaim, events: DisplayField) -> Self {
        Self {
            name: DisplayField::text(claim.object_meta.name.as_str(), UNKNOWN),
            state: DisplayField::text(claim.status.as_str(), UNKNOWN),
            storage_class: DisplayField::Text(format_optional(
                claim.storage_class.as_deref(),
                NO_STORAGE_CLASS,
            )),
            volume: DisplayField::Text(format_optional(Some(claim.volume.as_str()), NO_VOLUME)),
            labels: DisplayField::text(format_labels(&claim.object_meta.labels), NO_LABELS),
            capacity: DisplayField::Text(format_capacity(&claim.capacity)),
            events,
        }
    }

    /// Fixed content for the test report.
    pub fn sample() -> Self {
        Self {
            name: "SAMPLE-PVC-1".into(),
            state: "bound".into(),
            storage_class: "local-storage".into(),
            volume: "SAMPLE-PV-1".into(),
            labels: "LABEL1, LABEL2, LABEL3".into(),
            capacity: "100Ti".into(),
            events: DisplayField::Lines(vec![
                "EVENT1".to_string(),
                "EVENT2".to_string(),
                "EVENT3".to_string(),
            ]),
        }
    }
}

impl Section for PvcPage {
    fn template(&self) -> TemplateKind {
        TemplateKind::PvcDetail
    }

    fn subject(&self) -> &str {
        self.name.first_line()
    }

    fn fields(&self) -> Vec<(Field, &DisplayField)> {
        vec![
            (Field::PvcName, &self.name),
            (Field::PvcState, &self.state),
            (Field::PvcStorageClass, &self.storage_class),
            (Field::PvcVolume, &self.volume),
            (Field::PvcLabels, &self.labels),
            (Field::PvcCapacity, &self.capacity),
            (Field::PvcEvents, &self.events),
        ]
    }
}
