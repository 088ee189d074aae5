//! Title page.

use super::Section;
use crate::format::{DisplayField, UNKNOWN};
use crate::layout::{Field, TemplateKind};
use chrono::{DateTime, Local};
use serde::Serialize;

/// Title page content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitlePage {
    pub namespace: DisplayField,
    pub generated: DisplayField,
}

impl TitlePage {
    pub fn new(namespace: &str, generated_at: &DateTime<Local>) -> Self {
        Self {
            namespace: DisplayField::text(namespace, UNKNOWN),
            generated: DisplayField::text(
                generated_at.format("%Y-%m-%d %H:%M:%S %:z").to_string(),
                UNKNOWN,
            ),
        }
    }
}

impl Section for TitlePage {
    fn template(&self) -> TemplateKind {
        TemplateKind::Title
    }

    fn subject(&self) -> &str {
        self.namespace.first_line()
    }

    fn fields(&self) -> Vec<(Field, &DisplayField)> {
        vec![
            (Field::TitleGenerated, &self.generated),
            (Field::TitleNamespace, &self.namespace),
        ]
    }
}
