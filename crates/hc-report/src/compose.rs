//! Page composer.
//!
//! A [`ReportDocument`] owns a render backend for one run. It imports every
//! template once, keeps the title on the first page, and appends one page per
//! section. Field text is confined to the field's box: entries are wrapped to
//! the box width and cut at the box height with an overflow marker, so a page
//! never spills onto another.

use crate::backend::{RenderBackend, TemplateHandle};
use crate::config::{LayoutConfig, TemplateSet};
use crate::error::{ReportError, Result};
use crate::format::DisplayField;
use crate::layout::{Field, TemplateKind, TextBox};
use crate::sections::{NodePage, PodDetailPage, PodLogsPage, PvcPage, Section, TitlePage};
use chrono::{DateTime, Local};
use std::collections::HashMap;
use tracing::debug;

/// The in-progress report.
#[derive(Debug)]
pub struct ReportDocument<B: RenderBackend> {
    backend: B,
    handles: HashMap<TemplateKind, TemplateHandle>,
    layout: LayoutConfig,
    title_done: bool,
}

impl<B: RenderBackend> ReportDocument<B> {
    /// Import all templates and open the title page.
    pub fn begin(mut backend: B, templates: &TemplateSet, layout: &LayoutConfig) -> Result<Self> {
        let mut handles = HashMap::with_capacity(TemplateKind::ALL.len());
        for kind in TemplateKind::ALL {
            let handle = backend.import_template(kind, &templates.path(kind))?;
            handles.insert(kind, handle);
        }
        backend.add_page();
        Ok(Self {
            backend,
            handles,
            layout: layout.clone(),
            title_done: false,
        })
    }

    pub fn page_count(&self) -> usize {
        self.backend.page_count()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Serialize the finished report.
    pub fn finish(self) -> Result<Vec<u8>> {
        self.backend.finish()
    }

    /// Stamp the title template, generation time, and namespace on the first page.
    pub fn add_title_page(&mut self, namespace: &str, generated_at: &DateTime<Local>) -> Result<()> {
        if self.title_done {
            return Err(ReportError::Render(
                "title page already composed".to_string(),
            ));
        }
        let page = TitlePage::new(namespace, generated_at);
        self.stamp(&page)?;
        self.title_done = true;
        Ok(())
    }

    pub fn add_pod_detail_page(&mut self, page: &PodDetailPage) -> Result<()> {
        self.add_section_page(page)
    }

    pub fn add_pod_logs_page(&mut self, page: &PodLogsPage) -> Result<()> {
        self.add_section_page(page)
    }

    pub fn add_node_page(&mut self, page: &NodePage) -> Result<()> {
        self.add_section_page(page)
    }

    pub fn add_pvc_page(&mut self, page: &PvcPage) -> Result<()> {
        self.add_section_page(page)
    }

    fn add_section_page<S: Section>(&mut self, section: &S) -> Result<()> {
        if !self.title_done {
            return Err(ReportError::Render(
                "title page must be composed before section pages".to_string(),
            ));
        }
        self.backend.add_page();
        self.stamp(section)
    }

    /// Draw the section's template on the current page and stamp its fields.
    fn stamp<S: Section>(&mut self, section: &S) -> Result<()> {
        let template = section.template();
        let handle = self.handles.get(&template).copied().ok_or_else(|| {
            ReportError::Render(format!("template {} was not imported", template))
        })?;
        self.backend.use_template(handle)?;

        for (field, value) in section.fields() {
            if field.template() != template {
                return Err(ReportError::Render(format!(
                    "field {} does not belong on the {} template",
                    field, template
                )));
            }
            self.stamp_field(field, value, section.subject())?;
        }
        Ok(())
    }

    fn stamp_field(&mut self, field: Field, value: &DisplayField, subject: &str) -> Result<()> {
        let text_box = field.text_box(self.layout.margin_mm);
        let step = self.layout.line_step_mm;
        let backend = &self.backend;
        let placed = place_lines(&value.as_lines(), &text_box, step, |text| {
            backend.text_width(text)
        });
        if placed.hidden > 0 {
            debug!(
                field = %field,
                subject,
                hidden = placed.hidden,
                "field text truncated to its box"
            );
        }
        for (i, line) in placed.lines.iter().enumerate() {
            self.backend
                .text(text_box.x, text_box.y + i as f64 * step, line)?;
        }
        Ok(())
    }
}

/// Lines that fit a field's box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedLines {
    /// Lines to stamp, top to bottom.
    pub lines: Vec<String>,
    /// Wrapped lines left out.
    pub hidden: usize,
}

/// Number of lines a box holds at `line_step` spacing; never zero.
pub fn box_capacity(text_box: &TextBox, line_step: f64) -> usize {
    let lines = (text_box.height / line_step).floor();
    if lines.is_finite() && lines >= 1.0 {
        lines as usize
    } else {
        1
    }
}

/// Marker that replaces the last visible line of an overflowing box.
pub fn overflow_marker(hidden: usize) -> String {
    if hidden == 1 {
        "... (1 more line)".to_string()
    } else {
        format!("... ({} more lines)", hidden)
    }
}

/// Wrap `entries` to the box width and cut them to the box height.
///
/// When the wrapped text does not fit, the last visible line becomes an
/// overflow marker counting the lines left out. A one-line box shows only the
/// first line.
pub fn place_lines<F>(entries: &[&str], text_box: &TextBox, line_step: f64, measure: F) -> PlacedLines
where
    F: Fn(&str) -> f64,
{
    let wrapped: Vec<String> = entries
        .iter()
        .flat_map(|entry| wrap_line(entry, text_box.width, &measure))
        .collect();
    let capacity = box_capacity(text_box, line_step);
    if wrapped.len() <= capacity {
        return PlacedLines {
            lines: wrapped,
            hidden: 0,
        };
    }
    if capacity == 1 {
        let hidden = wrapped.len() - 1;
        return PlacedLines {
            lines: wrapped.into_iter().take(1).collect(),
            hidden,
        };
    }
    let kept = capacity - 1;
    let hidden = wrapped.len() - kept;
    let mut lines: Vec<String> = wrapped.into_iter().take(kept).collect();
    lines.push(overflow_marker(hidden));
    PlacedLines { lines, hidden }
}

/// Greedy word wrap; words wider than the box are split between characters.
pub fn wrap_line<F>(line: &str, width: f64, measure: &F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    if measure(line) <= width {
        return vec![line.to_string()];
    }

    let mut out = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if measure(&candidate) <= width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        if measure(word) <= width {
            current = word.to_string();
            continue;
        }
        for c in word.chars() {
            current.push(c);
            if current.chars().count() > 1 && measure(&current) > width {
                current.pop();
                out.push(std::mem::take(&mut current));
                current.push(c);
            }
        }
    }
    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}
