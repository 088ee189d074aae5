//! In-memory backend that records every drawing call.
//!
//! Used for dry runs and for asserting composed layouts in tests. Template
//! files are not read.

use super::{helvetica_width_mm, RenderBackend, TemplateHandle};
use crate::error::{ReportError, Result};
use crate::layout::TemplateKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One stamped line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedText {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// One page and everything drawn on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedPage {
    /// Templates drawn on the page, in order.
    pub templates: Vec<TemplateKind>,
    pub texts: Vec<RecordedText>,
}

impl RecordedPage {
    /// Stamped text at exactly `(x, y)`.
    pub fn text_at(&self, x: f64, y: f64) -> Option<&str> {
        self.texts
            .iter()
            .find(|t| t.x == x && t.y == y)
            .map(|t| t.text.as_str())
    }

    /// Stamped lines starting at `x`, in drawing order.
    pub fn column(&self, x: f64) -> Vec<&str> {
        self.texts
            .iter()
            .filter(|t| t.x == x)
            .map(|t| t.text.as_str())
            .collect()
    }

    /// Whether any stamped line equals `text`.
    pub fn contains(&self, text: &str) -> bool {
        self.texts.iter().any(|t| t.text == text)
    }
}

/// Recording backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingBackend {
    font_size: f64,
    imports: Vec<(TemplateKind, PathBuf)>,
    pages: Vec<RecordedPage>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new(12.0)
    }
}

impl RecordingBackend {
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            imports: Vec::new(),
            pages: Vec::new(),
        }
    }

    /// Imported templates in import order.
    pub fn imports(&self) -> &[(TemplateKind, PathBuf)] {
        &self.imports
    }

    pub fn pages(&self) -> &[RecordedPage] {
        &self.pages
    }

    /// Template kind of each page (its first drawn template).
    pub fn page_kinds(&self) -> Vec<Option<TemplateKind>> {
        self.pages
            .iter()
            .map(|page| page.templates.first().copied())
            .collect()
    }

    fn current_page(&mut self) -> Result<&mut RecordedPage> {
        self.pages
            .last_mut()
            .ok_or_else(|| ReportError::Render("no page is open".to_string()))
    }
}

impl RenderBackend for RecordingBackend {
    fn import_template(&mut self, kind: TemplateKind, path: &Path) -> Result<TemplateHandle> {
        self.imports.push((kind, path.to_path_buf()));
        Ok(TemplateHandle::new(self.imports.len() - 1))
    }

    fn add_page(&mut self) {
        self.pages.push(RecordedPage::default());
    }

    fn use_template(&mut self, handle: TemplateHandle) -> Result<()> {
        let kind = self
            .imports
            .get(handle.index())
            .map(|(kind, _)| *kind)
            .ok_or_else(|| ReportError::Render(format!("unknown template handle {}", handle.index())))?;
        self.current_page()?.templates.push(kind);
        Ok(())
    }

    fn text(&mut self, x_mm: f64, y_mm: f64, text: &str) -> Result<()> {
        self.current_page()?.texts.push(RecordedText {
            x: x_mm,
            y: y_mm,
            text: text.to_string(),
        });
        Ok(())
    }

    fn text_width(&self, text: &str) -> f64 {
        helvetica_width_mm(text, self.font_size)
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn finish(self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_pages_and_text() {
        let mut backend = RecordingBackend::default();
        let title = backend
            .import_template(TemplateKind::Title, Path::new("t/title.pdf"))
            .unwrap();
        backend.add_page();
        backend.use_template(title).unwrap();
        backend.text(30.0, 60.0, "hello").unwrap();

        assert_eq!(backend.page_count(), 1);
        let page = &backend.pages()[0];
        assert_eq!(page.templates, vec![TemplateKind::Title]);
        assert_eq!(page.text_at(30.0, 60.0), Some("hello"));
        assert_eq!(backend.page_kinds(), vec![Some(TemplateKind::Title)]);
    }

    #[test]
    fn test_text_without_page_fails() {
        let mut backend = RecordingBackend::default();
        assert!(matches!(
            backend.text(1.0, 1.0, "x"),
            Err(ReportError::Render(_))
        ));
    }

    #[test]
    fn test_unknown_handle_fails() {
        let mut backend = RecordingBackend::default();
        backend.add_page();
        assert!(backend.use_template(TemplateHandle::new(3)).is_err());
    }

    #[test]
    fn test_finish_is_json() {
        let mut backend = RecordingBackend::default();
        backend.add_page();
        backend.text(10.0, 20.0, "x").unwrap();
        let bytes = backend.finish().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["pages"][0]["texts"][0]["text"], "x");
    }
}
