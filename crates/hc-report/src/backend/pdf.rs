//! PDF backend built on `lopdf`.
//!
//! Each template's first page is merged into the output document once and
//! wrapped in a Form XObject. Report pages draw that XObject scaled to A4 and
//! stamp text in Helvetica with WinAnsi encoding.

use super::{helvetica_width_mm, mm_to_pt, RenderBackend, TemplateHandle};
use crate::error::{ReportError, Result};
use crate::layout::{TemplateKind, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::path::Path;
use tracing::debug;

const FONT_NAME: &str = "F1";

/// Parent chain depth after which inherited attribute lookup gives up.
const MAX_PAGE_TREE_DEPTH: usize = 32;

#[derive(Debug, Clone)]
struct ImportedTemplate {
    kind: TemplateKind,
    name: String,
    xobject: ObjectId,
    bbox: [f64; 4],
}

/// Writes a real PDF document.
#[derive(Debug)]
pub struct PdfBackend {
    doc: Document,
    font_size: f64,
    font_id: ObjectId,
    templates: Vec<ImportedTemplate>,
    pages: Vec<Vec<Operation>>,
}

impl Default for PdfBackend {
    fn default() -> Self {
        Self::new(12.0)
    }
}

impl PdfBackend {
    pub fn new(font_size: f64) -> Self {
        let mut doc = Document::with_version("1.5");
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        Self {
            doc,
            font_size,
            font_id,
            templates: Vec::new(),
            pages: Vec::new(),
        }
    }

    fn page_width_pt() -> f64 {
        mm_to_pt(PAGE_WIDTH_MM)
    }

    fn page_height_pt() -> f64 {
        mm_to_pt(PAGE_HEIGHT_MM)
    }

    fn current_page(&mut self) -> Result<&mut Vec<Operation>> {
        self.pages
            .last_mut()
            .ok_or_else(|| ReportError::Render("no page is open".to_string()))
    }
}

impl RenderBackend for PdfBackend {
    fn import_template(&mut self, kind: TemplateKind, path: &Path) -> Result<TemplateHandle> {
        let template_error = |reason: String| ReportError::Template {
            kind,
            path: path.to_path_buf(),
            reason,
        };

        let mut source = Document::load(path).map_err(|e| template_error(e.to_string()))?;
        source.renumber_objects_with(self.doc.max_id + 1);

        let page_id = source
            .get_pages()
            .into_values()
            .next()
            .ok_or_else(|| template_error("document has no pages".to_string()))?;
        let content = source
            .get_page_content(page_id)
            .map_err(|e| template_error(e.to_string()))?;
        let resources = inherited_attribute(&source, page_id, b"Resources")
            .unwrap_or_else(|| Object::Dictionary(Dictionary::new()));
        let bbox = inherited_attribute(&source, page_id, b"MediaBox")
            .and_then(|object| rectangle(&source, &object))
            .filter(|[llx, lly, urx, ury]| urx > llx && ury > lly)
            .unwrap_or([0.0, 0.0, Self::page_width_pt(), Self::page_height_pt()]);

        self.doc.max_id = self.doc.max_id.max(source.max_id);
        self.doc.objects.extend(source.objects);

        let xobject = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Form",
                "BBox" => bbox.iter().map(|v| real(*v)).collect::<Vec<_>>(),
                "Resources" => resources,
            },
            content,
        ));

        let index = self.templates.len();
        self.templates.push(ImportedTemplate {
            kind,
            name: format!("T{}", index),
            xobject,
            bbox,
        });
        debug!(template = %kind, path = %path.display(), "imported template");
        Ok(TemplateHandle::new(index))
    }

    fn add_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn use_template(&mut self, handle: TemplateHandle) -> Result<()> {
        let template = self
            .templates
            .get(handle.index())
            .cloned()
            .ok_or_else(|| ReportError::Render(format!("unknown template handle {}", handle.index())))?;
        let [llx, lly, urx, ury] = template.bbox;
        let sx = Self::page_width_pt() / (urx - llx);
        let sy = Self::page_height_pt() / (ury - lly);

        let page = self.current_page()?;
        page.push(Operation::new("q", vec![]));
        page.push(Operation::new(
            "cm",
            vec![
                real(sx),
                real(0.0),
                real(0.0),
                real(sy),
                real(-llx * sx),
                real(-lly * sy),
            ],
        ));
        page.push(Operation::new("Do", vec![name(&template.name)]));
        page.push(Operation::new("Q", vec![]));
        debug!(template = %template.kind, "drew template");
        Ok(())
    }

    fn text(&mut self, x_mm: f64, y_mm: f64, text: &str) -> Result<()> {
        let x = mm_to_pt(x_mm);
        let y = Self::page_height_pt() - mm_to_pt(y_mm);
        let font_size = self.font_size;

        let page = self.current_page()?;
        page.push(Operation::new("BT", vec![]));
        page.push(Operation::new("Tf", vec![name(FONT_NAME), real(font_size)]));
        page.push(Operation::new("Td", vec![real(x), real(y)]));
        page.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        ));
        page.push(Operation::new("ET", vec![]));
        Ok(())
    }

    fn text_width(&self, text: &str) -> f64 {
        helvetica_width_mm(text, self.font_size)
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn finish(mut self) -> Result<Vec<u8>> {
        let pages_id = self.doc.new_object_id();

        let mut xobjects = Dictionary::new();
        for template in &self.templates {
            xobjects.set(template.name.clone(), Object::Reference(template.xobject));
        }
        let resources_id = self.doc.add_object(dictionary! {
            "Font" => dictionary! { FONT_NAME => self.font_id },
            "XObject" => xobjects,
        });

        let media_box = vec![
            real(0.0),
            real(0.0),
            real(Self::page_width_pt()),
            real(Self::page_height_pt()),
        ];
        let mut kids = Vec::with_capacity(self.pages.len());
        for operations in std::mem::take(&mut self.pages) {
            let content = Content { operations }.encode()?;
            let content_id = self.doc.add_object(Stream::new(Dictionary::new(), content));
            let page_id = self.doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => media_box.clone(),
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        self.doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        // Drops the page trees and catalogs merged in with the templates.
        self.doc.prune_objects();
        self.doc.compress();

        let mut bytes = Vec::new();
        self.doc
            .save_to(&mut bytes)
            .map_err(|e| ReportError::Render(format!("failed to serialize PDF: {}", e)))?;
        debug!(pages = count, bytes = bytes.len(), "serialized PDF");
        Ok(bytes)
    }
}

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

fn name(value: &str) -> Object {
    Object::Name(value.as_bytes().to_vec())
}

/// Look `key` up on a page, walking up the page tree for inheritable attributes.
fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
    None
}

fn rectangle(doc: &Document, object: &Object) -> Option<[f64; 4]> {
    let object = match object {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let values = object.as_array().ok()?;
    if values.len() != 4 {
        return None;
    }
    let mut rect = [0.0; 4];
    for (slot, value) in rect.iter_mut().zip(values) {
        *slot = match value {
            Object::Integer(i) => *i as f64,
            Object::Real(r) => f64::from(*r),
            _ => return None,
        };
    }
    Some(rect)
}

/// Encode for a WinAnsi simple font; unmappable characters become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TemplateSet;
    use crate::templates::write_default_templates;

    fn tj_strings(doc: &Document, page_id: ObjectId) -> Vec<String> {
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("abc (1)"), b"abc (1)".to_vec());
        assert_eq!(encode_win_ansi("é"), vec![0xe9]);
        assert_eq!(encode_win_ansi("—"), vec![0x97]);
        assert_eq!(encode_win_ansi("日"), b"?".to_vec());
    }

    #[test]
    fn test_import_stamp_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let set = TemplateSet::in_dir(dir.path());
        write_default_templates(&set, false).unwrap();

        let mut backend = PdfBackend::default();
        let title = backend
            .import_template(TemplateKind::Title, &set.path(TemplateKind::Title))
            .unwrap();
        let node = backend
            .import_template(TemplateKind::NodeDetail, &set.path(TemplateKind::NodeDetail))
            .unwrap();

        backend.add_page();
        backend.use_template(title).unwrap();
        backend.text(30.0, 80.0, "prod (eu)").unwrap();
        backend.add_page();
        backend.use_template(node).unwrap();
        backend.text(65.0, 33.0, "node-a").unwrap();
        assert_eq!(backend.page_count(), 2);

        let bytes = backend.finish().unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 2);

        assert_eq!(tj_strings(&doc, pages[&1]), vec!["prod (eu)"]);
        assert_eq!(tj_strings(&doc, pages[&2]), vec!["node-a"]);
    }

    #[test]
    fn test_missing_template_is_template_error() {
        let mut backend = PdfBackend::default();
        let err = backend
            .import_template(TemplateKind::PodLogs, Path::new("/nonexistent/pod_logs.pdf"))
            .unwrap_err();
        match err {
            ReportError::Template { kind, path, .. } => {
                assert_eq!(kind, TemplateKind::PodLogs);
                assert_eq!(path, Path::new("/nonexistent/pod_logs.pdf"));
            }
            other => panic!("expected template error, got {other:?}"),
        }
    }

    #[test]
    fn test_text_requires_page() {
        let mut backend = PdfBackend::default();
        assert!(backend.text(10.0, 10.0, "x").is_err());
    }
}
