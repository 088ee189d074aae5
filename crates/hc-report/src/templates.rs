//! Placeholder page templates.
//!
//! Writes a plain single-page PDF per template kind with a heading and a
//! caption beside every anchor, so a fresh install can render reports before
//! designed backgrounds exist.

use crate::backend::mm_to_pt;
use crate::config::TemplateSet;
use crate::error::{ReportError, Result};
use crate::layout::{Field, TemplateKind, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

const HEADING_SIZE: f64 = 18.0;
const CAPTION_SIZE: f64 = 9.0;
const CAPTION_GAP_MM: f64 = 6.0;
const LEFT_COLUMN_MM: f64 = 30.0;

/// Write placeholder templates for every kind in `set`.
///
/// Existing files are kept unless `overwrite` is set. Returns the paths that
/// were written.
pub fn write_default_templates(set: &TemplateSet, overwrite: bool) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(&set.dir).map_err(|source| ReportError::Store {
        path: set.dir.clone(),
        source,
    })?;

    let mut written = Vec::new();
    for kind in TemplateKind::ALL {
        let path = set.path(kind);
        if path.exists() && !overwrite {
            debug!(template = %kind, path = %path.display(), "keeping existing template");
            continue;
        }
        let bytes = placeholder_template(kind)?;
        fs::write(&path, bytes).map_err(|source| ReportError::Store {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }
    info!(dir = %set.dir.display(), written = written.len(), "placeholder templates ready");
    Ok(written)
}

/// Single-page A4 PDF with the heading and field captions of `kind`.
pub fn placeholder_template(kind: TemplateKind) -> Result<Vec<u8>> {
    let mut operations = Vec::new();
    text(&mut operations, HEADING_SIZE, LEFT_COLUMN_MM, 20.0, kind.heading());
    for field in Field::ALL.into_iter().filter(|f| f.template() == kind) {
        let anchor = field.anchor();
        // Fields indented past the left column get their caption beside them.
        let (x, y) = if anchor.x > LEFT_COLUMN_MM {
            (LEFT_COLUMN_MM, anchor.y)
        } else {
            (anchor.x, anchor.y - CAPTION_GAP_MM)
        };
        text(&mut operations, CAPTION_SIZE, x, y, field.caption());
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let content = Content { operations }.encode()?;
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        },
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
            "MediaBox" => vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(mm_to_pt(PAGE_WIDTH_MM) as f32),
                Object::Real(mm_to_pt(PAGE_HEIGHT_MM) as f32),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ReportError::Render(format!("failed to serialize {} template: {}", kind, e)))?;
    Ok(bytes)
}

fn text(operations: &mut Vec<Operation>, size: f64, x_mm: f64, y_mm: f64, value: &str) {
    let x = mm_to_pt(x_mm) as f32;
    let y = (mm_to_pt(PAGE_HEIGHT_MM) - mm_to_pt(y_mm)) as f32;
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new(
        "Tf",
        vec![Object::Name(b"F1".to_vec()), Object::Real(size as f32)],
    ));
    operations.push(Operation::new("Td", vec![Object::Real(x), Object::Real(y)]));
    operations.push(Operation::new(
        "Tj",
        vec![Object::String(value.as_bytes().to_vec(), StringFormat::Literal)],
    ));
    operations.push(Operation::new("ET", vec![]));
}
