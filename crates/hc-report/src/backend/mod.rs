//! Render backends.
//!
//! The composer drives a [`RenderBackend`]: import each template once, open
//! pages, draw a template as page background, and stamp text at millimeter
//! positions measured from the top-left corner of an A4 page.

pub mod pdf;
pub mod recording;

pub use pdf::PdfBackend;
pub use recording::{RecordedPage, RecordedText, RecordingBackend};

use crate::error::Result;
use crate::layout::TemplateKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Opaque reference to an imported template, valid for the backend that
/// returned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateHandle(usize);

impl TemplateHandle {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// A document under construction.
pub trait RenderBackend {
    /// Import the first page of the template file at `path`.
    fn import_template(&mut self, kind: TemplateKind, path: &Path) -> Result<TemplateHandle>;

    /// Append an empty page and make it current.
    fn add_page(&mut self);

    /// Draw an imported template over the full current page.
    fn use_template(&mut self, handle: TemplateHandle) -> Result<()>;

    /// Stamp one line of text with its baseline at `(x_mm, y_mm)`.
    fn text(&mut self, x_mm: f64, y_mm: f64, text: &str) -> Result<()>;

    /// Rendered width of `text` in millimeters at the backend's font size.
    fn text_width(&self, text: &str) -> f64;

    /// Pages appended so far.
    fn page_count(&self) -> usize;

    /// Serialize the finished document.
    fn finish(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}

const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// Millimeters to PDF points.
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * POINTS_PER_MM
}

/// Helvetica advance widths (1/1000 em) for printable ASCII, `' '..='~'`.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Width of one character outside the ASCII table.
const DEFAULT_WIDTH: u16 = 556;

/// Estimated width of `text` set in Helvetica at `font_size` points, in mm.
pub fn helvetica_width_mm(text: &str, font_size: f64) -> f64 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (0x20..=0x7e).contains(&code) {
                u32::from(HELVETICA_WIDTHS[(code - 0x20) as usize])
            } else {
                u32::from(DEFAULT_WIDTH)
            }
        })
        .sum();
    f64::from(units) / 1000.0 * font_size / POINTS_PER_MM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_pt() {
        assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-9);
        assert!((mm_to_pt(210.0) - 595.2756).abs() < 1e-3);
    }

    #[test]
    fn test_helvetica_width() {
        assert_eq!(helvetica_width_mm("", 12.0), 0.0);
        // "0" is 556 units: 0.556 * 12pt = 6.672pt = 2.354mm
        let zero = helvetica_width_mm("0", 12.0);
        assert!((zero - 2.3537).abs() < 1e-3, "{zero}");
        assert!(helvetica_width_mm("WWW", 12.0) > helvetica_width_mm("iii", 12.0));
        assert_eq!(helvetica_width_mm("é", 12.0), helvetica_width_mm("0", 12.0));
    }
}
