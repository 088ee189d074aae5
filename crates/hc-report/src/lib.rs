//! Templated PDF health-check reports for a cluster namespace.
//!
//! Gathers pods, nodes, claims, events, and logs through a
//! [`ResourceSource`](hc_client::ResourceSource), formats them into display
//! strings, and stamps them onto pre-authored A4 page templates.
//!
//! # Pages
//!
//! - Title: generation time and namespace
//! - Pod detail and pod logs: two pages per pod
//! - Node detail: one page per cluster node
//! - Claim detail: one page per persistent volume claim
//!
//! A run that validates its namespace always produces a document; fetch
//! failures for individual sections show up as sentinel text and in the
//! [`RunSummary`].
//!
//! # Example
//!
//! ```no_run
//! use hc_client::{ClientConfig, HttpResourceClient};
//! use hc_report::{ReportConfig, ReportGenerator};
//!
//! let client = HttpResourceClient::new(ClientConfig::default());
//! let generator = ReportGenerator::new(client, ReportConfig::default());
//! let report = generator.generate_health_check("default").unwrap();
//! println!("{} ({} pages)", report.path.display(), report.pages);
//! ```

pub mod backend;
pub mod compose;
pub mod config;
pub mod error;
pub mod format;
pub mod generator;
pub mod kind;
pub mod layout;
pub mod sections;
pub mod store;
pub mod templates;

pub use backend::{PdfBackend, RecordingBackend, RenderBackend, TemplateHandle};
pub use compose::ReportDocument;
pub use config::{LayoutConfig, ReportConfig, TemplateSet};
pub use error::{ReportError, ReportStage, Result};
pub use format::DisplayField;
pub use generator::{
    ComposedReport, DegradedSection, GeneratedReport, ReportGenerator, RunSummary, SAMPLE_SCOPE,
};
pub use kind::{ReportKind, ReportKindInfo};
pub use layout::{Anchor, Field, LayoutError, TemplateKind};
pub use store::{report_file_name, ReportStore};
pub use templates::write_default_templates;
