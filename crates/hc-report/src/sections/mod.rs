//! Page content for each report section.
//!
//! A section value holds the already formatted [`DisplayField`]s of one page.
//! Building it never fails; missing or unfetchable data is a sentinel.

pub mod claim;
pub mod node;
pub mod pod;
pub mod title;

pub use claim::PvcPage;
pub use node::NodePage;
pub use pod::{PodDetailPage, PodLogsPage};
pub use title::TitlePage;

use crate::format::DisplayField;
use crate::layout::{Field, TemplateKind};

/// One page worth of stamped fields.
pub trait Section {
    /// Template the page is drawn on.
    fn template(&self) -> TemplateKind;

    /// What the page is about (pod, node, or claim name).
    fn subject(&self) -> &str;

    /// Fields in stamping order.
    fn fields(&self) -> Vec<(Field, &DisplayField)>;
}
