//! Report configuration types.

use crate::error::{ReportError, Result};
use crate::layout::{TemplateKind, PAGE_WIDTH_MM};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Locations of the five page backgrounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSet {
    /// Directory the file names below are relative to.
    #[serde(default = "default_template_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_pod_detail")]
    pub pod_detail: String,
    #[serde(default = "default_pod_logs")]
    pub pod_logs: String,
    #[serde(default = "default_node_detail")]
    pub node_detail: String,
    #[serde(default = "default_pvc_detail")]
    pub pvc_detail: String,
}

fn default_template_dir() -> PathBuf {
    PathBuf::from("templates")
}

fn default_title() -> String {
    "title_page.pdf".to_string()
}

fn default_pod_detail() -> String {
    "pod_detail.pdf".to_string()
}

fn default_pod_logs() -> String {
    "pod_logs.pdf".to_string()
}

fn default_node_detail() -> String {
    "node_detail.pdf".to_string()
}

fn default_pvc_detail() -> String {
    "pvc_detail.pdf".to_string()
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self {
            dir: default_template_dir(),
            title: default_title(),
            pod_detail: default_pod_detail(),
            pod_logs: default_pod_logs(),
            node_detail: default_node_detail(),
            pvc_detail: default_pvc_detail(),
        }
    }
}

impl TemplateSet {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    /// Full path of one template.
    pub fn path(&self, kind: TemplateKind) -> PathBuf {
        let file = match kind {
            TemplateKind::Title => &self.title,
            TemplateKind::PodDetail => &self.pod_detail,
            TemplateKind::PodLogs => &self.pod_logs,
            TemplateKind::NodeDetail => &self.node_detail,
            TemplateKind::PvcDetail => &self.pvc_detail,
        };
        self.dir.join(file)
    }

    /// Templates whose file does not exist.
    pub fn missing(&self) -> Vec<(TemplateKind, PathBuf)> {
        TemplateKind::ALL
            .into_iter()
            .map(|kind| (kind, self.path(kind)))
            .filter(|(_, path)| !path.is_file())
            .collect()
    }
}

/// Typography and spacing of stamped text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Font size in points.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Vertical distance between stacked lines (mm).
    #[serde(default = "default_line_step")]
    pub line_step_mm: f64,
    /// Page margin bounding text boxes (mm).
    #[serde(default = "default_margin")]
    pub margin_mm: f64,
}

fn default_font_size() -> f64 {
    12.0
}

fn default_line_step() -> f64 {
    5.0
}

fn default_margin() -> f64 {
    10.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            line_step_mm: default_line_step(),
            margin_mm: default_margin(),
        }
    }
}

/// Complete report configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Page backgrounds.
    #[serde(default)]
    pub templates: TemplateSet,
    /// Report store directory.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Text layout.
    #[serde(default)]
    pub layout: LayoutConfig,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("/tmp/pdf")
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            templates: TemplateSet::default(),
            output_dir: default_output_dir(),
            layout: LayoutConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Create a new report configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read templates from `dir` using the default file names.
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates.dir = dir.into();
        self
    }

    /// Write finished reports into `dir`.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the layout.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Report store directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Reject layouts that cannot place text.
    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        if !(layout.font_size > 0.0) {
            return Err(ReportError::InvalidConfig(format!(
                "font_size must be positive, got {}",
                layout.font_size
            )));
        }
        if !(layout.line_step_mm > 0.0) {
            return Err(ReportError::InvalidConfig(format!(
                "line_step_mm must be positive, got {}",
                layout.line_step_mm
            )));
        }
        if !(layout.margin_mm >= 0.0 && layout.margin_mm < PAGE_WIDTH_MM / 4.0) {
            return Err(ReportError::InvalidConfig(format!(
                "margin_mm must be within [0, {}), got {}",
                PAGE_WIDTH_MM / 4.0,
                layout.margin_mm
            )));
        }
        crate::layout::validate_registry(layout.margin_mm)?;
        Ok(())
    }
}
