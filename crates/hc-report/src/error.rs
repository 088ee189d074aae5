//! Error types for report generation.

use crate::layout::{LayoutError, TemplateKind};
use hc_client::FetchError;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Pipeline stage an error escaped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStage {
    Config,
    Validate,
    Render,
    Store,
}

impl std::fmt::Display for ReportStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStage::Config => write!(f, "config"),
            ReportStage::Validate => write!(f, "validate"),
            ReportStage::Render => write!(f, "render"),
            ReportStage::Store => write!(f, "store"),
        }
    }
}

/// Errors that abort a report run.
///
/// Section-local fetch failures never show up here; they degrade to sentinel
/// content inside the document.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The requested namespace is not listed by the API.
    #[error("could not find namespace {namespace}")]
    ScopeNotFound { namespace: String },

    /// The namespace listing itself could not be fetched.
    #[error("could not verify namespace {namespace}: {source}")]
    ScopeLookup {
        namespace: String,
        #[source]
        source: FetchError,
    },

    /// A page template could not be imported.
    #[error("failed to import {kind} template from {}: {reason}", path.display())]
    Template {
        kind: TemplateKind,
        path: PathBuf,
        reason: String,
    },

    /// The document could not be composed or serialized.
    #[error("render error: {0}")]
    Render(String),

    /// Layout registry violation.
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// The finished report could not be written.
    #[error("failed to write report {}: {source}", path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ReportError {
    /// Stage the error belongs to.
    pub fn stage(&self) -> ReportStage {
        match self {
            ReportError::ScopeNotFound { .. } | ReportError::ScopeLookup { .. } => {
                ReportStage::Validate
            }
            ReportError::Template { .. }
            | ReportError::Render(_)
            | ReportError::Layout(_)
            | ReportError::Json(_) => ReportStage::Render,
            ReportError::Store { .. } => ReportStage::Store,
            ReportError::InvalidConfig(_) => ReportStage::Config,
        }
    }
}

impl From<lopdf::Error> for ReportError {
    fn from(err: lopdf::Error) -> Self {
        ReportError::Render(err.to_string())
    }
}
