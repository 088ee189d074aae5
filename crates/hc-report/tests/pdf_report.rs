//! End-to-end report generation to a real PDF file.
//!
//! Placeholder templates are written to a temp dir, the report is rendered
//! through the lopdf backend, stored, and loaded back.

mod common;

use common::small_cluster;
use hc_report::{
    write_default_templates, ReportConfig, ReportError, ReportGenerator, ReportKind, ReportStage,
    TemplateKind,
};
use lopdf::Document;
use tempfile::TempDir;

fn config(dir: &TempDir) -> ReportConfig {
    let config = ReportConfig::new()
        .with_template_dir(dir.path().join("templates"))
        .with_output_dir(dir.path().join("pdf"));
    write_default_templates(&config.templates, false).unwrap();
    config
}

#[test]
fn test_health_check_written_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let source = small_cluster();
    let generator = ReportGenerator::new(&source, config(&dir));

    let report = generator.generate_health_check("default").unwrap();

    assert_eq!(report.kind, ReportKind::HealthCheck);
    assert!(report.file_name.starts_with("HealthCheck-default-"));
    assert!(report.file_name.ends_with(".pdf"));
    assert_eq!(report.path, dir.path().join("pdf").join(&report.file_name));
    assert_eq!(report.pages, 5);

    let doc = Document::load(&report.path).unwrap();
    assert_eq!(doc.get_pages().len(), 5);
}

#[test]
fn test_test_report_written() {
    let dir = tempfile::tempdir().unwrap();
    let source = small_cluster();
    let generator = ReportGenerator::new(&source, config(&dir));

    let report = generator.generate_test_report().unwrap();
    assert!(report.file_name.starts_with("Test-SAMPLE-NAMESPACE-"));
    let doc = Document::load(&report.path).unwrap();
    assert_eq!(doc.get_pages().len(), 5);
    assert!(source.requests().is_empty());
}

#[test]
fn test_repeated_runs_do_not_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let source = small_cluster();
    let generator = ReportGenerator::new(&source, config(&dir));

    let first = generator.generate_test_report().unwrap();
    let second = generator.generate_test_report().unwrap();
    assert_ne!(first.path, second.path);
    assert!(first.path.exists());
    assert!(second.path.exists());
}

#[test]
fn test_missing_template_is_render_failure() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    std::fs::remove_file(config.templates.path(TemplateKind::NodeDetail)).unwrap();
    let source = small_cluster();
    let generator = ReportGenerator::new(&source, config);

    let err = generator.generate_health_check("default").unwrap_err();
    match &err {
        ReportError::Template { kind, .. } => assert_eq!(*kind, TemplateKind::NodeDetail),
        other => panic!("expected template error, got {other:?}"),
    }
    assert_eq!(err.stage(), ReportStage::Render);
    assert!(!dir.path().join("pdf").exists());
}

#[test]
fn test_unknown_namespace_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let source = small_cluster();
    let generator = ReportGenerator::new(&source, config(&dir));

    let err = generator.generate_health_check("nope").unwrap_err();
    assert!(matches!(err, ReportError::ScopeNotFound { .. }));
    assert!(!dir.path().join("pdf").exists());
}
